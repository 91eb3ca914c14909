//! Application configuration.

use std::path::PathBuf;

/// Configuration for assembling a manager.
///
/// `CHEMTRACK_DB` overrides the snapshot database location; when unset, the
/// store resolves its default OS data path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let db_path = std::env::var_os("CHEMTRACK_DB").map(PathBuf::from);
        Self { db_path }
    }
}
