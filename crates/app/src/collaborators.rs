//! External collaborators the state manager talks to.
//!
//! Presentation supplies the real implementations (a modal dialog, a toast);
//! the ones defined here are for tests and headless use.

use async_trait::async_trait;

/// Destructive-action confirmation dialog.
///
/// Implementations present at least a cancel choice and a
/// destructive-confirm choice; only the confirm path returns true.
#[async_trait]
pub trait ConfirmationDialog: Send + Sync {
    async fn confirm(&self, title: &str, message: &str) -> bool;
}

/// Synchronous user notification, used for validation failures.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, message: &str);
}

/// Dialog that always answers the same way.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

#[async_trait]
impl ConfirmationDialog for AutoConfirm {
    async fn confirm(&self, _title: &str, _message: &str) -> bool {
        self.0
    }
}

/// Notifier that forwards to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, title: &str, message: &str) {
        tracing::warn!(title, message, "user notification");
    }
}
