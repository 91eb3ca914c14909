//! Snapshot store contract.

use async_trait::async_trait;
use thiserror::Error;

use chemtrack_inventory::Product;

/// Key under which the single snapshot value is stored.
pub const SNAPSHOT_KEY: &str = "chemicals";

/// Persistent store failure.
///
/// Adapters report these honestly; the calling layer owns the policy that
/// memory stays authoritative (a failed load reads as empty, a failed save
/// is logged and dropped).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage read failed: {0}")]
    Read(String),

    #[error("storage write failed: {0}")]
    Write(String),

    #[error("snapshot decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("snapshot encode failed: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Whole-snapshot persistence for the product collection.
///
/// One fixed key, one serialized text value; `save` overwrites the previous
/// snapshot wholesale. There is no incremental form.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Read and decode the stored snapshot. A missing value is an empty
    /// collection, not an error.
    async fn load(&self) -> Result<Vec<Product>, StoreError>;

    /// Encode `products` and overwrite the stored snapshot.
    async fn save(&self, products: &[Product]) -> Result<(), StoreError>;
}
