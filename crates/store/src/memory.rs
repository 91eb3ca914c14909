//! In-memory snapshot store for tests/dev.

use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use chemtrack_inventory::Product;

use crate::snapshot::{SnapshotStore, StoreError};

/// In-memory snapshot slot.
///
/// Round-trips through the same serialized text encoding as the SQLite
/// store, so decode behavior matches. Failure injection switches let tests
/// drive the storage failure paths.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    slot: RwLock<Option<String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `load` calls fail.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `save` calls fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// The raw serialized snapshot, if one was saved.
    pub fn raw(&self) -> Option<String> {
        self.slot.read().ok().and_then(|slot| slot.clone())
    }

    /// Replace the raw stored text (e.g. with garbage, for decode tests).
    pub fn set_raw(&self, text: impl Into<String>) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = Some(text.into());
        }
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn load(&self) -> Result<Vec<Product>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Read("injected read failure".to_string()));
        }

        let slot = self
            .slot
            .read()
            .map_err(|_| StoreError::Read("snapshot lock poisoned".to_string()))?;

        match slot.as_deref() {
            None => Ok(Vec::new()),
            Some(text) => serde_json::from_str(text).map_err(StoreError::Decode),
        }
    }

    async fn save(&self, products: &[Product]) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Write("injected write failure".to_string()));
        }

        let payload = serde_json::to_string(products).map_err(StoreError::Encode)?;

        let mut slot = self
            .slot
            .write()
            .map_err(|_| StoreError::Write("snapshot lock poisoned".to_string()))?;
        *slot = Some(payload);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chemtrack_core::ProductId;
    use chemtrack_inventory::{ProductFields, Unit};
    use chrono::Utc;

    use super::*;

    fn product(id: i64, name: &str) -> Product {
        Product::new(
            ProductId::from_millis(id),
            ProductFields {
                name: name.to_string(),
                stock: 1.0,
                unit: Unit::Gram,
                min_stock: 0.5,
            },
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn empty_slot_loads_as_empty_collection() {
        let store = InMemorySnapshotStore::new();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = InMemorySnapshotStore::new();
        let products = vec![product(1, "A"), product(2, "B")];

        store.save(&products).await.unwrap();
        assert_eq!(store.load().await.unwrap(), products);
    }

    #[tokio::test]
    async fn injected_failures_surface_as_store_errors() {
        let store = InMemorySnapshotStore::new();

        store.fail_writes(true);
        let err = store.save(&[product(1, "A")]).await.unwrap_err();
        assert!(matches!(err, StoreError::Write(_)));
        store.fail_writes(false);

        store.fail_reads(true);
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StoreError::Read(_)));
    }

    #[tokio::test]
    async fn garbage_text_reports_decode_error() {
        let store = InMemorySnapshotStore::new();
        store.set_raw("{definitely not products}");

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }
}
