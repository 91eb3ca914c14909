//! Persistent store adapter.
//!
//! The product collection is persisted as one serialized text value under a
//! single fixed key, rewritten wholesale after every mutation. Whole-snapshot
//! overwrite keeps the adapter trivial at O(n) write cost per mutation,
//! which is fine for tens to low hundreds of products and a single writer.

pub mod memory;
pub mod snapshot;
pub mod sqlite;

pub use memory::InMemorySnapshotStore;
pub use snapshot::{SNAPSHOT_KEY, SnapshotStore, StoreError};
pub use sqlite::SqliteSnapshotStore;
