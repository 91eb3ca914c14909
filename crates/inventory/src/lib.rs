//! Inventory domain module.
//!
//! Business rules for the tracked product collection, implemented purely as
//! deterministic domain logic (no IO, no storage).

pub mod collection;
pub mod draft;
pub mod event;
pub mod product;

pub use collection::Inventory;
pub use draft::{EditorMode, EditorState, ProductDraft, ProductFields};
pub use event::{
    InventoryEvent, InventoryLoaded, ProductAdded, ProductRemoved, ProductUpdated,
};
pub use product::{Product, StockLogEntry, Unit};
