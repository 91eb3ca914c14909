//! Change events published after committed mutations.
//!
//! Subscribers (a screen, a test) treat these as re-render hints; the
//! collection itself stays the source of truth.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use chemtrack_core::ProductId;
use chemtrack_events::Event;

use crate::product::Product;

/// Event: the collection was replaced from a persisted snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryLoaded {
    pub count: usize,
    pub occurred_at: DateTime<Utc>,
}

/// Event: a product was appended to the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAdded {
    pub product: Product,
    pub occurred_at: DateTime<Utc>,
}

/// Event: an existing product's fields were replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdated {
    pub product: Product,
    pub occurred_at: DateTime<Utc>,
}

/// Event: a product was removed from the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRemoved {
    pub id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InventoryEvent {
    Loaded(InventoryLoaded),
    ProductAdded(ProductAdded),
    ProductUpdated(ProductUpdated),
    ProductRemoved(ProductRemoved),
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::Loaded(_) => "inventory.loaded",
            InventoryEvent::ProductAdded(_) => "inventory.product.added",
            InventoryEvent::ProductUpdated(_) => "inventory.product.updated",
            InventoryEvent::ProductRemoved(_) => "inventory.product.removed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::Loaded(e) => e.occurred_at,
            InventoryEvent::ProductAdded(e) => e.occurred_at,
            InventoryEvent::ProductUpdated(e) => e.occurred_at,
            InventoryEvent::ProductRemoved(e) => e.occurred_at,
        }
    }
}
