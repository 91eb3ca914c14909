//! Inventory state manager and its collaborators.
//!
//! This crate owns the mutable application state: the authoritative product
//! collection, the transient form draft, and the glue that keeps the
//! persistent snapshot in agreement with memory. Screen code sits on top of
//! [`InventoryManager`] and stays out of this workspace.

pub mod collaborators;
pub mod config;
pub mod manager;
pub mod session;

pub use collaborators::{AutoConfirm, ConfirmationDialog, LogNotifier, Notifier};
pub use config::AppConfig;
pub use manager::{DeleteOutcome, InventoryManager};
pub use session::{Role, Session};
