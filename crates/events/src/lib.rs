//! Change-notification plumbing.
//!
//! Domain state lives in an explicit container; anything that wants to react
//! to a mutation (a screen, a test) subscribes to a bus and re-reads the
//! container. This crate holds the transport-agnostic pieces.

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
