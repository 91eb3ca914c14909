//! The inventory state manager.

use std::sync::Arc;

use chrono::Utc;

use chemtrack_core::{DomainError, DomainResult, ProductId};
use chemtrack_events::{EventBus, InMemoryEventBus, Subscription};
use chemtrack_inventory::{
    EditorState, Inventory, InventoryEvent, InventoryLoaded, Product, ProductAdded, ProductDraft,
    ProductFields, ProductRemoved, ProductUpdated,
};
use chemtrack_store::{SnapshotStore, SqliteSnapshotStore};

use crate::collaborators::{ConfirmationDialog, Notifier};
use crate::config::AppConfig;
use crate::session::Session;

/// Outcome of a delete request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined the confirmation dialog.
    Cancelled,
    /// The product was removed and the snapshot rewritten.
    Removed,
    /// Confirmed, but no product with that id exists; nothing changed.
    Absent,
}

/// Owns the authoritative product collection and the in-progress form
/// draft, and keeps the persisted snapshot in agreement with memory.
///
/// Mutations run memory-first: validation aborts before any state change, a
/// committed change is persisted afterwards, and a persistence failure is
/// logged while memory stays authoritative for the rest of the session.
/// Every mutation takes `&mut self`, so there is exactly one mutator at a
/// time by construction; no locking inside.
pub struct InventoryManager {
    inventory: Inventory,
    editor: EditorState,
    session: Session,
    store: Arc<dyn SnapshotStore>,
    dialog: Arc<dyn ConfirmationDialog>,
    notifier: Arc<dyn Notifier>,
    bus: InMemoryEventBus<InventoryEvent>,
}

impl InventoryManager {
    pub fn new(
        store: Arc<dyn SnapshotStore>,
        dialog: Arc<dyn ConfirmationDialog>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            inventory: Inventory::new(),
            editor: EditorState::idle(),
            session: Session::anonymous(),
            store,
            dialog,
            notifier,
            bus: InMemoryEventBus::new(),
        }
    }

    /// Assemble a manager backed by the SQLite store from `config`.
    pub fn with_config(
        config: &AppConfig,
        dialog: Arc<dyn ConfirmationDialog>,
        notifier: Arc<dyn Notifier>,
    ) -> anyhow::Result<Self> {
        let store = match &config.db_path {
            Some(path) => SqliteSnapshotStore::at_path(path.clone()),
            None => SqliteSnapshotStore::new()?,
        };
        Ok(Self::new(Arc::new(store), dialog, notifier))
    }

    /// Replace the collection with the persisted snapshot, if readable.
    ///
    /// A read or decode failure is logged and the collection is left as it
    /// was (empty on a fresh start); the session continues.
    pub async fn initialize(&mut self) {
        match self.store.load().await {
            Ok(products) => {
                let count = products.len();
                self.inventory = Inventory::from_products(products);
                tracing::info!(count, "loaded inventory snapshot");
                self.publish(InventoryEvent::Loaded(InventoryLoaded {
                    count,
                    occurred_at: Utc::now(),
                }));
            }
            Err(err) => {
                tracing::warn!("failed to load inventory snapshot, starting empty: {err}");
            }
        }
    }

    /// Validate `draft` and append a new product.
    ///
    /// Rejections are reported through the notifier and leave every piece of
    /// state untouched. On success the editor resets to a blank add draft.
    pub async fn add_product(&mut self, draft: &ProductDraft) -> DomainResult<ProductId> {
        let fields = self.validated(draft)?;

        let now = Utc::now();
        let product = self.inventory.add(fields, now)?;
        let id = product.id();
        tracing::info!(%id, name = product.name(), "product added");

        self.publish(InventoryEvent::ProductAdded(ProductAdded {
            product,
            occurred_at: now,
        }));
        self.persist().await;
        self.editor.reset();

        Ok(id)
    }

    /// Validate `draft` and replace the fields of the product it targets.
    ///
    /// Validation matches the add path exactly. The draft must carry the id
    /// of an existing product; a missing target is `NotFound` and nothing
    /// changes.
    pub async fn edit_product(&mut self, draft: &ProductDraft) -> DomainResult<()> {
        let fields = self.validated(draft)?;
        let id = draft
            .id
            .ok_or_else(|| DomainError::invariant("edit draft carries no product id"))?;

        let now = Utc::now();
        let product = match self.inventory.update(id, &fields, now) {
            Ok(product) => product,
            Err(err) => {
                tracing::warn!(%id, "edit targeted a missing product");
                return Err(err);
            }
        };
        tracing::info!(%id, name = product.name(), "product updated");

        self.publish(InventoryEvent::ProductUpdated(ProductUpdated {
            product,
            occurred_at: now,
        }));
        self.persist().await;
        self.editor.reset();

        Ok(())
    }

    /// Ask for confirmation, then remove the product with `id`.
    ///
    /// A declined dialog changes nothing. A confirmed delete of an id that
    /// is no longer present is a quiet no-op (`Absent`).
    pub async fn delete_product(&mut self, id: ProductId) -> DeleteOutcome {
        let confirmed = self
            .dialog
            .confirm(
                "Confirm deletion",
                "Are you sure you want to delete this product?",
            )
            .await;
        if !confirmed {
            return DeleteOutcome::Cancelled;
        }

        match self.inventory.remove(id) {
            Some(product) => {
                tracing::info!(%id, name = product.name(), "product deleted");
                self.publish(InventoryEvent::ProductRemoved(ProductRemoved {
                    id,
                    occurred_at: Utc::now(),
                }));
                self.persist().await;
                DeleteOutcome::Removed
            }
            None => {
                tracing::warn!(%id, "delete targeted a missing product");
                DeleteOutcome::Absent
            }
        }
    }

    /// Open a blank add form.
    pub fn begin_add(&mut self) {
        self.editor.begin_add();
    }

    /// Open the edit form pre-filled from the product with `id`.
    pub fn begin_edit(&mut self, id: ProductId) -> DomainResult<()> {
        let product = self.inventory.get(id).ok_or(DomainError::NotFound)?;
        self.editor.begin_edit(product);
        Ok(())
    }

    /// Discard the in-progress draft; already-persisted state is untouched.
    pub fn cancel_edit(&mut self) {
        self.editor.reset();
    }

    pub fn products(&self) -> &[Product] {
        self.inventory.products()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.inventory.get(id)
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    /// Mutable editor access for form binding.
    pub fn editor_mut(&mut self) -> &mut EditorState {
        &mut self.editor
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Subscribe to change events (re-render hints).
    pub fn subscribe(&self) -> Subscription<InventoryEvent> {
        self.bus.subscribe()
    }

    fn validated(&self, draft: &ProductDraft) -> DomainResult<ProductFields> {
        draft.parse().inspect_err(|err| {
            if let DomainError::Validation(msg) = err {
                self.notifier.notify("Error", msg);
            }
        })
    }

    fn publish(&self, event: InventoryEvent) {
        if let Err(err) = self.bus.publish(event) {
            tracing::warn!("failed to publish inventory event: {err:?}");
        }
    }

    /// Rewrite the persisted snapshot from memory.
    ///
    /// Failure is logged and otherwise ignored: memory is already mutated
    /// and stays the source of truth for the rest of the session.
    async fn persist(&self) {
        if let Err(err) = self.store.save(self.inventory.products()).await {
            tracing::error!("failed to persist inventory snapshot: {err}");
        }
    }
}
