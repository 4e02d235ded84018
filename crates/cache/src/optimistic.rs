//! Optimistic mutation manager.
//!
//! Step order per mutation, preserved exactly:
//! 1. snapshot every registered view;
//! 2. apply the patch to every view synchronously;
//! 3. issue the remote write (the only suspension point);
//! 4. on success, overwrite the patched entity in each view with the
//!    authoritative server response;
//! 5. on failure, restore every view from its step-1 snapshot and propagate.
//!
//! Rollback is unconditional and covers all registered views. Across
//! concurrent mutations of the same item there is no ordering guarantee: the
//! last remote response to arrive wins in each view (accepted; see the
//! concurrency notes in the crate docs).

use std::sync::{Arc, Mutex, MutexGuard};

use stockhand_core::{EngineError, EngineResult, ItemId};
use stockhand_inventory::{InventoryItem, ItemPatch};
use stockhand_store::RemoteStore;

use crate::status::{MutationKind, MutationPhase, StatusListener, StatusUpdate};
use crate::view::{ItemView, ViewChange, ViewRegistry, ViewSnapshot};

/// Owns the dependent views and wraps every mutation in the
/// snapshot / optimistic-apply / confirm-or-rollback envelope.
pub struct OptimisticManager {
    store: Arc<dyn RemoteStore>,
    views: Mutex<ViewRegistry>,
    listeners: Vec<Arc<dyn StatusListener>>,
}

impl OptimisticManager {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            store,
            views: Mutex::new(ViewRegistry::new()),
            listeners: Vec::new(),
        }
    }

    /// Register a dependent view. Views registered after mutations have run
    /// start empty; prime them via [`OptimisticManager::prime`].
    pub fn register_view(&mut self, view: Box<dyn ItemView>) -> EngineResult<()> {
        let mut views = self.lock_views()?;
        views.register(view);
        Ok(())
    }

    pub fn subscribe(&mut self, listener: Arc<dyn StatusListener>) {
        self.listeners.push(listener);
    }

    /// Seed every view with already-fetched items (cache load, not an
    /// optimistic mutation; no status is emitted).
    pub fn prime(&self, items: Vec<InventoryItem>) -> EngineResult<()> {
        let mut views = self.lock_views()?;
        for item in items {
            views.apply_all(&ViewChange::Upsert(item));
        }
        Ok(())
    }

    /// Current contents of the named view (deep copy).
    pub fn view_items(&self, name: &str) -> EngineResult<Vec<InventoryItem>> {
        let views = self.lock_views()?;
        views
            .items_of(name)
            .ok_or_else(|| EngineError::not_found(format!("view {name}")))
    }

    /// Look an item up in the named view.
    pub fn get_in(&self, name: &str, id: &ItemId) -> EngineResult<Option<InventoryItem>> {
        let views = self.lock_views()?;
        if views.items_of(name).is_none() {
            return Err(EngineError::not_found(format!("view {name}")));
        }
        Ok(views.get_in(name, id))
    }

    /// Optimistically update one item.
    ///
    /// Resolves with the authoritative server row — which may differ from the
    /// local patch when the server normalizes or computes fields — or rejects
    /// after restoring every view.
    pub async fn update(&self, id: ItemId, patch: ItemPatch) -> EngineResult<InventoryItem> {
        self.emit(MutationKind::Update, vec![id], MutationPhase::Pending);

        let snapshots = {
            let mut views = self.lock_views()?;
            let snapshots = views.snapshot_all();
            views.apply_all(&ViewChange::Patch {
                id,
                patch: patch.clone(),
            });
            snapshots
        };

        match self.store.update_item(id, patch).await {
            Ok(item) => {
                {
                    let mut views = self.lock_views()?;
                    views.apply_all(&ViewChange::Upsert(item.clone()));
                }
                tracing::info!(item_id = %id, "optimistic update confirmed");
                self.emit(MutationKind::Update, vec![id], MutationPhase::Succeeded);
                Ok(item)
            }
            Err(err) => {
                self.rollback(snapshots)?;
                let err = err.into_write_error();
                tracing::error!(item_id = %id, error = %err, "optimistic update rolled back");
                self.emit(
                    MutationKind::Update,
                    vec![id],
                    MutationPhase::Failed {
                        error: err.to_string(),
                    },
                );
                Err(err)
            }
        }
    }

    /// Optimistically delete one item.
    pub async fn delete(&self, id: ItemId) -> EngineResult<()> {
        self.emit(MutationKind::Delete, vec![id], MutationPhase::Pending);

        let snapshots = {
            let mut views = self.lock_views()?;
            let snapshots = views.snapshot_all();
            views.apply_all(&ViewChange::Remove(id));
            snapshots
        };

        match self.store.delete_item(id).await {
            Ok(()) => {
                tracing::info!(item_id = %id, "optimistic delete confirmed");
                self.emit(MutationKind::Delete, vec![id], MutationPhase::Succeeded);
                Ok(())
            }
            Err(err) => {
                self.rollback(snapshots)?;
                let err = err.into_write_error();
                tracing::error!(item_id = %id, error = %err, "optimistic delete rolled back");
                self.emit(
                    MutationKind::Delete,
                    vec![id],
                    MutationPhase::Failed {
                        error: err.to_string(),
                    },
                );
                Err(err)
            }
        }
    }

    /// Optimistically update a batch of independent items.
    ///
    /// The underlying writes are per-row and not transactional, but the view
    /// layer is all-or-nothing: if any write fails, every view rolls back to
    /// the pre-batch snapshot, including items whose own writes succeeded.
    pub async fn bulk_update(
        &self,
        changes: Vec<(ItemId, ItemPatch)>,
    ) -> EngineResult<Vec<InventoryItem>> {
        let ids: Vec<ItemId> = changes.iter().map(|(id, _)| *id).collect();
        self.emit(MutationKind::BulkUpdate, ids.clone(), MutationPhase::Pending);

        let snapshots = {
            let mut views = self.lock_views()?;
            let snapshots = views.snapshot_all();
            for (id, patch) in &changes {
                views.apply_all(&ViewChange::Patch {
                    id: *id,
                    patch: patch.clone(),
                });
            }
            snapshots
        };

        let mut confirmed = Vec::with_capacity(changes.len());
        for (id, patch) in changes {
            match self.store.update_item(id, patch).await {
                Ok(item) => confirmed.push(item),
                Err(err) => {
                    self.rollback(snapshots)?;
                    let err = err.into_write_error();
                    tracing::error!(
                        item_id = %id,
                        confirmed = confirmed.len(),
                        error = %err,
                        "bulk update rolled back"
                    );
                    self.emit(
                        MutationKind::BulkUpdate,
                        ids,
                        MutationPhase::Failed {
                            error: err.to_string(),
                        },
                    );
                    return Err(err);
                }
            }
        }

        {
            let mut views = self.lock_views()?;
            for item in &confirmed {
                views.apply_all(&ViewChange::Upsert(item.clone()));
            }
        }
        tracing::info!(count = confirmed.len(), "bulk update confirmed");
        self.emit(MutationKind::BulkUpdate, ids, MutationPhase::Succeeded);
        Ok(confirmed)
    }

    fn rollback(&self, snapshots: Vec<ViewSnapshot>) -> EngineResult<()> {
        let mut views = self.lock_views()?;
        views.restore_all(snapshots);
        Ok(())
    }

    fn lock_views(&self) -> EngineResult<MutexGuard<'_, ViewRegistry>> {
        self.views
            .lock()
            .map_err(|_| EngineError::invariant("view registry lock poisoned"))
    }

    fn emit(&self, kind: MutationKind, item_ids: Vec<ItemId>, phase: MutationPhase) {
        let update = StatusUpdate {
            kind,
            item_ids,
            phase,
        };
        for listener in &self.listeners {
            listener.on_status(&update);
        }
    }
}
