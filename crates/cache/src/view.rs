//! Dependent views over the cached inventory collection.
//!
//! Each view exposes `snapshot()`, `apply(change)`, `restore(snapshot)` so
//! the mutation manager can treat "update every cache by hand" as one closed,
//! testable interface.

use stockhand_core::ItemId;
use stockhand_inventory::{InventoryItem, ItemPatch};

/// A change applied to every registered view in lock-step.
#[derive(Debug, Clone)]
pub enum ViewChange {
    /// Insert or replace an item (also the reconciliation step: the
    /// authoritative server row overwrites the optimistic local patch).
    Upsert(InventoryItem),
    /// Apply a sparse patch to an item already in the view.
    Patch { id: ItemId, patch: ItemPatch },
    /// Remove an item.
    Remove(ItemId),
}

/// Point-in-time copy of one view's contents, used solely for rollback.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot(pub Vec<InventoryItem>);

/// One dependent view of the inventory collection.
pub trait ItemView: Send + Sync {
    /// Stable name of the view (for status reporting and tests).
    fn name(&self) -> &str;

    fn snapshot(&self) -> ViewSnapshot;

    fn restore(&mut self, snapshot: ViewSnapshot);

    fn apply(&mut self, change: &ViewChange);

    fn get(&self, id: &ItemId) -> Option<InventoryItem>;
}

/// Helper shared by the shipped views: apply a change to an ordered item list.
fn apply_to_items(items: &mut Vec<InventoryItem>, change: &ViewChange) {
    match change {
        ViewChange::Upsert(item) => {
            if let Some(existing) = items.iter_mut().find(|i| i.id == item.id) {
                *existing = item.clone();
            } else {
                items.push(item.clone());
            }
        }
        ViewChange::Patch { id, patch } => {
            if let Some(existing) = items.iter_mut().find(|i| i.id == *id) {
                patch.apply_to(existing);
            }
        }
        ViewChange::Remove(id) => {
            items.retain(|i| i.id != *id);
        }
    }
}

/// Flat list view: all items in insertion order.
#[derive(Debug, Default)]
pub struct FlatView {
    items: Vec<InventoryItem>,
}

impl FlatView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ItemView for FlatView {
    fn name(&self) -> &str {
        "flat"
    }

    fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot(self.items.clone())
    }

    fn restore(&mut self, snapshot: ViewSnapshot) {
        self.items = snapshot.0;
    }

    fn apply(&mut self, change: &ViewChange) {
        apply_to_items(&mut self.items, change);
    }

    fn get(&self, id: &ItemId) -> Option<InventoryItem> {
        self.items.iter().find(|i| i.id == *id).cloned()
    }
}

/// Windowed/paginated view: the same collection, chunked into fixed pages.
///
/// Pages are always packed (a remove re-packs subsequent pages), so the flat
/// order fully determines the window structure and a flat snapshot is a
/// lossless restore point.
#[derive(Debug)]
pub struct WindowedView {
    page_size: usize,
    items: Vec<InventoryItem>,
}

impl WindowedView {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            items: Vec::new(),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        self.items.len().div_ceil(self.page_size)
    }

    /// Contents of page `n` (0-based).
    pub fn page(&self, n: usize) -> &[InventoryItem] {
        let start = n * self.page_size;
        if start >= self.items.len() {
            return &[];
        }
        let end = (start + self.page_size).min(self.items.len());
        &self.items[start..end]
    }
}

impl ItemView for WindowedView {
    fn name(&self) -> &str {
        "windowed"
    }

    fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot(self.items.clone())
    }

    fn restore(&mut self, snapshot: ViewSnapshot) {
        self.items = snapshot.0;
    }

    fn apply(&mut self, change: &ViewChange) {
        apply_to_items(&mut self.items, change);
    }

    fn get(&self, id: &ItemId) -> Option<InventoryItem> {
        self.items.iter().find(|i| i.id == *id).cloned()
    }
}

/// The set of dependent views owned by the mutation manager.
///
/// Every mutation touches all registered views in lock-step: snapshot all,
/// apply to all, and on failure restore all. Restoring a subset is a
/// correctness bug, so the registry exposes only whole-set operations.
#[derive(Default)]
pub struct ViewRegistry {
    views: Vec<Box<dyn ItemView>>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, view: Box<dyn ItemView>) {
        self.views.push(view);
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn snapshot_all(&self) -> Vec<ViewSnapshot> {
        self.views.iter().map(|v| v.snapshot()).collect()
    }

    pub fn apply_all(&mut self, change: &ViewChange) {
        for view in &mut self.views {
            view.apply(change);
        }
    }

    pub fn restore_all(&mut self, snapshots: Vec<ViewSnapshot>) {
        debug_assert_eq!(snapshots.len(), self.views.len());
        for (view, snapshot) in self.views.iter_mut().zip(snapshots) {
            view.restore(snapshot);
        }
    }

    /// Current contents of the named view.
    pub fn items_of(&self, name: &str) -> Option<Vec<InventoryItem>> {
        self.views
            .iter()
            .find(|v| v.name() == name)
            .map(|v| v.snapshot().0)
    }

    /// Look an item up in the named view.
    pub fn get_in(&self, name: &str, id: &ItemId) -> Option<InventoryItem> {
        self.views
            .iter()
            .find(|v| v.name() == name)
            .and_then(|v| v.get(id))
    }
}
