//! Contract of the remote relational store.

use async_trait::async_trait;

use stockhand_core::{ConsumptionEventId, ItemId};
use stockhand_inventory::{
    ConsumptionEvent, ConsumptionRate, CoreTransaction, InventoryItem, ItemPatch, UsageMetric,
};

use crate::error::StoreError;

/// Point reads and writes against the remote store.
///
/// The store provides per-row atomic updates but **no** cross-row transaction
/// across an engine operation; consistency across rows is the engine's job
/// (snapshot/rollback at the cache layer, documented inconsistency windows
/// elsewhere). Implementations may normalize fields on write — `update_item`
/// and `insert_item` return the authoritative row, which callers must treat
/// as the truth, not their local patch.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn get_item(&self, id: ItemId) -> Result<InventoryItem, StoreError>;

    async fn insert_item(&self, item: InventoryItem) -> Result<InventoryItem, StoreError>;

    /// Apply a sparse patch to one item and return the authoritative row.
    async fn update_item(&self, id: ItemId, patch: ItemPatch)
        -> Result<InventoryItem, StoreError>;

    async fn delete_item(&self, id: ItemId) -> Result<(), StoreError>;

    async fn insert_consumption(&self, event: ConsumptionEvent) -> Result<(), StoreError>;

    async fn delete_consumption(&self, id: ConsumptionEventId) -> Result<(), StoreError>;

    async fn get_rate(
        &self,
        item_id: ItemId,
        metric: UsageMetric,
    ) -> Result<Option<ConsumptionRate>, StoreError>;

    /// Insert or replace the rate for its `(item, metric)` key.
    async fn upsert_rate(&self, rate: ConsumptionRate) -> Result<(), StoreError>;

    async fn insert_core_transaction(&self, tx: CoreTransaction) -> Result<(), StoreError>;

    /// All core transactions recorded against one item, in insertion order.
    async fn list_core_transactions(
        &self,
        item_id: ItemId,
    ) -> Result<Vec<CoreTransaction>, StoreError>;
}
