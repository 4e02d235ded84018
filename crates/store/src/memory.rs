//! In-memory remote store.
//!
//! Intended for tests/dev. Not optimized for performance. Mirrors the two
//! behaviors of the real backend the engine depends on: per-row atomic
//! updates with no cross-row transaction, and server-side normalization of
//! written rows (trimmed name, uppercased SKU), so reconciliation against the
//! authoritative response is observable.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use stockhand_core::{ConsumptionEventId, Entity, ItemId};
use stockhand_inventory::{
    ConsumptionEvent, ConsumptionRate, CoreTransaction, InventoryItem, ItemPatch, UsageMetric,
};

use crate::error::StoreError;
use crate::remote::RemoteStore;

/// Generic keyed table: one row per entity id.
#[derive(Debug)]
struct Table<E: Entity> {
    rows: RwLock<HashMap<E::Id, E>>,
}

impl<E: Entity + Clone> Table<E> {
    fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }

    fn get(&self, id: &E::Id) -> Result<Option<E>, StoreError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| StoreError::backend("table lock poisoned"))?;
        Ok(rows.get(id).cloned())
    }

    fn insert(&self, entity: E) -> Result<(), StoreError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| StoreError::backend("table lock poisoned"))?;
        rows.insert(entity.id().clone(), entity);
        Ok(())
    }

    fn update_with(
        &self,
        id: &E::Id,
        entity_name: &'static str,
        f: impl FnOnce(&mut E),
    ) -> Result<E, StoreError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| StoreError::backend("table lock poisoned"))?;
        let row = rows
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(entity_name, format!("{id:?}")))?;
        f(row);
        Ok(row.clone())
    }

    fn remove(&self, id: &E::Id, entity_name: &'static str) -> Result<(), StoreError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| StoreError::backend("table lock poisoned"))?;
        rows.remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(entity_name, format!("{id:?}")))
    }
}

/// In-memory [`RemoteStore`].
#[derive(Debug)]
pub struct InMemoryStore {
    items: Table<InventoryItem>,
    consumptions: Table<ConsumptionEvent>,
    rates: RwLock<HashMap<(ItemId, UsageMetric), ConsumptionRate>>,
    /// Append-only core-charge log, insertion order preserved.
    core_transactions: RwLock<Vec<CoreTransaction>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            items: Table::new(),
            consumptions: Table::new(),
            rates: RwLock::new(HashMap::new()),
            core_transactions: RwLock::new(Vec::new()),
        }
    }

    /// Server-side normalization applied to every written item row.
    fn normalize(item: &mut InventoryItem) {
        item.name = item.name.trim().to_string();
        item.sku = item.sku.trim().to_uppercase();
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteStore for InMemoryStore {
    async fn get_item(&self, id: ItemId) -> Result<InventoryItem, StoreError> {
        self.items
            .get(&id)?
            .ok_or_else(|| StoreError::not_found("inventory item", id))
    }

    async fn insert_item(&self, mut item: InventoryItem) -> Result<InventoryItem, StoreError> {
        Self::normalize(&mut item);
        self.items.insert(item.clone())?;
        Ok(item)
    }

    async fn update_item(
        &self,
        id: ItemId,
        patch: ItemPatch,
    ) -> Result<InventoryItem, StoreError> {
        self.items.update_with(&id, "inventory item", |item| {
            patch.apply_to(item);
            Self::normalize(item);
        })
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), StoreError> {
        self.items.remove(&id, "inventory item")
    }

    async fn insert_consumption(&self, event: ConsumptionEvent) -> Result<(), StoreError> {
        self.consumptions.insert(event)
    }

    async fn delete_consumption(&self, id: ConsumptionEventId) -> Result<(), StoreError> {
        self.consumptions.remove(&id, "consumption event")
    }

    async fn get_rate(
        &self,
        item_id: ItemId,
        metric: UsageMetric,
    ) -> Result<Option<ConsumptionRate>, StoreError> {
        let rates = self
            .rates
            .read()
            .map_err(|_| StoreError::backend("rates lock poisoned"))?;
        Ok(rates.get(&(item_id, metric)).cloned())
    }

    async fn upsert_rate(&self, rate: ConsumptionRate) -> Result<(), StoreError> {
        let mut rates = self
            .rates
            .write()
            .map_err(|_| StoreError::backend("rates lock poisoned"))?;
        rates.insert((rate.item_id, rate.usage_metric), rate);
        Ok(())
    }

    async fn insert_core_transaction(&self, tx: CoreTransaction) -> Result<(), StoreError> {
        let mut log = self
            .core_transactions
            .write()
            .map_err(|_| StoreError::backend("core log lock poisoned"))?;
        log.push(tx);
        Ok(())
    }

    async fn list_core_transactions(
        &self,
        item_id: ItemId,
    ) -> Result<Vec<CoreTransaction>, StoreError> {
        let log = self
            .core_transactions
            .read()
            .map_err(|_| StoreError::backend("core log lock poisoned"))?;
        Ok(log.iter().filter(|tx| tx.item_id == item_id).cloned().collect())
    }
}
