//! Fault-injecting store decorator.
//!
//! Wraps any [`RemoteStore`] and fails write operations once a configured
//! write budget is exhausted, while reads always pass through. Used to
//! exercise rollback paths deterministically.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;

use stockhand_core::{ConsumptionEventId, ItemId};
use stockhand_inventory::{
    ConsumptionEvent, ConsumptionRate, CoreTransaction, InventoryItem, ItemPatch, UsageMetric,
};

use crate::error::StoreError;
use crate::remote::RemoteStore;

/// Decorator that injects write failures.
#[derive(Debug)]
pub struct FaultStore<S> {
    inner: S,
    /// Writes remaining before injection starts. Negative means unlimited.
    write_budget: AtomicI64,
}

impl<S: RemoteStore> FaultStore<S> {
    /// Wrap `inner` with an unlimited write budget (no failures yet).
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            write_budget: AtomicI64::new(-1),
        }
    }

    /// Allow the next `budget` writes to succeed, then fail every write.
    pub fn fail_after_writes(&self, budget: i64) {
        self.write_budget.store(budget, Ordering::SeqCst);
    }

    /// Fail every write from now on.
    pub fn fail_writes(&self) {
        self.fail_after_writes(0);
    }

    /// Stop injecting failures.
    pub fn heal(&self) {
        self.write_budget.store(-1, Ordering::SeqCst);
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn spend_write(&self) -> Result<(), StoreError> {
        let budget = self.write_budget.load(Ordering::SeqCst);
        if budget < 0 {
            return Ok(());
        }
        if self.write_budget.fetch_sub(1, Ordering::SeqCst) <= 0 {
            tracing::warn!("write budget exhausted; injecting failure");
            return Err(StoreError::backend("injected write failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl<S: RemoteStore> RemoteStore for FaultStore<S> {
    async fn get_item(&self, id: ItemId) -> Result<InventoryItem, StoreError> {
        self.inner.get_item(id).await
    }

    async fn insert_item(&self, item: InventoryItem) -> Result<InventoryItem, StoreError> {
        self.spend_write()?;
        self.inner.insert_item(item).await
    }

    async fn update_item(
        &self,
        id: ItemId,
        patch: ItemPatch,
    ) -> Result<InventoryItem, StoreError> {
        self.spend_write()?;
        self.inner.update_item(id, patch).await
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), StoreError> {
        self.spend_write()?;
        self.inner.delete_item(id).await
    }

    async fn insert_consumption(&self, event: ConsumptionEvent) -> Result<(), StoreError> {
        self.spend_write()?;
        self.inner.insert_consumption(event).await
    }

    async fn delete_consumption(&self, id: ConsumptionEventId) -> Result<(), StoreError> {
        self.spend_write()?;
        self.inner.delete_consumption(id).await
    }

    async fn get_rate(
        &self,
        item_id: ItemId,
        metric: UsageMetric,
    ) -> Result<Option<ConsumptionRate>, StoreError> {
        self.inner.get_rate(item_id, metric).await
    }

    async fn upsert_rate(&self, rate: ConsumptionRate) -> Result<(), StoreError> {
        self.spend_write()?;
        self.inner.upsert_rate(rate).await
    }

    async fn insert_core_transaction(&self, tx: CoreTransaction) -> Result<(), StoreError> {
        self.spend_write()?;
        self.inner.insert_core_transaction(tx).await
    }

    async fn list_core_transactions(
        &self,
        item_id: ItemId,
    ) -> Result<Vec<CoreTransaction>, StoreError> {
        self.inner.list_core_transactions(item_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;
    use stockhand_inventory::ItemClassification;

    fn test_item() -> InventoryItem {
        InventoryItem {
            id: ItemId::new(),
            name: "Spark plug".to_string(),
            sku: "SP-1".to_string(),
            category: "ignition".to_string(),
            classification: ItemClassification::Stocked,
            quantity: 4,
            unit_price: 899,
            core_charge: None,
        }
    }

    #[tokio::test]
    async fn writes_fail_once_budget_is_spent() {
        let store = FaultStore::new(InMemoryStore::new());
        let item = store.insert_item(test_item()).await.unwrap();

        store.fail_after_writes(1);
        store
            .update_item(item.id, ItemPatch::quantity(3))
            .await
            .unwrap();
        let err = store
            .update_item(item.id, ItemPatch::quantity(2))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));

        // Reads keep working while writes are failing.
        assert_eq!(store.get_item(item.id).await.unwrap().quantity, 3);

        store.heal();
        store
            .update_item(item.id, ItemPatch::quantity(2))
            .await
            .unwrap();
    }
}
