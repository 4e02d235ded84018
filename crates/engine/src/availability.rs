//! Availability checks against current on-hand quantity.

use std::sync::Arc;

use stockhand_core::{EngineError, EngineResult, ItemId};
use stockhand_inventory::{Availability, InventoryItem, availability};
use stockhand_store::RemoteStore;

/// Read-only availability service.
///
/// Pure read: safe to call speculatively and repeatedly; never mutates the
/// store.
#[derive(Clone)]
pub struct AvailabilityEvaluator {
    store: Arc<dyn RemoteStore>,
}

impl AvailabilityEvaluator {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    /// Decide whether `requested` units of the item can be committed.
    ///
    /// An unknown item is `NotFound` — a different failure from insufficient
    /// quantity, which is a structured `Availability` with
    /// `available = false`.
    pub async fn check(&self, item_id: ItemId, requested: i64) -> EngineResult<Availability> {
        if requested <= 0 {
            return Err(EngineError::validation(format!(
                "requested quantity must be positive, got {requested}"
            )));
        }

        let item = self.fetch_item(item_id).await?;
        Ok(availability::evaluate(&item, requested))
    }

    /// Item read shared with the consumption tracker (the same data path
    /// decrements quantity).
    pub(crate) async fn fetch_item(&self, item_id: ItemId) -> EngineResult<InventoryItem> {
        self.store
            .get_item(item_id)
            .await
            .map_err(|e| e.into_read_error())
    }

    pub(crate) fn store(&self) -> &Arc<dyn RemoteStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockhand_inventory::ItemClassification;
    use stockhand_store::InMemoryStore;

    async fn seeded(quantity: i64, classification: ItemClassification) -> (AvailabilityEvaluator, ItemId) {
        let store = Arc::new(InMemoryStore::new());
        let item = InventoryItem {
            id: ItemId::new(),
            name: "Nozzle".to_string(),
            sku: "NZ-3".to_string(),
            category: "power-washing".to_string(),
            classification,
            quantity,
            unit_price: 2599,
            core_charge: None,
        };
        let id = item.id;
        store.insert_item(item).await.unwrap();
        (AvailabilityEvaluator::new(store), id)
    }

    #[tokio::test]
    async fn sufficient_quantity_is_available() {
        let (evaluator, id) = seeded(5, ItemClassification::Stocked).await;
        let availability = evaluator.check(id, 5).await.unwrap();
        assert!(availability.available);
    }

    #[tokio::test]
    async fn insufficiency_is_a_result_not_an_error() {
        let (evaluator, id) = seeded(5, ItemClassification::Stocked).await;
        let availability = evaluator.check(id, 7).await.unwrap();
        assert!(!availability.available);
        assert_eq!(availability.available_quantity, Some(5));
    }

    #[tokio::test]
    async fn unknown_item_is_not_found() {
        let (evaluator, _) = seeded(5, ItemClassification::Stocked).await;
        let err = evaluator.check(ItemId::new(), 1).await.unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
    }

    #[tokio::test]
    async fn non_positive_request_is_a_validation_error() {
        let (evaluator, id) = seeded(5, ItemClassification::Stocked).await;
        let err = evaluator.check(id, 0).await.unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[tokio::test]
    async fn special_order_items_are_always_available() {
        let (evaluator, id) = seeded(0, ItemClassification::SpecialOrder).await;
        assert!(evaluator.check(id, 50).await.unwrap().available);
    }
}
