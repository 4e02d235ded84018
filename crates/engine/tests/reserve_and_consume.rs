//! End-to-end flow: reserve short, clamp, consume to zero.

use std::sync::Arc;

use stockhand_core::{ItemId, LineId};
use stockhand_engine::{AvailabilityEvaluator, ConsumptionTracker, ReservationCoordinator};
use stockhand_inventory::{
    InventoryItem, ItemClassification, LineItem, NewConsumption, UsageMetric,
};
use stockhand_store::{InMemoryStore, RemoteStore};

async fn seed_item(store: &InMemoryStore, quantity: i64) -> ItemId {
    let item = InventoryItem {
        id: ItemId::new(),
        name: "Fuel filter".to_string(),
        sku: "FF-10".to_string(),
        category: "filters".to_string(),
        classification: ItemClassification::Stocked,
        quantity,
        unit_price: 1899,
        core_charge: None,
    };
    let id = item.id;
    store.insert_item(item).await.unwrap();
    id
}

#[tokio::test]
async fn short_reservation_then_clamped_consumption_drains_stock() {
    stockhand_observability::init();

    let store = Arc::new(InMemoryStore::new());
    let item_id = seed_item(&store, 5).await;

    let evaluator = AvailabilityEvaluator::new(store.clone());
    let coordinator = ReservationCoordinator::new(evaluator.clone());
    let tracker = ConsumptionTracker::new(evaluator);

    // Requesting 7 against 5 on hand: reported short with the fallback
    // quantity, not failed.
    let line = LineItem {
        id: LineId::new(),
        item_id,
        quantity: 7,
        status: None,
    };
    let reservation = coordinator.reserve(std::slice::from_ref(&line)).await.unwrap();
    assert!(!reservation.success);
    let outcome = &reservation.lines[0];
    assert!(!outcome.available);
    assert_eq!(outcome.granted_quantity, 5);

    // Caller clamps to the granted quantity and consumes it over 100 miles.
    let record = tracker
        .record(NewConsumption {
            item_id,
            quantity_consumed: outcome.granted_quantity,
            usage_metric: UsageMetric::Distance,
            usage_value: 100.0,
            work_order_id: None,
            service_package_id: None,
        })
        .await
        .unwrap();

    assert_eq!(record.shortfall, None);
    assert_eq!(record.rate.average_consumption, 0.05);
    assert_eq!(store.get_item(item_id).await.unwrap().quantity, 0);

    // The stock is drained; the same request is now fully short.
    let reservation = coordinator.reserve(&[line]).await.unwrap();
    assert_eq!(reservation.lines[0].granted_quantity, 0);
}
