//! Availability decisions: errors-as-values on the reservation hot path.

use serde::{Deserialize, Serialize};

use crate::item::InventoryItem;

/// Fulfillment decision for a requested quantity of one item.
///
/// Insufficiency is a structured result, not an error: `available_quantity`
/// carries the current on-hand count (possibly 0) so callers can offer a
/// reduced-quantity fallback instead of a hard failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub available: bool,
    pub available_quantity: Option<i64>,
    pub message: String,
}

impl Availability {
    fn granted(message: impl Into<String>) -> Self {
        Self {
            available: true,
            available_quantity: None,
            message: message.into(),
        }
    }
}

/// Decide whether `requested` units of `item` can be committed.
///
/// Pure function: no side effects, safe to call speculatively and repeatedly.
/// Items whose classification exempts them from tracking are always
/// available; their on-hand quantity is not consulted.
pub fn evaluate(item: &InventoryItem, requested: i64) -> Availability {
    if !item.classification.is_tracked() {
        return Availability::granted(format!(
            "{} is not stock-tracked and is fulfilled externally",
            item.name
        ));
    }

    if requested <= item.quantity {
        Availability::granted(format!("{} in stock", item.quantity))
    } else {
        Availability {
            available: false,
            available_quantity: Some(item.quantity),
            message: format!("only {} of {} requested available", item.quantity, requested),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemClassification, ItemPatch};
    use stockhand_core::ItemId;

    fn test_item(classification: ItemClassification, quantity: i64) -> InventoryItem {
        let mut item = InventoryItem {
            id: ItemId::new(),
            name: "Impeller".to_string(),
            sku: "IMP-9".to_string(),
            category: "marine".to_string(),
            classification,
            quantity: 0,
            unit_price: 4500,
            core_charge: None,
        };
        ItemPatch::quantity(quantity).apply_to(&mut item);
        item
    }

    #[test]
    fn sufficient_stock_is_available() {
        let item = test_item(ItemClassification::Stocked, 5);
        let availability = evaluate(&item, 5);
        assert!(availability.available);
        assert_eq!(availability.available_quantity, None);
    }

    #[test]
    fn insufficient_stock_reports_current_quantity() {
        let item = test_item(ItemClassification::Stocked, 5);
        let availability = evaluate(&item, 7);
        assert!(!availability.available);
        assert_eq!(availability.available_quantity, Some(5));
    }

    #[test]
    fn zero_stock_reports_zero_not_an_error() {
        let item = test_item(ItemClassification::Stocked, 0);
        let availability = evaluate(&item, 1);
        assert!(!availability.available);
        assert_eq!(availability.available_quantity, Some(0));
    }

    #[test]
    fn special_order_items_bypass_quantity() {
        let item = test_item(ItemClassification::SpecialOrder, 0);
        let availability = evaluate(&item, 100);
        assert!(availability.available);
        assert_eq!(availability.available_quantity, None);
    }

    #[test]
    fn non_tracked_items_bypass_quantity() {
        let item = test_item(ItemClassification::NonTracked, 0);
        assert!(evaluate(&item, 3).available);
    }
}
