//! Inventory items and sparse patches against them.

use serde::{Deserialize, Serialize};

use stockhand_core::{Entity, ItemId};

/// How an item participates in stock tracking.
///
/// Only `Stocked` items are counted against on-hand quantity; the other two
/// classifications are fulfilled externally and bypass availability checks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemClassification {
    Stocked,
    SpecialOrder,
    NonTracked,
}

impl ItemClassification {
    /// Whether on-hand quantity is consulted for this classification.
    pub fn is_tracked(self) -> bool {
        matches!(self, ItemClassification::Stocked)
    }
}

/// An inventory item as held in the cache views and the remote store.
///
/// Invariant: `quantity` never goes negative through engine operations; any
/// computation that would drive it below zero clamps to zero and reports the
/// shortfall (see [`InventoryItem::consume`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub classification: ItemClassification,
    /// Current on-hand quantity, always >= 0.
    pub quantity: i64,
    /// Unit price in the smallest currency unit (e.g. cents).
    pub unit_price: i64,
    /// Refundable surcharge for returnable core parts, if any.
    pub core_charge: Option<i64>,
}

impl InventoryItem {
    /// Decrement on-hand quantity by `consumed`, clamping at zero.
    ///
    /// Returns the shortfall: the portion of `consumed` that was not covered
    /// by on-hand stock. A shortfall is not an error; callers surface it as a
    /// warning (never as a silent full success).
    pub fn consume(&mut self, consumed: i64) -> i64 {
        let shortfall = (consumed - self.quantity).max(0);
        self.quantity = (self.quantity - consumed).max(0);
        shortfall
    }
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Sparse patch against an [`InventoryItem`]. Unset fields are left as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub classification: Option<ItemClassification>,
    pub quantity: Option<i64>,
    pub unit_price: Option<i64>,
    pub core_charge: Option<Option<i64>>,
}

impl ItemPatch {
    /// Patch that only sets the on-hand quantity.
    pub fn quantity(quantity: i64) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::default()
        }
    }

    /// Apply this patch to an item in place.
    ///
    /// Quantity is floored at zero so a patch can never produce negative
    /// stock in a view, whatever the caller supplied.
    pub fn apply_to(&self, item: &mut InventoryItem) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(sku) = &self.sku {
            item.sku = sku.clone();
        }
        if let Some(category) = &self.category {
            item.category = category.clone();
        }
        if let Some(classification) = self.classification {
            item.classification = classification;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity.max(0);
        }
        if let Some(unit_price) = self.unit_price {
            item.unit_price = unit_price;
        }
        if let Some(core_charge) = self.core_charge {
            item.core_charge = core_charge;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_item(quantity: i64) -> InventoryItem {
        InventoryItem {
            id: ItemId::new(),
            name: "Oil filter".to_string(),
            sku: "OF-100".to_string(),
            category: "filters".to_string(),
            classification: ItemClassification::Stocked,
            quantity,
            unit_price: 1299,
            core_charge: None,
        }
    }

    #[test]
    fn consume_within_stock_has_no_shortfall() {
        let mut item = test_item(5);
        let shortfall = item.consume(3);
        assert_eq!(item.quantity, 2);
        assert_eq!(shortfall, 0);
    }

    #[test]
    fn consume_past_stock_clamps_to_zero_and_reports_shortfall() {
        let mut item = test_item(5);
        let shortfall = item.consume(8);
        assert_eq!(item.quantity, 0);
        assert_eq!(shortfall, 3);
    }

    #[test]
    fn patch_applies_only_set_fields() {
        let mut item = test_item(5);
        let patch = ItemPatch {
            name: Some("Oil filter XL".to_string()),
            ..ItemPatch::default()
        };
        patch.apply_to(&mut item);
        assert_eq!(item.name, "Oil filter XL");
        assert_eq!(item.sku, "OF-100");
        assert_eq!(item.quantity, 5);
    }

    #[test]
    fn patch_floors_quantity_at_zero() {
        let mut item = test_item(5);
        ItemPatch::quantity(-2).apply_to(&mut item);
        assert_eq!(item.quantity, 0);
    }

    proptest! {
        /// Quantity never goes negative, whatever sequence of consumptions is applied.
        #[test]
        fn quantity_stays_non_negative(start in 0i64..10_000, consumed in proptest::collection::vec(0i64..5_000, 0..16)) {
            let mut item = test_item(start);
            for c in consumed {
                item.consume(c);
                prop_assert!(item.quantity >= 0);
            }
        }
    }
}
