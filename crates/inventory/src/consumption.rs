//! Consumption events and the running consumption-rate estimate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockhand_core::{ConsumptionEventId, Entity, ItemId, ServicePackageId, WorkOrderId};

/// Usage metric a consumption is measured against.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageMetric {
    Distance,
    Hours,
    Cycles,
}

/// Input for recording a consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewConsumption {
    pub item_id: ItemId,
    pub quantity_consumed: i64,
    pub usage_metric: UsageMetric,
    /// Usage accrued since the last consumption (e.g. miles driven, hours
    /// run). Must be > 0.
    pub usage_value: f64,
    pub work_order_id: Option<WorkOrderId>,
    pub service_package_id: Option<ServicePackageId>,
}

/// An immutable record of quantity used against a usage metric.
///
/// Never mutated after creation; deletion is the only other lifecycle
/// transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionEvent {
    pub id: ConsumptionEventId,
    pub item_id: ItemId,
    pub quantity_consumed: i64,
    pub usage_metric: UsageMetric,
    pub usage_value: f64,
    pub work_order_id: Option<WorkOrderId>,
    pub service_package_id: Option<ServicePackageId>,
    /// Creation time, immutable.
    pub consumed_at: DateTime<Utc>,
}

impl ConsumptionEvent {
    pub fn from_new(new: NewConsumption, consumed_at: DateTime<Utc>) -> Self {
        Self {
            id: ConsumptionEventId::new(),
            item_id: new.item_id,
            quantity_consumed: new.quantity_consumed,
            usage_metric: new.usage_metric,
            usage_value: new.usage_value,
            work_order_id: new.work_order_id,
            service_package_id: new.service_package_id,
            consumed_at,
        }
    }

    /// Consumption per unit of usage for this single event.
    pub fn instantaneous_rate(&self) -> f64 {
        self.quantity_consumed as f64 / self.usage_value
    }
}

impl Entity for ConsumptionEvent {
    type Id = ConsumptionEventId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Running consumption-rate estimate for one `(item, metric)` pair.
///
/// The average uses the smoothing `new_avg = (old_avg + instantaneous) / 2`:
/// an implicit half-weight per observation, not a windowed mean. Forecasting
/// consumers are calibrated to this exact decay, so it is reproduced
/// verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionRate {
    pub item_id: ItemId,
    pub usage_metric: UsageMetric,
    /// Most recent observation.
    pub consumption_per_unit: f64,
    /// Running estimate.
    pub average_consumption: f64,
    pub last_calculated_at: DateTime<Utc>,
}

impl ConsumptionRate {
    /// Seed a rate from its first observation: both fields start at
    /// `instantaneous`.
    pub fn first(
        item_id: ItemId,
        usage_metric: UsageMetric,
        instantaneous: f64,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            item_id,
            usage_metric,
            consumption_per_unit: instantaneous,
            average_consumption: instantaneous,
            last_calculated_at: at,
        }
    }

    /// Fold a new observation into the estimate.
    pub fn observe(&mut self, instantaneous: f64, at: DateTime<Utc>) {
        self.consumption_per_unit = instantaneous;
        self.average_consumption = (self.average_consumption + instantaneous) / 2.0;
        self.last_calculated_at = at;
    }
}

/// Outcome of recording one consumption.
///
/// `shortfall` is the portion of the consumed quantity that exceeded on-hand
/// stock (clamped, not an error); callers surface it as a warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionRecord {
    pub event: ConsumptionEvent,
    pub shortfall: Option<i64>,
    pub rate: ConsumptionRate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn first_observation_seeds_both_fields() {
        let rate = ConsumptionRate::first(ItemId::new(), UsageMetric::Distance, 0.05, Utc::now());
        assert_eq!(rate.consumption_per_unit, 0.05);
        assert_eq!(rate.average_consumption, 0.05);
    }

    #[test]
    fn observation_halves_toward_the_new_value() {
        let mut rate = ConsumptionRate::first(ItemId::new(), UsageMetric::Hours, 0.2, Utc::now());
        let at = Utc::now();
        rate.observe(0.4, at);
        assert_eq!(rate.consumption_per_unit, 0.4);
        assert_eq!(rate.average_consumption, (0.2 + 0.4) / 2.0);
        assert_eq!(rate.last_calculated_at, at);
    }

    proptest! {
        /// The update is exactly (a + b) / 2, for any prior average and observation.
        #[test]
        fn smoothing_is_exact_midpoint(a in 0.0f64..1_000.0, b in 0.0f64..1_000.0) {
            let mut rate = ConsumptionRate::first(ItemId::new(), UsageMetric::Cycles, a, Utc::now());
            rate.observe(b, Utc::now());
            prop_assert_eq!(rate.average_consumption, (a + b) / 2.0);
            prop_assert_eq!(rate.consumption_per_unit, b);
        }
    }
}
