//! Consumption tracking: event, quantity decrement, rate update.

use chrono::Utc;

use stockhand_core::{ConsumptionEventId, EngineError, EngineResult, ItemId};
use stockhand_inventory::{
    ConsumptionEvent, ConsumptionRate, ConsumptionRecord, ItemPatch, NewConsumption, UsageMetric,
};
use stockhand_store::RemoteStore;

use crate::availability::AvailabilityEvaluator;

/// Records consumption events and maintains per-(item, metric) rates.
///
/// The three effects of [`ConsumptionTracker::record`] — event persisted,
/// quantity decremented, rate updated — are one logical operation from the
/// caller's point of view, but the store gives no atomicity across them. A
/// failure after the event insert leaves a recognized inconsistency window;
/// callers re-fetch to reconcile.
#[derive(Clone)]
pub struct ConsumptionTracker {
    evaluator: AvailabilityEvaluator,
}

impl ConsumptionTracker {
    pub fn new(evaluator: AvailabilityEvaluator) -> Self {
        Self { evaluator }
    }

    /// Record one consumption.
    ///
    /// Over-consumption is not an error: quantity clamps at zero and the
    /// shortfall is reported in the record (and logged as a warning). A
    /// non-positive `usage_value` or quantity is an input error.
    pub async fn record(&self, new: NewConsumption) -> EngineResult<ConsumptionRecord> {
        if new.quantity_consumed <= 0 {
            return Err(EngineError::validation(format!(
                "quantity consumed must be positive, got {}",
                new.quantity_consumed
            )));
        }
        if new.usage_value <= 0.0 {
            return Err(EngineError::validation(format!(
                "usage value must be positive, got {}",
                new.usage_value
            )));
        }

        // Read through the evaluator's data path; quantity is decremented on
        // the same row below.
        let mut item = self.evaluator.fetch_item(new.item_id).await?;
        let store = self.evaluator.store();

        let event = ConsumptionEvent::from_new(new, Utc::now());
        store
            .insert_consumption(event.clone())
            .await
            .map_err(|e| e.into_write_error())?;

        let shortfall = item.consume(event.quantity_consumed);
        if shortfall > 0 {
            tracing::warn!(
                item_id = %item.id,
                shortfall,
                "consumption exceeded on-hand stock; quantity clamped to zero"
            );
        }
        store
            .update_item(item.id, ItemPatch::quantity(item.quantity))
            .await
            .map_err(|e| e.into_write_error())?;

        let instantaneous = event.instantaneous_rate();
        let rate = match store
            .get_rate(event.item_id, event.usage_metric)
            .await
            .map_err(|e| e.into_read_error())?
        {
            Some(mut rate) => {
                rate.observe(instantaneous, event.consumed_at);
                rate
            }
            None => ConsumptionRate::first(
                event.item_id,
                event.usage_metric,
                instantaneous,
                event.consumed_at,
            ),
        };
        store
            .upsert_rate(rate.clone())
            .await
            .map_err(|e| e.into_write_error())?;

        tracing::info!(
            item_id = %event.item_id,
            quantity = event.quantity_consumed,
            average = rate.average_consumption,
            "consumption recorded"
        );

        Ok(ConsumptionRecord {
            event,
            shortfall: (shortfall > 0).then_some(shortfall),
            rate,
        })
    }

    /// Delete a consumption event.
    ///
    /// Deletion is the event's only lifecycle transition besides creation.
    /// The rate is not rewound: the smoothing average is not invertible from
    /// the stored pair.
    pub async fn delete(&self, id: ConsumptionEventId) -> EngineResult<()> {
        self.evaluator
            .store()
            .delete_consumption(id)
            .await
            .map_err(|e| e.into_write_error())
    }

    /// Current rate estimate for one `(item, metric)` pair, if any.
    pub async fn rate(
        &self,
        item_id: ItemId,
        metric: UsageMetric,
    ) -> EngineResult<Option<ConsumptionRate>> {
        self.evaluator
            .store()
            .get_rate(item_id, metric)
            .await
            .map_err(|e| e.into_read_error())
    }
}
