//! Best-effort reservation of work-order lines.

use stockhand_core::{EngineError, EngineResult};
use stockhand_inventory::{CappedQuantity, LineItem, Reservation, ReservationOutcome};

use crate::availability::AvailabilityEvaluator;

/// Sequences availability checks for the lines of one work order.
///
/// This is **not** a two-phase commit: lines are decided independently and
/// already-decided lines are not revisited when a later line fails, because
/// the remote store offers no multi-row transaction here. The coordinator
/// only reports; it never mutates a line. Reacting to partial outcomes
/// (clamping, prompting) belongs to the caller.
#[derive(Clone)]
pub struct ReservationCoordinator {
    evaluator: AvailabilityEvaluator,
}

impl ReservationCoordinator {
    pub fn new(evaluator: AvailabilityEvaluator) -> Self {
        Self { evaluator }
    }

    /// Check every evaluatable line and aggregate the outcomes.
    ///
    /// Lines whose status marks them externally fulfilled bypass quantity
    /// validation and are reported available. The reservation as a whole
    /// succeeds only if every line is available.
    pub async fn reserve(&self, lines: &[LineItem]) -> EngineResult<Reservation> {
        let mut outcomes = Vec::with_capacity(lines.len());

        for line in lines {
            if !line.is_evaluatable() {
                outcomes.push(ReservationOutcome {
                    line_id: line.id,
                    requested: line.quantity,
                    available: true,
                    granted_quantity: line.quantity,
                    message: "externally fulfilled; quantity validation bypassed".to_string(),
                });
                continue;
            }

            let availability = self.evaluator.check(line.item_id, line.quantity).await?;
            let granted = if availability.available {
                line.quantity
            } else {
                availability.available_quantity.unwrap_or(0)
            };
            outcomes.push(ReservationOutcome {
                line_id: line.id,
                requested: line.quantity,
                available: availability.available,
                granted_quantity: granted,
                message: availability.message,
            });
        }

        let reservation = Reservation::from_outcomes(outcomes);
        if !reservation.success {
            tracing::warn!(
                lines = reservation.lines.len(),
                short = reservation
                    .lines
                    .iter()
                    .filter(|outcome| !outcome.available)
                    .count(),
                "reservation partially unavailable"
            );
        }
        Ok(reservation)
    }

    /// Single-line add/increment path.
    ///
    /// Checks availability for the **new total** (existing + delta). On
    /// insufficiency the line total is silently capped to the maximum
    /// available quantity instead of rejecting the add — forward progress
    /// over strict user intent, by policy. The cap is marked in the result
    /// and logged as a warning so it is never indistinguishable from full
    /// success.
    pub async fn cap_line_addition(
        &self,
        line: &LineItem,
        delta: i64,
    ) -> EngineResult<CappedQuantity> {
        if delta <= 0 {
            return Err(EngineError::validation(format!(
                "quantity delta must be positive, got {delta}"
            )));
        }

        let requested_total = line.quantity + delta;
        if !line.is_evaluatable() {
            return Ok(CappedQuantity {
                line_id: line.id,
                requested_total,
                granted_total: requested_total,
                clamped: false,
            });
        }

        let availability = self.evaluator.check(line.item_id, requested_total).await?;
        if availability.available {
            return Ok(CappedQuantity {
                line_id: line.id,
                requested_total,
                granted_total: requested_total,
                clamped: false,
            });
        }

        let granted_total = availability.available_quantity.unwrap_or(0);
        tracing::warn!(
            line_id = %line.id,
            requested_total,
            granted_total,
            "line addition capped to available stock"
        );
        Ok(CappedQuantity {
            line_id: line.id,
            requested_total,
            granted_total,
            clamped: true,
        })
    }
}
