//! Work-order line items and reservation outcomes.

use serde::{Deserialize, Serialize};

use stockhand_core::{ItemId, LineId};

/// Fulfillment status of a work-order line.
///
/// Only lines with no status or `InStock` participate in availability
/// checks; every other status is fulfilled externally and bypasses quantity
/// validation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineStatus {
    InStock,
    Ordered,
    SpecialOrder,
    Backordered,
}

/// One inventory line of a work order.
///
/// Holds a reference to an item, not ownership of it. The engine never
/// mutates a line during `reserve`; reacting to outcomes is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineId,
    pub item_id: ItemId,
    /// Requested quantity.
    pub quantity: i64,
    pub status: Option<LineStatus>,
}

impl LineItem {
    /// Whether this line participates in availability checks.
    pub fn is_evaluatable(&self) -> bool {
        matches!(self.status, None | Some(LineStatus::InStock))
    }
}

/// Per-line result of a reservation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationOutcome {
    pub line_id: LineId,
    pub requested: i64,
    pub available: bool,
    /// Quantity that can actually be committed, always <= `requested`.
    pub granted_quantity: i64,
    pub message: String,
}

/// Aggregate result of reserving all lines of one work order.
///
/// `success` holds only when every line is available; partial success is
/// surfaced line-by-line, never silently promoted to full success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub success: bool,
    pub lines: Vec<ReservationOutcome>,
}

impl Reservation {
    pub fn from_outcomes(lines: Vec<ReservationOutcome>) -> Self {
        let success = lines.iter().all(|outcome| outcome.available);
        Self { success, lines }
    }
}

/// Result of the single-line add/increment path.
///
/// When stock cannot cover the new total, the line is capped to the maximum
/// available quantity instead of being rejected — forward progress over
/// strict user intent. `clamped` marks the reduction so callers surface it as
/// a warning, never as a silent success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CappedQuantity {
    pub line_id: LineId,
    pub requested_total: i64,
    pub granted_total: i64,
    pub clamped: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_line(status: Option<LineStatus>) -> LineItem {
        LineItem {
            id: LineId::new(),
            item_id: ItemId::new(),
            quantity: 2,
            status,
        }
    }

    #[test]
    fn statusless_and_in_stock_lines_are_evaluatable() {
        assert!(test_line(None).is_evaluatable());
        assert!(test_line(Some(LineStatus::InStock)).is_evaluatable());
    }

    #[test]
    fn externally_fulfilled_lines_bypass_evaluation() {
        assert!(!test_line(Some(LineStatus::Ordered)).is_evaluatable());
        assert!(!test_line(Some(LineStatus::SpecialOrder)).is_evaluatable());
        assert!(!test_line(Some(LineStatus::Backordered)).is_evaluatable());
    }

    #[test]
    fn reservation_succeeds_only_when_every_line_is_available() {
        let ok = ReservationOutcome {
            line_id: LineId::new(),
            requested: 2,
            available: true,
            granted_quantity: 2,
            message: String::new(),
        };
        let short = ReservationOutcome {
            available: false,
            granted_quantity: 1,
            ..ok.clone()
        };

        assert!(Reservation::from_outcomes(vec![ok.clone()]).success);
        assert!(!Reservation::from_outcomes(vec![ok, short]).success);
    }
}
