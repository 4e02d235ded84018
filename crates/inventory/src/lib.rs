//! Inventory domain model and rules.
//!
//! This crate contains the engine's business rules as deterministic domain
//! logic (no IO, no storage, no async): item quantities and their clamping,
//! availability decisions, reservation outcomes, the consumption-rate
//! smoothing formula, and core-charge balance derivation.

pub mod availability;
pub mod consumption;
pub mod core_charge;
pub mod item;
pub mod line;

pub use availability::Availability;
pub use consumption::{
    ConsumptionEvent, ConsumptionRate, ConsumptionRecord, NewConsumption, UsageMetric,
};
pub use core_charge::{CoreBalances, CoreTransaction, CoreTransactionKind};
pub use item::{InventoryItem, ItemClassification, ItemPatch};
pub use line::{CappedQuantity, LineItem, LineStatus, Reservation, ReservationOutcome};
