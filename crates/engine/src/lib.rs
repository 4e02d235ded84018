//! `stockhand-engine` — availability, reservation, consumption, core charges.
//!
//! **Responsibility:** the read-decide-write services over the remote store:
//! availability checks (pure reads), best-effort line reservations, the
//! consumption tracker, and the append-only core-charge ledger.
//!
//! Concurrency model: operations are async tasks that suspend only at remote
//! reads/writes. There is no per-item locking; callers are expected to drive
//! one item sequentially. Two concurrent reservations for the same item can
//! both observe sufficient stock and over-commit — a documented limitation of
//! the source behavior, deliberately not papered over here.

pub mod availability;
pub mod consumption;
pub mod core_charge;
pub mod reservation;

pub use availability::AvailabilityEvaluator;
pub use consumption::ConsumptionTracker;
pub use core_charge::CoreChargeLedger;
pub use reservation::ReservationCoordinator;
