//! `stockhand-core` — foundation building blocks for the inventory engine.
//!
//! This crate contains **pure** primitives shared by every other crate in the
//! workspace: strongly-typed identifiers, the engine error model, and the
//! entity trait. No IO, no storage, no async.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{EngineError, EngineResult};
pub use id::{
    ConsumptionEventId, CoreId, CoreTransactionId, ItemId, LineId, ServicePackageId, WorkOrderId,
};
