//! `stockhand-cache` — optimistic client-side cache.
//!
//! **Responsibility:** keep every dependent view of the inventory collection
//! consistent while a remote write is in flight, and roll all of them back
//! cleanly when the write fails. Views are a closed interface registered with
//! the [`OptimisticManager`], which owns snapshotting, lock-step patch
//! application, reconciliation against the authoritative response, and
//! unconditional rollback.

pub mod optimistic;
pub mod status;
pub mod view;

pub use optimistic::OptimisticManager;
pub use status::{MutationKind, MutationPhase, StatusListener, StatusLog, StatusUpdate};
pub use view::{FlatView, ItemView, ViewChange, ViewRegistry, ViewSnapshot, WindowedView};
