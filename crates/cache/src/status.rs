//! Transient mutation status, observable by the UI layer.
//!
//! Every mutation emits `Pending` before anything is applied and exactly one
//! terminal phase afterwards. The pending phase is part of the contract:
//! callers render it, and tests assert on the transition order.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use stockhand_core::ItemId;

/// Which mutation a status update belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MutationKind {
    Update,
    Delete,
    BulkUpdate,
}

/// Phase of one mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationPhase {
    Pending,
    Succeeded,
    Failed { error: String },
}

/// One status emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub kind: MutationKind,
    pub item_ids: Vec<ItemId>,
    pub phase: MutationPhase,
}

/// Observer of mutation status.
pub trait StatusListener: Send + Sync {
    fn on_status(&self, update: &StatusUpdate);
}

/// Recording listener: keeps every emission in order.
#[derive(Debug, Default)]
pub struct StatusLog {
    entries: Mutex<Vec<StatusUpdate>>,
}

impl StatusLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<StatusUpdate> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Just the phases, in emission order.
    pub fn phases(&self) -> Vec<MutationPhase> {
        self.entries().into_iter().map(|e| e.phase).collect()
    }
}

impl StatusListener for StatusLog {
    fn on_status(&self, update: &StatusUpdate) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(update.clone());
        }
    }
}
