//! Store error model and mapping onto engine errors.

use thiserror::Error;

use stockhand_core::EngineError;

/// Failure at the remote store boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("store backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Map a read-path failure onto the engine taxonomy.
    ///
    /// Missing rows stay `NotFound` (fatal to the specific operation, never
    /// retried); everything else becomes a remote read error.
    pub fn into_read_error(self) -> EngineError {
        match self {
            StoreError::NotFound { entity, id } => {
                EngineError::not_found(format!("{entity} {id}"))
            }
            other => EngineError::remote_read(other.to_string()),
        }
    }

    /// Map a write-path failure onto the engine taxonomy.
    ///
    /// Callers run their rollback procedure before propagating this.
    pub fn into_write_error(self) -> EngineError {
        match self {
            StoreError::NotFound { entity, id } => {
                EngineError::not_found(format!("{entity} {id}"))
            }
            other => EngineError::remote_write(other.to_string()),
        }
    }
}
