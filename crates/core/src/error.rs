//! Engine error model.

use thiserror::Error;

/// Result type used across the engine.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine-level error.
///
/// Insufficient availability is deliberately **not** represented here: on the
/// reservation hot path it is a structured result (`Availability`), not an
/// error. Clamped quantities are warning-bearing successes, also not errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A value failed validation (e.g. non-positive quantity).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An engine invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A referenced item/event/rate does not exist. Fatal to the specific
    /// operation, never retried automatically.
    #[error("not found: {0}")]
    NotFound(String),

    /// A remote read failed. Propagates immediately to the caller.
    #[error("remote read failed: {0}")]
    RemoteRead(String),

    /// A remote write failed. Always drives rollback before propagating.
    #[error("remote write failed: {0}")]
    RemoteWrite(String),
}

impl EngineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn remote_read(msg: impl Into<String>) -> Self {
        Self::RemoteRead(msg.into())
    }

    pub fn remote_write(msg: impl Into<String>) -> Self {
        Self::RemoteWrite(msg.into())
    }
}
