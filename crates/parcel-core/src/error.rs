use crate::state_machine::{PropertyEvent, PropertyStatus};

/// Core errors.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid state transition from {from} on {event:?}")]
    InvalidStateTransition {
        from: PropertyStatus,
        event: PropertyEvent,
    },

    #[error("validation failed: {0}")]
    ValidationError(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid basis points: {0} exceeds 10000")]
    InvalidBasisPoints(u16),

    #[error("invalid account identifier: {0}")]
    InvalidAccount(String),

    #[error("config error: {0}")]
    ConfigError(String),
}
