//! Parcel core — shared types, the property status state machine, and
//! ledger configuration.
//!
//! Everything here is deliberately free of I/O: identities are compared,
//! never authenticated; amounts are abstract value movements bound to a
//! concrete rail by the hosting runtime.

pub mod config;
pub mod error;
pub mod state_machine;
pub mod types;

pub use config::{LedgerConfig, MAX_PURCHASE_FEE_BPS};
pub use error::CoreError;
pub use state_machine::{PropertyEvent, PropertyStateMachine, PropertyStatus};
pub use types::{AccountId, Amount, BasisPoints, PropertyId, TransactionId, BPS_FULL};
