//! Parcel Marketplace Ledger
//!
//! The authoritative settlement engine behind a fractional real-estate
//! marketplace: property listings, multi-party royalty approval, buyer
//! share assignment and payment, fee treasury, and derived statistics.
//!
//! The ledger is a strictly serialized state machine — every command is
//! atomic and all-or-nothing. Rendering, metadata resolution, wallets,
//! and identity verification live outside and talk to it through the
//! [`MarketLedger`] command/query surface.

pub mod accounts;
pub mod error;
pub mod ledger;
pub mod property;
pub mod registry;
pub mod royalty;
pub mod sale;
pub mod stats;
pub mod transactions;
pub mod treasury;

pub use accounts::AccountBook;
pub use error::LedgerError;
pub use ledger::MarketLedger;
pub use property::{
    Buyer, Property, PropertyDetails, RoyaltyHolder, MAX_BUYERS, MAX_ROYALTY_HOLDERS,
    MAX_TOTAL_ROYALTY_BPS,
};
pub use registry::PropertyRegistry;
pub use sale::{PaymentQuote, PurchaseReceipt, SettlementPlan};
pub use stats::ContractStatistics;
pub use transactions::{Transaction, TransactionKind, TransactionLog};
pub use treasury::Treasury;
