use serde::{Deserialize, Serialize};

use parcel_core::PropertyStatus;

use crate::registry::PropertyRegistry;
use crate::transactions::TransactionLog;

/// Derived read-only aggregates over the registry and transaction log.
///
/// Recomputed on every query from a consistent snapshot — never persisted,
/// never authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractStatistics {
    pub total_properties: u64,
    pub listed_properties: u64,
    pub sold_properties: u64,
    pub total_transactions: u64,
}

/// Scan the authoritative state and compute the aggregates.
pub fn compute(registry: &PropertyRegistry, log: &TransactionLog) -> ContractStatistics {
    let mut listed = 0u64;
    let mut sold = 0u64;
    for property in registry.iter() {
        match property.status {
            PropertyStatus::Listed => listed += 1,
            PropertyStatus::Sold => sold += 1,
            _ => {}
        }
    }

    ContractStatistics {
        total_properties: registry.len() as u64,
        listed_properties: listed,
        sold_properties: sold,
        total_transactions: log.len() as u64,
    }
}
