use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use parcel_core::{AccountId, Amount, PropertyId, TransactionId};

/// What kind of value movement a transaction records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Listing fee paid by the seller at listing time.
    Listing,
    /// A buyer settling their share.
    Purchase,
    /// Royalty payout made as part of a share settlement.
    RoyaltyPayment,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Listing => write!(f, "Listing"),
            Self::Purchase => write!(f, "Purchase"),
            Self::RoyaltyPayment => write!(f, "RoyaltyPayment"),
        }
    }
}

/// An append-only log entry, emitted as a side effect of listing and sale
/// operations. Observational — never authoritative, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub property_id: PropertyId,
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Amount,
    pub timestamp: DateTime<Utc>,
    pub kind: TransactionKind,
}

/// Append-only transaction log with monotonically increasing ids.
#[derive(Debug, Default)]
pub struct TransactionLog {
    entries: Vec<Transaction>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry, stamping it with the next id and the current time.
    pub fn append(
        &mut self,
        property_id: PropertyId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
        kind: TransactionKind,
    ) -> TransactionId {
        let id = TransactionId(self.entries.len() as u64 + 1);
        self.entries.push(Transaction {
            id,
            property_id,
            from,
            to,
            amount,
            timestamp: Utc::now(),
            kind,
        });
        id
    }

    /// Look up a transaction by id.
    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        // Ids are 1-based positions in the append-only vector.
        self.entries.get(id.0.checked_sub(1)? as usize)
    }

    /// Ids of transactions touching a property, oldest first, paginated.
    pub fn by_property(
        &self,
        property_id: PropertyId,
        limit: usize,
        offset: usize,
    ) -> Vec<TransactionId> {
        self.entries
            .iter()
            .filter(|tx| tx.property_id == property_id)
            .map(|tx| tx.id)
            .skip(offset)
            .take(limit)
            .collect()
    }

    /// Total number of transactions ever recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
