use dashmap::DashMap;
use uuid::Uuid;

use parcel_core::{AccountId, Amount, PropertyId};

/// An individual entry in the double-entry book.
#[derive(Debug, Clone)]
pub struct BookEntry {
    /// Unique ID for this entry (UUID v7 — time-ordered).
    pub id: Uuid,
    /// The account whose balance is affected.
    pub account: AccountId,
    /// Positive = credit, negative = debit.
    pub delta: i128,
    /// Property the movement was settled against, if any.
    pub property_id: Option<PropertyId>,
}

/// In-memory double-entry book of every value movement the ledger performs.
///
/// This is the in-process binding of the abstract payment rail: a real
/// deployment would replace it with native token transfers or a bank
/// ledger, but the movements it records are the same.
#[derive(Debug, Default)]
pub struct AccountBook {
    entries: DashMap<Uuid, BookEntry>,
    balances: DashMap<String, i128>,
}

impl AccountBook {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            balances: DashMap::new(),
        }
    }

    /// Signed balance for an account. Accounts that only ever paid out
    /// go negative — the attached value backing them lives outside the
    /// ledger.
    pub fn balance_of(&self, account: &AccountId) -> i128 {
        self.balances
            .get(account.as_str())
            .map(|v| *v)
            .unwrap_or(0)
    }

    /// Record a double-entry pair: debit `from`, credit `to`.
    pub fn record_transfer(
        &self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
        property_id: Option<PropertyId>,
    ) {
        let value = amount.value() as i128;

        let debit_id = Uuid::now_v7();
        self.entries.insert(
            debit_id,
            BookEntry {
                id: debit_id,
                account: from.clone(),
                delta: -value,
                property_id,
            },
        );

        let credit_id = Uuid::now_v7();
        self.entries.insert(
            credit_id,
            BookEntry {
                id: credit_id,
                account: to.clone(),
                delta: value,
                property_id,
            },
        );

        self.balances
            .entry(from.as_str().to_string())
            .and_modify(|b| *b -= value)
            .or_insert(-value);
        self.balances
            .entry(to.as_str().to_string())
            .and_modify(|b| *b += value)
            .or_insert(value);
    }

    /// Number of entries recorded (two per transfer).
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}
