use parcel_core::Amount;

use crate::error::LedgerError;

/// Accumulated fee balance held by the ledger.
///
/// The balance only grows through fee collection and only shrinks through
/// an admin withdrawal that drains it completely.
#[derive(Debug)]
pub struct Treasury {
    balance: Amount,
}

impl Default for Treasury {
    fn default() -> Self {
        Self::new()
    }
}

impl Treasury {
    pub fn new() -> Self {
        Self {
            balance: Amount::ZERO,
        }
    }

    /// Current balance.
    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Credit a collected fee.
    pub fn credit(&mut self, amount: Amount) -> Result<(), LedgerError> {
        self.balance = self.balance.checked_add(amount)?;
        Ok(())
    }

    /// Drain the entire balance. Fail-fast on an empty treasury so a
    /// double withdrawal is visible to the caller.
    pub fn withdraw_all(&mut self) -> Result<Amount, LedgerError> {
        if self.balance.is_zero() {
            return Err(LedgerError::NothingToWithdraw);
        }
        let amount = self.balance;
        self.balance = Amount::ZERO;
        Ok(amount)
    }
}
