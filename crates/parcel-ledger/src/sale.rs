//! Share sale: buyer assignment, payment quoting, and settlement math.
//!
//! Fee policy: the purchase fee is additive on top of the share value —
//! the buyer pays `share_value + fee`, the treasury keeps the fee, and the
//! share value is split between the royalty holders and the seller at the
//! moment of payment.

use serde::{Deserialize, Serialize};

use parcel_core::{AccountId, Amount, BasisPoints, PropertyId};

use crate::error::LedgerError;
use crate::property::{Property, MAX_BUYERS};

/// What a buyer owes for their share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentQuote {
    /// `price * share_bps / 10000`.
    pub share_value: Amount,
    /// `share_value * purchase_fee_bps / 10000`, kept by the treasury.
    pub fee: Amount,
    /// `share_value + fee` — the minimum attached payment.
    pub total_due: Amount,
}

/// The full value split for one share payment, computed up front so the
/// ledger can apply it atomically after all preconditions pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementPlan {
    /// Quote the payment is validated against.
    pub quote: PaymentQuote,
    /// Royalty payouts, one per holder with a non-zero cut.
    pub royalty_cuts: Vec<(AccountId, Amount)>,
    /// What the seller receives: share value minus the royalty cuts.
    pub seller_proceeds: Amount,
}

/// Receipt for a settled share payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub property_id: PropertyId,
    pub buyer: AccountId,
    pub share_bps: BasisPoints,
    /// Share value credited to seller + royalty holders.
    pub share_value: Amount,
    /// Fee credited to the treasury.
    pub fee: Amount,
    /// The seller at the time of payment.
    pub seller: AccountId,
    /// Royalty payouts made as part of this payment.
    pub royalty_cuts: Vec<(AccountId, Amount)>,
    /// Whether this payment completed the sale (100% share settled).
    pub finalized: bool,
}

/// Validate a new buyer assignment against the property's current buyer
/// list. Does not mutate.
pub fn validate_new_buyer(
    property: &Property,
    buyer: &AccountId,
    share_bps: BasisPoints,
) -> Result<(), LedgerError> {
    if property.buyers.len() >= MAX_BUYERS {
        return Err(LedgerError::InvalidInput(format!(
            "at most {} buyers allowed per property",
            MAX_BUYERS
        )));
    }
    if share_bps.is_zero() {
        return Err(LedgerError::InvalidInput(
            "share percentage must be greater than zero".into(),
        ));
    }
    if property.buyer(buyer).is_some() {
        return Err(LedgerError::InvalidInput(format!(
            "{} is already a buyer for {}",
            buyer, property.id
        )));
    }
    let new_total = property.committed_share_bps() + share_bps.value() as u32;
    if new_total > parcel_core::BPS_FULL as u32 {
        return Err(LedgerError::InvalidInput(format!(
            "combined buyer share of {} bps exceeds 100%",
            new_total
        )));
    }
    Ok(())
}

/// Quote the payment owed by the buyer at `buyer_index`.
pub fn payment_quote(
    property: &Property,
    buyer_index: usize,
    purchase_fee_bps: BasisPoints,
) -> Result<PaymentQuote, LedgerError> {
    let buyer = property.buyers.get(buyer_index).ok_or_else(|| {
        LedgerError::NotFound(format!(
            "no buyer at index {} for {}",
            buyer_index, property.id
        ))
    })?;

    let share_value = property.price.bps_portion(buyer.share_bps)?;
    let fee = share_value.bps_portion(purchase_fee_bps)?;
    let total_due = share_value.checked_add(fee)?;

    Ok(PaymentQuote {
        share_value,
        fee,
        total_due,
    })
}

/// Compute the full settlement split for the buyer at `buyer_index`.
pub fn settlement_plan(
    property: &Property,
    buyer_index: usize,
    purchase_fee_bps: BasisPoints,
) -> Result<SettlementPlan, LedgerError> {
    let quote = payment_quote(property, buyer_index, purchase_fee_bps)?;

    let mut royalty_cuts = Vec::with_capacity(property.royalty_holders.len());
    let mut total_cut = Amount::ZERO;
    for holder in &property.royalty_holders {
        let cut = quote.share_value.bps_portion(holder.percentage_bps)?;
        if !cut.is_zero() {
            total_cut = total_cut.checked_add(cut)?;
            royalty_cuts.push((holder.holder.clone(), cut));
        }
    }

    // Royalty bps sum is capped at 5000, so the cuts can never exceed the
    // share value; the subtraction still goes through checked math.
    let seller_proceeds = quote.share_value.checked_sub(total_cut)?;

    Ok(SettlementPlan {
        quote,
        royalty_cuts,
        seller_proceeds,
    })
}
