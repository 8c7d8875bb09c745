use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use parcel_core::{AccountId, Amount, BasisPoints, PropertyId, PropertyStatus};

/// Maximum number of royalty holders per property.
pub const MAX_ROYALTY_HOLDERS: usize = 3;

/// Maximum number of buyers per property.
pub const MAX_BUYERS: usize = 3;

/// Cap on the combined royalty percentage: 50.00%.
pub const MAX_TOTAL_ROYALTY_BPS: u16 = 5_000;

/// An identity entitled to a percentage of the sale. Every holder must
/// approve before any share payment is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoyaltyHolder {
    /// The holder's identity.
    pub holder: AccountId,
    /// Share of each sale payment, fixed at listing time.
    pub percentage_bps: BasisPoints,
    /// Whether this holder has approved the sale.
    pub approved: bool,
}

/// An identity assigned a fractional ownership percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buyer {
    /// The buyer's identity.
    pub buyer: AccountId,
    /// Fraction of the property assigned to this buyer.
    pub share_bps: BasisPoints,
    /// Share value paid so far (zero until settled).
    pub amount_paid: Amount,
    /// Whether this buyer's share is settled.
    pub has_paid: bool,
}

/// A listed property — the authoritative record the rest of the ledger
/// validates against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    /// Monotonically increasing identifier, immutable.
    pub id: PropertyId,
    /// Opaque metadata pointer. Resolution (IPFS, HTTP) is an external
    /// collaborator's job; the ledger never parses it.
    pub metadata_uri: String,
    /// Current owner. Reassigned exactly once, on full settlement.
    pub owner: AccountId,
    /// Total sale price. Mutable only while Listed.
    pub price: Amount,
    /// Lifecycle status.
    pub status: PropertyStatus,
    /// Royalty assignments, fixed at creation (≤ 3, sum ≤ 5000 bps).
    pub royalty_holders: Vec<RoyaltyHolder>,
    /// Buyer assignments (≤ 3, shares sum ≤ 10000 bps).
    pub buyers: Vec<Buyer>,
    /// Set by the ledger clock at creation.
    pub created_at: DateTime<Utc>,
    /// Set by the ledger clock on every mutation.
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Create a freshly listed property. Validation happens in the
    /// registry before this is called.
    pub(crate) fn new(
        id: PropertyId,
        owner: AccountId,
        metadata_uri: String,
        price: Amount,
        royalty_holders: Vec<RoyaltyHolder>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            metadata_uri,
            owner,
            price,
            status: PropertyStatus::Listed,
            royalty_holders,
            buyers: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Find a royalty holder by identity.
    pub fn royalty_holder(&self, account: &AccountId) -> Option<(usize, &RoyaltyHolder)> {
        self.royalty_holders
            .iter()
            .enumerate()
            .find(|(_, h)| &h.holder == account)
    }

    /// Find a buyer by identity.
    pub fn buyer(&self, account: &AccountId) -> Option<(usize, &Buyer)> {
        self.buyers
            .iter()
            .enumerate()
            .find(|(_, b)| &b.buyer == account)
    }

    /// Combined royalty percentage across all holders.
    pub fn total_royalty_bps(&self) -> u32 {
        self.royalty_holders
            .iter()
            .map(|h| h.percentage_bps.value() as u32)
            .sum()
    }

    /// Combined share percentage committed to buyers (paid or not).
    pub fn committed_share_bps(&self) -> u32 {
        self.buyers.iter().map(|b| b.share_bps.value() as u32).sum()
    }

    /// Combined share percentage of settled buyers.
    pub fn paid_share_bps(&self) -> u32 {
        self.buyers
            .iter()
            .filter(|b| b.has_paid)
            .map(|b| b.share_bps.value() as u32)
            .sum()
    }

    /// True iff every royalty holder has approved. Vacuously true when
    /// there are no holders.
    pub fn all_approved(&self) -> bool {
        self.royalty_holders.iter().all(|h| h.approved)
    }

    /// Bump the modification timestamp.
    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Flat property summary returned by detail queries — the shape
/// marketplace clients consume (sub-lists fetched by index).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDetails {
    pub id: PropertyId,
    pub metadata_uri: String,
    pub owner: AccountId,
    pub price: Amount,
    pub status: PropertyStatus,
    pub royalty_holder_count: usize,
    pub buyer_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Property> for PropertyDetails {
    fn from(p: &Property) -> Self {
        Self {
            id: p.id,
            metadata_uri: p.metadata_uri.clone(),
            owner: p.owner.clone(),
            price: p.price,
            status: p.status,
            royalty_holder_count: p.royalty_holders.len(),
            buyer_count: p.buyers.len(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
