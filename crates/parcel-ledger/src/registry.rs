use std::collections::BTreeMap;

use parcel_core::{AccountId, Amount, BasisPoints, PropertyId};

use crate::error::LedgerError;
use crate::property::{Property, RoyaltyHolder, MAX_ROYALTY_HOLDERS, MAX_TOTAL_ROYALTY_BPS};

/// Arena of property records, keyed by their monotonically increasing id.
///
/// The registry is the leaf of the ledger: every other component references
/// a property here and validates against its current status.
#[derive(Debug)]
pub struct PropertyRegistry {
    properties: BTreeMap<PropertyId, Property>,
    next_id: PropertyId,
}

impl PropertyRegistry {
    /// Create an empty registry. Ids start at 1, matching the contract
    /// convention where 0 means "no property".
    pub fn new() -> Self {
        Self {
            properties: BTreeMap::new(),
            next_id: PropertyId(1),
        }
    }

    /// Validate listing inputs without touching any state.
    ///
    /// Called before the listing fee is charged so that a rejected listing
    /// leaves the treasury untouched.
    pub fn validate_listing(
        &self,
        metadata_uri: &str,
        price: Amount,
        royalty_holders: &[(AccountId, BasisPoints)],
    ) -> Result<(), LedgerError> {
        if metadata_uri.trim().is_empty() {
            return Err(LedgerError::InvalidInput(
                "metadata URI must not be empty".into(),
            ));
        }
        if price.is_zero() {
            return Err(LedgerError::InvalidInput(
                "price must be greater than zero".into(),
            ));
        }
        if royalty_holders.len() > MAX_ROYALTY_HOLDERS {
            return Err(LedgerError::InvalidInput(format!(
                "at most {} royalty holders allowed, got {}",
                MAX_ROYALTY_HOLDERS,
                royalty_holders.len()
            )));
        }

        let mut total_bps: u32 = 0;
        for (i, (holder, bps)) in royalty_holders.iter().enumerate() {
            if bps.is_zero() {
                return Err(LedgerError::InvalidInput(format!(
                    "royalty holder {} has a zero percentage",
                    holder
                )));
            }
            if royalty_holders[..i].iter().any(|(h, _)| h == holder) {
                return Err(LedgerError::InvalidInput(format!(
                    "duplicate royalty holder {}",
                    holder
                )));
            }
            total_bps += bps.value() as u32;
        }
        if total_bps > MAX_TOTAL_ROYALTY_BPS as u32 {
            return Err(LedgerError::InvalidInput(format!(
                "combined royalty of {} bps exceeds the {} bps cap",
                total_bps, MAX_TOTAL_ROYALTY_BPS
            )));
        }

        Ok(())
    }

    /// Insert a new property in the Listed state and return its id.
    ///
    /// Inputs must already have passed `validate_listing`.
    pub fn insert(
        &mut self,
        owner: AccountId,
        metadata_uri: String,
        price: Amount,
        royalty_holders: Vec<(AccountId, BasisPoints)>,
    ) -> PropertyId {
        let id = self.next_id;
        self.next_id = id.next();

        let holders = royalty_holders
            .into_iter()
            .map(|(holder, percentage_bps)| RoyaltyHolder {
                holder,
                percentage_bps,
                approved: false,
            })
            .collect();

        let property = Property::new(id, owner, metadata_uri, price, holders);
        self.properties.insert(id, property);
        id
    }

    /// Look up a property.
    pub fn get(&self, id: PropertyId) -> Result<&Property, LedgerError> {
        self.properties
            .get(&id)
            .ok_or_else(|| LedgerError::NotFound(format!("{}", id)))
    }

    /// Look up a property mutably.
    pub fn get_mut(&mut self, id: PropertyId) -> Result<&mut Property, LedgerError> {
        self.properties
            .get_mut(&id)
            .ok_or_else(|| LedgerError::NotFound(format!("{}", id)))
    }

    /// Iterate over all properties in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.properties.values()
    }

    /// Number of properties ever listed.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl Default for PropertyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
