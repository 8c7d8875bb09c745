//! Royalty approval tracking.
//!
//! Every royalty holder must approve a sale before the ledger accepts any
//! share payment for the property. Approval never changes the property
//! status on its own — it only flips the holder's flag.

use parcel_core::AccountId;

use crate::error::LedgerError;
use crate::property::Property;

/// Record `caller`'s approval on the property.
///
/// Fails with `InvalidState` on terminal properties, `NotFound` if the
/// caller is not a registered royalty holder, and `AlreadyApproved` on a
/// repeat call.
pub fn approve(property: &mut Property, caller: &AccountId) -> Result<(), LedgerError> {
    if property.status.is_final() {
        return Err(LedgerError::InvalidState(property.status));
    }

    let (index, holder) = property
        .royalty_holder(caller)
        .ok_or_else(|| {
            LedgerError::NotFound(format!(
                "{} is not a royalty holder for {}",
                caller, property.id
            ))
        })?;

    if holder.approved {
        return Err(LedgerError::AlreadyApproved(caller.clone()));
    }

    property.royalty_holders[index].approved = true;
    Ok(())
}

/// True iff every royalty holder has approved (vacuously true with zero
/// holders). The hard gate consumed by the share-sale path.
pub fn all_approvals_in_place(property: &Property) -> bool {
    property.all_approved()
}
