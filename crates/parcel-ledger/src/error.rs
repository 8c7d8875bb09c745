use parcel_core::{AccountId, Amount, CoreError, PropertyId, PropertyStatus};

/// Marketplace ledger errors.
///
/// Every command validates all preconditions before any state mutation and
/// returns the first violated one — a failed command is indistinguishable
/// in its effect from a no-op.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("caller {0} is not the property owner")]
    NotOwner(AccountId),

    #[error("caller {0} is not the platform admin")]
    NotAdmin(AccountId),

    #[error("operation not allowed while property is {0}")]
    InvalidState(PropertyStatus),

    #[error("insufficient payment: attached {attached}, required {required}")]
    InsufficientPayment { attached: Amount, required: Amount },

    #[error("purchase blocked: royalty approvals incomplete for {0}")]
    ApprovalsIncomplete(PropertyId),

    #[error("caller {caller} is not a registered buyer for {property}")]
    NotABuyer {
        caller: AccountId,
        property: PropertyId,
    },

    #[error("buyer {0} has already paid for their share")]
    AlreadyPaid(AccountId),

    #[error("royalty holder {0} has already approved this sale")]
    AlreadyApproved(AccountId),

    #[error("treasury balance is zero, nothing to withdraw")]
    NothingToWithdraw,

    #[error(transparent)]
    Core(#[from] CoreError),
}
