use std::fmt;

use crate::error::CoreError;

/// The 4 states of a property listing lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PropertyStatus {
    /// Property is listed and open for buyer assignment.
    Listed,
    /// At least one buyer has committed — listing is under contract.
    UnderContract,
    /// Fully settled and ownership transferred. Final state.
    Sold,
    /// Listing was withdrawn by the owner. Final state.
    Cancelled,
}

impl PropertyStatus {
    /// Whether this is a final (terminal) state.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Sold | Self::Cancelled)
    }

    /// Numeric wire index, matching what marketplace clients render
    /// (0 = Listed, 1 = Under Contract, 2 = Sold, 3 = Cancelled).
    pub fn to_index(&self) -> u8 {
        match self {
            Self::Listed => 0,
            Self::UnderContract => 1,
            Self::Sold => 2,
            Self::Cancelled => 3,
        }
    }

    /// Create from the numeric wire index.
    pub fn from_index(value: u8) -> Result<Self, CoreError> {
        match value {
            0 => Ok(Self::Listed),
            1 => Ok(Self::UnderContract),
            2 => Ok(Self::Sold),
            3 => Ok(Self::Cancelled),
            _ => Err(CoreError::ValidationError(format!(
                "invalid property status value: {}",
                value
            ))),
        }
    }
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Listed => write!(f, "Listed"),
            Self::UnderContract => write!(f, "UnderContract"),
            Self::Sold => write!(f, "Sold"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Events that trigger status transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyEvent {
    /// The first buyer was assigned — the listing is committed.
    BuyerAdded,
    /// Cumulative paid share reached 100% — ownership transfers.
    SaleFinalized,
    /// The owner withdrew the listing.
    ListingCancelled,
}

/// Manages property status transitions.
///
/// Valid transitions:
/// - Listed → UnderContract (BuyerAdded)
/// - Listed → Cancelled (ListingCancelled)
/// - UnderContract → Sold (SaleFinalized)
/// - UnderContract → Cancelled (ListingCancelled)
///
/// Sold and Cancelled are terminal.
pub struct PropertyStateMachine;

impl PropertyStateMachine {
    /// Attempt a status transition based on an event.
    /// Returns the new status on success, or an error for invalid transitions.
    pub fn transition(
        current: PropertyStatus,
        event: PropertyEvent,
    ) -> Result<PropertyStatus, CoreError> {
        let new_status = match (current, event) {
            (PropertyStatus::Listed, PropertyEvent::BuyerAdded) => PropertyStatus::UnderContract,
            (PropertyStatus::Listed, PropertyEvent::ListingCancelled) => PropertyStatus::Cancelled,

            (PropertyStatus::UnderContract, PropertyEvent::SaleFinalized) => PropertyStatus::Sold,
            (PropertyStatus::UnderContract, PropertyEvent::ListingCancelled) => {
                PropertyStatus::Cancelled
            }

            _ => {
                return Err(CoreError::InvalidStateTransition {
                    from: current,
                    event,
                });
            }
        };

        tracing::debug!(
            from = %current,
            to = %new_status,
            event = ?event,
            "property status transition"
        );

        Ok(new_status)
    }

    /// Check if a transition is valid without performing it.
    pub fn can_transition(current: PropertyStatus, event: PropertyEvent) -> bool {
        Self::transition(current, event).is_ok()
    }
}
