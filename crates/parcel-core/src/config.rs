use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{AccountId, Amount, BasisPoints};

/// Cap on the purchase fee: 10%.
pub const MAX_PURCHASE_FEE_BPS: u16 = 1_000;

/// Configuration for a marketplace ledger instance.
///
/// This replaces the ambient singleton state a contract deployment would
/// carry (admin address and fee schedule): it is passed in explicitly at
/// construction and mutated only through the admin-gated commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Platform administrator — the only identity allowed to change fees
    /// and withdraw the treasury.
    pub admin: AccountId,
    /// Fixed fee charged at listing time.
    pub listing_fee: Amount,
    /// Percentage fee added on top of each buyer's share payment.
    pub purchase_fee_bps: BasisPoints,
}

impl LedgerConfig {
    /// Create a config, validating the fee schedule.
    pub fn new(
        admin: AccountId,
        listing_fee: Amount,
        purchase_fee_bps: BasisPoints,
    ) -> Result<Self, CoreError> {
        let config = Self {
            admin,
            listing_fee,
            purchase_fee_bps,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the fee schedule.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.purchase_fee_bps.value() > MAX_PURCHASE_FEE_BPS {
            return Err(CoreError::ConfigError(format!(
                "purchase fee {} exceeds the {} bps cap",
                self.purchase_fee_bps.value(),
                MAX_PURCHASE_FEE_BPS
            )));
        }
        Ok(())
    }

    /// Parse a config from a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, CoreError> {
        let config: LedgerConfig =
            toml::from_str(s).map_err(|e| CoreError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to a TOML document.
    pub fn to_toml_string(&self) -> Result<String, CoreError> {
        toml::to_string_pretty(self).map_err(|e| CoreError::ConfigError(e.to_string()))
    }
}
