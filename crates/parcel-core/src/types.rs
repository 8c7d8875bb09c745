use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Full ownership expressed in basis points (100.00%).
pub const BPS_FULL: u16 = 10_000;

/// Value in atomic units (wei-denominated) represented as u128.
///
/// The ledger never does unchecked arithmetic on amounts: every sum,
/// difference, and basis-point split goes through the checked helpers
/// below and surfaces overflow as a `CoreError`.
///
/// Serialized as a decimal string — u128 does not survive every
/// serialization format (TOML in particular).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(pub u128);

impl Serialize for Amount {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<u128>()
            .map(Amount)
            .map_err(serde::de::Error::custom)
    }
}

impl Amount {
    /// The zero amount.
    pub const ZERO: Amount = Amount(0);

    /// Create a new amount from atomic units.
    pub fn new(value: u128) -> Self {
        Self(value)
    }

    /// Raw value in atomic units.
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Check if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition.
    pub fn checked_add(self, other: Amount) -> Result<Amount, CoreError> {
        self.0
            .checked_add(other.0)
            .map(Amount)
            .ok_or_else(|| CoreError::InvalidAmount("amount addition overflow".into()))
    }

    /// Checked subtraction.
    pub fn checked_sub(self, other: Amount) -> Result<Amount, CoreError> {
        self.0
            .checked_sub(other.0)
            .map(Amount)
            .ok_or_else(|| CoreError::InvalidAmount("amount subtraction underflow".into()))
    }

    /// The portion of this amount corresponding to `bps` basis points,
    /// rounded down: `value * bps / 10000`.
    pub fn bps_portion(self, bps: BasisPoints) -> Result<Amount, CoreError> {
        self.0
            .checked_mul(bps.value() as u128)
            .map(|v| Amount(v / BPS_FULL as u128))
            .ok_or_else(|| CoreError::InvalidAmount("basis-point split overflow".into()))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} wei", self.0)
    }
}

/// Integer percentage units where 10000 = 100.00%.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct BasisPoints(u16);

impl BasisPoints {
    /// 100.00%.
    pub const FULL: BasisPoints = BasisPoints(BPS_FULL);

    /// Create, rejecting values above 10000.
    pub fn new(value: u16) -> Result<Self, CoreError> {
        if value > BPS_FULL {
            return Err(CoreError::InvalidBasisPoints(value));
        }
        Ok(Self(value))
    }

    /// Raw basis-point value.
    pub fn value(&self) -> u16 {
        self.0
    }

    /// Whether this is zero basis points.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}

/// Pre-authenticated caller identity.
///
/// The runtime hosting the ledger verifies signatures; the ledger itself
/// only compares identities for equality and never authenticates them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create a new account identity. Rejects empty identifiers.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(CoreError::InvalidAccount(
                "account identifier must not be empty".into(),
            ));
        }
        Ok(Self(id))
    }

    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque monotonically increasing property identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyId(pub u64);

impl PropertyId {
    /// The identifier following this one.
    pub fn next(&self) -> PropertyId {
        PropertyId(self.0 + 1)
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "property-{}", self.0)
    }
}

/// Identifier of an entry in the append-only transaction log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransactionId(pub u64);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tx-{}", self.0)
    }
}
