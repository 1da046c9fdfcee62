//! Token amounts in base units.
//!
//! Amounts are fixed-point integers (u128) with 18 decimals: one nominal
//! token is `10^18` base units. Nothing in the mint path uses floating point.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of decimal places between a base unit and a nominal token.
pub const DECIMALS: u32 = 18;

/// Base units in one nominal token (`10^DECIMALS`).
pub const BASE_UNITS_PER_TOKEN: u128 = 1_000_000_000_000_000_000;

/// A quantity of the capped token, counted in base units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub const ZERO: Self = Self(0);

    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Scale a nominal token count to base units using the default 18
    /// decimals. Returns `None` on overflow.
    pub fn from_tokens(tokens: u128) -> Option<Self> {
        Self::from_scaled(tokens, DECIMALS)
    }

    /// Scale `tokens` by `10^decimals`. Returns `None` on overflow.
    pub fn from_scaled(tokens: u128, decimals: u32) -> Option<Self> {
        10u128
            .checked_pow(decimals)
            .and_then(|unit| tokens.checked_mul(unit))
            .map(Self)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    /// Whole nominal tokens, truncating any fractional remainder.
    pub fn whole_tokens(&self) -> u128 {
        self.0 / BASE_UNITS_PER_TOKEN
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for TokenAmount {
    fn from(raw: u128) -> Self {
        Self(raw)
    }
}
