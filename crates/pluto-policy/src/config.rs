//! Policy configuration schema.
//!
//! A `PolicyConfig` is deserialized from TOML. Amounts are written as
//! nominal token counts and scaled by `10^decimals` into base units when the
//! config is turned into a `MintPolicy`.
//!
//! Example:
//! ```toml
//! [token]
//! name = "PlutoToken"
//! symbol = "PLT"
//! decimals = 18
//!
//! [limits]
//! supply_cap = "8888"
//! max_amount_per_call = "8"
//! min_cooldown_interval = 86400
//! max_amount_per_period = "888"
//! period_duration = 31536000
//! ```

use serde::{Deserialize, Serialize};

use pluto_contracts::{
    amount::{TokenAmount, DECIMALS},
    error::{PlutoError, PlutoResult},
    policy::MintPolicy,
};

/// Largest `decimals` for which `10^decimals` fits in a u128.
const MAX_DECIMALS: u32 = 38;

/// A nominal token amount as written in TOML.
///
/// Integers cover the common case. Strings allow values beyond the TOML
/// integer range and fractional amounts such as `"0.5"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NominalAmount {
    Whole(u64),
    Text(String),
}

impl NominalAmount {
    /// Convert to base units with `decimals` fractional digits.
    pub fn to_base_units(&self, decimals: u32) -> Result<TokenAmount, String> {
        match self {
            NominalAmount::Whole(tokens) => TokenAmount::from_scaled(u128::from(*tokens), decimals)
                .ok_or_else(|| format!("{} tokens overflows the base-unit range", tokens)),
            NominalAmount::Text(text) => parse_decimal(text.trim(), decimals),
        }
    }
}

fn parse_decimal(text: &str, decimals: u32) -> Result<TokenAmount, String> {
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());

    if whole.is_empty() || !is_digits(whole) || !is_digits(fraction) {
        return Err(format!("'{}' is not a non-negative decimal amount", text));
    }
    if fraction.len() > decimals as usize {
        return Err(format!(
            "'{}' has more than {} fractional digits",
            text, decimals
        ));
    }

    let overflow = || format!("'{}' overflows the base-unit range", text);
    let whole: u128 = whole.parse().map_err(|_| overflow())?;
    let scaled_whole = TokenAmount::from_scaled(whole, decimals).ok_or_else(overflow)?;
    if fraction.is_empty() {
        return Ok(scaled_whole);
    }

    // Right-pad the fraction to `decimals` digits: "5" with 18 decimals is
    // 5 * 10^17 base units.
    let padding = decimals - fraction.len() as u32;
    let fraction: u128 = fraction.parse().map_err(|_| overflow())?;
    let scaled_fraction = TokenAmount::from_scaled(fraction, padding).ok_or_else(overflow)?;
    scaled_whole.checked_add(scaled_fraction).ok_or_else(overflow)
}

fn default_name() -> String {
    "PlutoToken".to_string()
}

fn default_symbol() -> String {
    "PLT".to_string()
}

fn default_decimals() -> u32 {
    DECIMALS
}

/// Descriptive token metadata. Only `decimals` affects minting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSection {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Fractional digits between a base unit and a nominal token.
    #[serde(default = "default_decimals")]
    pub decimals: u32,
}

impl Default for TokenSection {
    fn default() -> Self {
        Self {
            name: default_name(),
            symbol: default_symbol(),
            decimals: default_decimals(),
        }
    }
}

/// The five construction limits, in nominal units and seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsSection {
    pub supply_cap: NominalAmount,
    pub max_amount_per_call: NominalAmount,
    /// Seconds.
    pub min_cooldown_interval: u64,
    pub max_amount_per_period: NominalAmount,
    /// Seconds.
    pub period_duration: u64,
}

/// The top-level structure deserialized from a TOML policy file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default)]
    pub token: TokenSection,
    pub limits: LimitsSection,
}

impl PolicyConfig {
    /// Scale the configured limits into a validated `MintPolicy`.
    ///
    /// Returns `PlutoError::ConfigError` for an out-of-range `decimals`, an
    /// unparsable or overflowing amount, or limits that fail
    /// `MintPolicy::validate`.
    pub fn mint_policy(&self) -> PlutoResult<MintPolicy> {
        let decimals = self.token.decimals;
        if decimals > MAX_DECIMALS {
            return Err(PlutoError::ConfigError {
                reason: format!("decimals must be at most {}, got {}", MAX_DECIMALS, decimals),
            });
        }

        let scale = |field: &str, amount: &NominalAmount| {
            amount
                .to_base_units(decimals)
                .map_err(|reason| PlutoError::ConfigError {
                    reason: format!("limits.{}: {}", field, reason),
                })
        };

        let limits = &self.limits;
        let policy = MintPolicy {
            supply_cap: scale("supply_cap", &limits.supply_cap)?,
            max_amount_per_call: scale("max_amount_per_call", &limits.max_amount_per_call)?,
            min_cooldown_interval: limits.min_cooldown_interval,
            max_amount_per_period: scale("max_amount_per_period", &limits.max_amount_per_period)?,
            period_duration: limits.period_duration,
        };
        policy.validate()?;
        Ok(policy)
    }
}
