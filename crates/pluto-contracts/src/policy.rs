//! Mint limits, evaluation context, and admission decisions.
//!
//! The admission policy consumes a `MintContext` and produces an `Admission`.
//! It decides; it never mutates. The engine commits the accepted outcome.

use serde::{Deserialize, Serialize};

use crate::{
    account::{AccountId, AccountState},
    amount::TokenAmount,
    error::{PlutoError, PlutoResult, Rejection},
    mint::PeriodWindow,
    time::Timestamp,
};

/// The immutable limits a token is constructed with.
///
/// Amounts are in base units; durations in seconds. Unsigned types make
/// every field non-negative by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintPolicy {
    /// Absolute ceiling on total supply.
    pub supply_cap: TokenAmount,
    /// Largest amount a single mint call may request.
    pub max_amount_per_call: TokenAmount,
    /// Minimum seconds between two accepted mints by the same account.
    pub min_cooldown_interval: u64,
    /// Largest aggregate amount all accounts together may mint in one window.
    pub max_amount_per_period: TokenAmount,
    /// Length of the period window in seconds.
    pub period_duration: u64,
}

impl MintPolicy {
    /// Check the cross-field invariants.
    ///
    /// Returns `PlutoError::ConfigError` if `max_amount_per_call` exceeds
    /// `supply_cap`.
    pub fn validate(&self) -> PlutoResult<()> {
        if self.max_amount_per_call > self.supply_cap {
            return Err(PlutoError::ConfigError {
                reason: format!(
                    "max_amount_per_call ({}) must not exceed supply_cap ({})",
                    self.max_amount_per_call, self.supply_cap
                ),
            });
        }
        Ok(())
    }
}

/// Everything the admission policy needs to decide one request.
///
/// Built by the engine from the request, the account's stored state, the
/// current window, and the ledger's supply figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintContext {
    pub account: AccountId,
    pub amount: TokenAmount,
    pub now: Timestamp,
    /// The account's state before this request. Default when it never minted.
    pub account_state: AccountState,
    /// The window as stored, before any rollover this request would cause.
    pub window: PeriodWindow,
    pub total_supply: TokenAmount,
    pub cap: TokenAmount,
}

/// The decision for a single mint request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Admission {
    /// Every rule passed. `next_window` is the window the engine must store
    /// if the ledger credit succeeds: rolled over if it had expired, with the
    /// requested amount already added to its accumulator.
    Accepted { next_window: PeriodWindow },

    /// A rule refused the request. Nothing may be written.
    Rejected(Rejection),
}
