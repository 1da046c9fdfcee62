//! Mint requests, receipts, journal records, and the engine's state store.
//!
//! `MintReceipt` is what the engine returns to the caller after an accepted
//! mint. `MintRecord` is what the ledger journals, one per accepted mint.
//! `MintState` is the explicit store the engine reads and commits to.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    account::{AccountId, AccountState},
    amount::TokenAmount,
    time::Timestamp,
};

/// A single request to mint `amount` to `account`, evaluated at `now`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintRequest {
    /// The caller, minting for itself.
    pub account: AccountId,
    /// Requested amount in base units.
    pub amount: TokenAmount,
    /// Environment time at which the request is evaluated.
    pub now: Timestamp,
}

impl MintRequest {
    pub fn new(account: AccountId, amount: TokenAmount, now: Timestamp) -> Self {
        Self { account, amount, now }
    }
}

/// The global period window shared by every account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindow {
    /// When the current window opened.
    pub window_start: Timestamp,
    /// Total amount minted by all accounts since `window_start`.
    pub minted_in_window: TokenAmount,
}

impl PeriodWindow {
    /// A fresh, empty window anchored at `start`.
    pub fn open_at(start: Timestamp) -> Self {
        Self {
            window_start: start,
            minted_in_window: TokenAmount::ZERO,
        }
    }
}

/// The mutable state the engine owns: cooldowns per account, the period
/// window, and the time of the latest accepted mint.
///
/// Passed explicitly into `MintEngine::try_mint`, so independent engine
/// instances never share state. Accounts are kept in a `BTreeMap` so a
/// serialized snapshot is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintState {
    pub accounts: BTreeMap<AccountId, AccountState>,
    pub window: PeriodWindow,
    /// Time of the latest accepted mint by any account. Requests must not
    /// arrive earlier than this.
    #[serde(default)]
    pub last_mint_at: Option<Timestamp>,
}

impl MintState {
    /// Empty state whose window opens at the construction time.
    pub fn new(created_at: Timestamp) -> Self {
        Self {
            accounts: BTreeMap::new(),
            window: PeriodWindow::open_at(created_at),
            last_mint_at: None,
        }
    }

    /// The stored state for `account`, or the default for an account that
    /// never minted.
    pub fn account(&self, account: &AccountId) -> AccountState {
        self.accounts.get(account).cloned().unwrap_or_default()
    }
}

/// What the ledger reports after crediting an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerCredit {
    /// The account's balance after the credit.
    pub balance: TokenAmount,
    /// Total supply after the credit.
    pub total_supply: TokenAmount,
}

/// What the caller gets back after an accepted mint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintReceipt {
    pub account: AccountId,
    pub amount: TokenAmount,
    /// The account's balance after the credit.
    pub balance: TokenAmount,
    /// Total supply after the credit.
    pub total_supply: TokenAmount,
    /// Start of the window this mint was counted in.
    pub window_start: Timestamp,
    /// Window accumulator after this mint.
    pub minted_in_window: TokenAmount,
    /// The request time, now stored as the account's `last_mint_at`.
    pub minted_at: Timestamp,
}

/// An immutable record of one accepted mint, written to the ledger journal.
///
/// Rejected requests never produce a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintRecord {
    pub account: AccountId,
    pub amount: TokenAmount,
    /// Environment time of the mint.
    pub minted_at: Timestamp,
    /// Total supply after the credit.
    pub total_supply: TokenAmount,
    /// Wall-clock time the ledger recorded the entry (UTC).
    pub recorded_at: DateTime<Utc>,
}
