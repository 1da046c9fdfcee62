//! In-memory implementation of `Ledger`.
//!
//! `InMemoryLedger` is the reference capped ledger. Balances, total supply,
//! and the mint journal live behind one `Mutex`, so a credit updates all
//! three or none of them.
//!
//! `export_journal()` hands out a `MintJournal` that can be checked on its
//! own; `verify_integrity()` checks the live entries in place.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use chrono::Utc;
use tracing::{debug, warn};

use pluto_contracts::{
    account::AccountId,
    amount::TokenAmount,
    error::{PlutoError, PlutoResult, Rejection},
    mint::{LedgerCredit, MintRecord},
    time::Timestamp,
};
use pluto_core::traits::Ledger;

use crate::{
    chain::{hash_entry, verify_chain},
    event::{JournalEntry, MintJournal},
};

// ── Internal mutable state ────────────────────────────────────────────────────

/// The mutable interior of an `InMemoryLedger`.
pub(crate) struct LedgerState {
    pub(crate) balances: HashMap<AccountId, TokenAmount>,

    pub(crate) total_supply: TokenAmount,

    /// Journal entries in append order.
    pub(crate) entries: Vec<JournalEntry>,

    /// The `this_hash` of the last entry, or `GENESIS_HASH` before the first
    /// mint.
    pub(crate) last_hash: String,
}

// ── Public ledger ─────────────────────────────────────────────────────────────

/// An in-memory capped ledger with a SHA-256 hash-chained mint journal.
///
/// # Thread safety
///
/// Every operation takes the internal `Mutex`. Clones of the inner `Arc`
/// observe the same balances and journal.
pub struct InMemoryLedger {
    token: String,
    cap: TokenAmount,
    pub(crate) state: Arc<Mutex<LedgerState>>,
}

impl InMemoryLedger {
    /// Create an empty ledger for `token` with the given supply cap.
    pub fn new(token: impl Into<String>, cap: TokenAmount) -> Self {
        let state = LedgerState {
            balances: HashMap::new(),
            total_supply: TokenAmount::ZERO,
            entries: Vec::new(),
            last_hash: JournalEntry::GENESIS_HASH.to_string(),
        };
        Self {
            token: token.into(),
            cap,
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Export every entry so far together with the current supply figures.
    pub fn export_journal(&self) -> MintJournal {
        let state = self.read();
        let terminal_hash = state
            .entries
            .last()
            .map(|e| e.this_hash.clone())
            .unwrap_or_default();

        MintJournal {
            token: self.token.clone(),
            cap: self.cap,
            total_supply: state.total_supply,
            entries: state.entries.clone(),
            terminal_hash,
        }
    }

    /// Verify that the in-memory journal has not been tampered with.
    pub fn verify_integrity(&self) -> bool {
        verify_chain(&self.read().entries)
    }

    /// Lock for reading.
    ///
    /// A credit mutates only after every check has passed, so state behind a
    /// poisoned lock is still consistent and safe to read.
    fn read(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ── Ledger impl ───────────────────────────────────────────────────────────────

impl Ledger for InMemoryLedger {
    fn cap(&self) -> TokenAmount {
        self.cap
    }

    fn total_supply(&self) -> TokenAmount {
        self.read().total_supply
    }

    fn balance_of(&self, account: &AccountId) -> TokenAmount {
        self.read().balances.get(account).copied().unwrap_or_default()
    }

    /// Credit `amount` to `account` and append a journal entry.
    ///
    /// Enforces the cap independently of any admission policy. Every new
    /// value is computed before anything is written, so a refusal leaves
    /// balances, supply, and journal untouched.
    fn credit(
        &self,
        account: &AccountId,
        amount: TokenAmount,
        minted_at: Timestamp,
    ) -> PlutoResult<LedgerCredit> {
        let mut state = self.state.lock().map_err(|e| PlutoError::LedgerWriteFailed {
            reason: format!("ledger state lock poisoned: {}", e),
        })?;

        let total_supply = match state.total_supply.checked_add(amount) {
            Some(next) if next <= self.cap => next,
            _ => {
                warn!(
                    token = %self.token,
                    account = %account,
                    amount = %amount,
                    total_supply = %state.total_supply,
                    cap = %self.cap,
                    "ledger refused credit above cap"
                );
                return Err(Rejection::SupplyCapExceeded {
                    requested: amount,
                    total_supply: state.total_supply,
                    cap: self.cap,
                }
                .into());
            }
        };

        let previous = state.balances.get(account).copied().unwrap_or_default();
        let balance = previous
            .checked_add(amount)
            .ok_or_else(|| PlutoError::ArithmeticOverflow {
                context: format!("balance of {}", account),
            })?;

        let record = MintRecord {
            account: account.clone(),
            amount,
            minted_at,
            total_supply,
            recorded_at: Utc::now(),
        };
        let sequence = state.entries.len() as u64;
        let prev_hash = state.last_hash.clone();
        let this_hash = hash_entry(&prev_hash, sequence, &record);

        state.entries.push(JournalEntry {
            sequence,
            record,
            prev_hash,
            this_hash: this_hash.clone(),
        });
        state.last_hash = this_hash;
        state.balances.insert(account.clone(), balance);
        state.total_supply = total_supply;

        debug!(
            token = %self.token,
            account = %account,
            sequence,
            balance = %balance,
            total_supply = %total_supply,
            "ledger credited"
        );

        Ok(LedgerCredit { balance, total_supply })
    }
}
