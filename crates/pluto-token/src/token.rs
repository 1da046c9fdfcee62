//! `PlutoToken`: policy, ledger, and clock behind one critical section.
//!
//! The mint engine itself is stateless between calls; this type owns the
//! `MintState` and holds its lock across the whole evaluate-and-commit
//! sequence, so concurrent callers are served one at a time across all
//! accounts. The clock is read inside the lock, which keeps the timestamps
//! seen by successive mints in lock order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::info;

use pluto_contracts::{
    account::AccountId,
    amount::TokenAmount,
    error::PlutoResult,
    mint::{LedgerCredit, MintReceipt, MintRequest, MintState},
    policy::MintPolicy,
    time::Timestamp,
};
use pluto_core::{
    traits::{AdmissionPolicy, Clock, Ledger},
    MintEngine,
};
use pluto_ledger::{InMemoryLedger, MintJournal};
use pluto_policy::{RuleSetPolicy, TokenSection};

// ── Arc-wrapped ledger helper ─────────────────────────────────────────────────

/// Thin newtype allowing an `Arc<InMemoryLedger>` to be used as
/// `Box<dyn Ledger>`, so the token keeps a handle for journal export after
/// the engine takes ownership of the box.
struct ArcLedger(Arc<InMemoryLedger>);

impl Ledger for ArcLedger {
    fn cap(&self) -> TokenAmount {
        self.0.cap()
    }

    fn total_supply(&self) -> TokenAmount {
        self.0.total_supply()
    }

    fn balance_of(&self, account: &AccountId) -> TokenAmount {
        self.0.balance_of(account)
    }

    fn credit(
        &self,
        account: &AccountId,
        amount: TokenAmount,
        minted_at: Timestamp,
    ) -> PlutoResult<LedgerCredit> {
        self.0.credit(account, amount, minted_at)
    }
}

// ── Token ─────────────────────────────────────────────────────────────────────

/// A capped token whose mints pass through the PLUTO admission rules.
pub struct PlutoToken {
    metadata: TokenSection,
    engine: MintEngine,
    ledger: Arc<InMemoryLedger>,
    clock: Arc<dyn Clock>,
    state: Mutex<MintState>,
}

impl PlutoToken {
    /// Deploy a token with `policy`, opening the first period window at the
    /// clock's current time.
    ///
    /// Returns `PlutoError::ConfigError` if the policy limits are invalid.
    pub fn deploy(policy: RuleSetPolicy, clock: Arc<dyn Clock>) -> PlutoResult<Self> {
        let metadata = policy
            .config()
            .map(|config| config.token.clone())
            .unwrap_or_default();
        let limits = *policy.limits();

        let ledger = Arc::new(InMemoryLedger::new(metadata.symbol.clone(), limits.supply_cap));
        let engine = MintEngine::new(Box::new(policy), Box::new(ArcLedger(Arc::clone(&ledger))))?;

        let deployed_at = clock.now();
        info!(
            name = %metadata.name,
            symbol = %metadata.symbol,
            supply_cap = %limits.supply_cap,
            max_amount_per_call = %limits.max_amount_per_call,
            min_cooldown_interval = limits.min_cooldown_interval,
            max_amount_per_period = %limits.max_amount_per_period,
            period_duration = limits.period_duration,
            deployed_at = deployed_at.as_secs(),
            "token deployed"
        );

        Ok(Self {
            metadata,
            engine,
            ledger,
            clock,
            state: Mutex::new(MintState::new(deployed_at)),
        })
    }

    /// Mint `amount` base units to `account` at the clock's current time.
    pub fn mint(&self, account: &AccountId, amount: TokenAmount) -> PlutoResult<MintReceipt> {
        let mut state = self.lock_state();
        let now = self.clock.now();
        self.engine
            .try_mint(&mut state, MintRequest::new(account.clone(), amount, now))
    }

    /// Mint `amount` base units to `account` at an environment-supplied time.
    pub fn mint_at(
        &self,
        account: &AccountId,
        amount: TokenAmount,
        now: Timestamp,
    ) -> PlutoResult<MintReceipt> {
        let mut state = self.lock_state();
        self.engine
            .try_mint(&mut state, MintRequest::new(account.clone(), amount, now))
    }

    // ── Read accessors ────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    pub fn decimals(&self) -> u32 {
        self.metadata.decimals
    }

    pub fn limits(&self) -> &MintPolicy {
        self.engine.limits()
    }

    pub fn cap(&self) -> TokenAmount {
        self.ledger.cap()
    }

    pub fn total_supply(&self) -> TokenAmount {
        self.ledger.total_supply()
    }

    pub fn balance_of(&self, account: &AccountId) -> TokenAmount {
        self.ledger.balance_of(account)
    }

    /// The caller's own balance.
    pub fn balance(&self, caller: &AccountId) -> TokenAmount {
        self.balance_of(caller)
    }

    /// Seconds `account` must wait, as of the clock's current time.
    pub fn cooldown_remaining(&self, account: &AccountId) -> u64 {
        let state = self.lock_state();
        self.engine
            .cooldown_remaining(&state, account, self.clock.now())
    }

    /// Quota still mintable by anyone, as of the clock's current time.
    pub fn period_remaining(&self) -> TokenAmount {
        let state = self.lock_state();
        self.engine.period_remaining(&state, self.clock.now())
    }

    /// When the open window expires; `None` if it already has.
    pub fn next_window_reset(&self) -> Option<Timestamp> {
        let state = self.lock_state();
        self.engine.next_window_reset(&state, self.clock.now())
    }

    /// A copy of the cooldown map and period window.
    pub fn snapshot(&self) -> MintState {
        self.lock_state().clone()
    }

    pub fn export_journal(&self) -> MintJournal {
        self.ledger.export_journal()
    }

    pub fn verify_journal(&self) -> bool {
        self.ledger.verify_integrity()
    }

    /// The engine writes `MintState` only after every check and the ledger
    /// credit have succeeded, so the state behind a poisoned lock is whole.
    fn lock_state(&self) -> MutexGuard<'_, MintState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
