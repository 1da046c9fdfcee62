//! The PLUTO mint engine: the admission gate in front of the ledger.
//!
//! The engine enforces the minting pipeline:
//!
//!   Validate → Context → AdmissionPolicy::admit → Ledger::credit → Commit
//!
//! The invariant is absolute: `Ledger::credit()` is NEVER called unless the
//! policy returns `Admission::Accepted`, and `MintState` is written only
//! after the ledger credit succeeds. A request either completes in full or
//! leaves every piece of state as it found it.

use tracing::{debug, info, warn};

use pluto_contracts::{
    account::{AccountId, AccountState},
    amount::TokenAmount,
    error::{PlutoError, PlutoResult},
    mint::{MintReceipt, MintRequest, MintState},
    policy::{Admission, MintContext, MintPolicy},
    time::Timestamp,
};

use crate::traits::{AdmissionPolicy, Ledger};

/// The engine that decides and commits mint requests.
///
/// The engine owns the trusted components (policy and ledger) but not the
/// cooldown/window state, which callers pass in explicitly. Exclusive access
/// to that state (`&mut MintState`) is what serializes requests.
pub struct MintEngine {
    policy: Box<dyn AdmissionPolicy>,
    ledger: Box<dyn Ledger>,
}

impl MintEngine {
    /// Create an engine from a policy and the ledger it guards.
    ///
    /// Returns `PlutoError::ConfigError` if the policy's limits are invalid or
    /// its supply cap disagrees with the ledger's.
    pub fn new(policy: Box<dyn AdmissionPolicy>, ledger: Box<dyn Ledger>) -> PlutoResult<Self> {
        let limits = policy.limits();
        limits.validate()?;
        if limits.supply_cap != ledger.cap() {
            return Err(PlutoError::ConfigError {
                reason: format!(
                    "policy supply_cap ({}) does not match ledger cap ({})",
                    limits.supply_cap,
                    ledger.cap()
                ),
            });
        }
        Ok(Self { policy, ledger })
    }

    pub fn limits(&self) -> &MintPolicy {
        self.policy.limits()
    }

    pub fn ledger(&self) -> &dyn Ledger {
        self.ledger.as_ref()
    }

    /// Evaluate one mint request against `state` and commit it if admitted.
    ///
    /// # Pipeline
    ///
    /// 1. Reject malformed requests (zero amount, time earlier than the
    ///    stored window start or the latest accepted mint by any account)
    /// 2. Build `MintContext` from the request, stored state, and ledger
    /// 3. Call `policy.admit()`; `Rejected` → return the rejection untouched
    /// 4. Call `ledger.credit()`, **only reachable after step 3 accepts**
    /// 5. Store the admitted window and the account's `last_mint_at`
    ///
    /// # Errors
    ///
    /// `PlutoError::Rejected` for business rejections, `InvalidRequest` for
    /// malformed input, and whatever the ledger returns if the credit fails.
    /// In every error case `state` is unchanged.
    pub fn try_mint(&self, state: &mut MintState, request: MintRequest) -> PlutoResult<MintReceipt> {
        let MintRequest { account, amount, now } = request;

        debug!(
            account = %account,
            amount = %amount,
            now = now.as_secs(),
            "mint request received"
        );

        // ── Step 1: Validate the request ─────────────────────────────────────
        let account_state = state.account(&account);
        validate_request(amount, now, state)?;

        // ── Step 2: Build the evaluation context ─────────────────────────────
        let ctx = MintContext {
            account: account.clone(),
            amount,
            now,
            account_state,
            window: state.window,
            total_supply: self.ledger.total_supply(),
            cap: self.ledger.cap(),
        };

        // ── Step 3: Admission ────────────────────────────────────────────────
        //
        // The primary gate. Nothing is written unless it accepts.
        let next_window = match self.policy.admit(&ctx)? {
            Admission::Accepted { next_window } => next_window,
            Admission::Rejected(rejection) => {
                warn!(
                    account = %account,
                    amount = %amount,
                    rule = rejection.kind().rule_id(),
                    "mint rejected"
                );
                return Err(rejection.into());
            }
        };

        // ── Step 4: Ledger credit ────────────────────────────────────────────
        //
        // The ledger may still refuse (its own cap check). State has not been
        // touched yet, so a refusal here needs no rollback.
        let credit = self.ledger.credit(&account, amount, now)?;

        // ── Step 5: Commit engine state ──────────────────────────────────────
        if next_window.window_start != state.window.window_start {
            info!(
                previous_start = state.window.window_start.as_secs(),
                previous_minted = %state.window.minted_in_window,
                window_start = next_window.window_start.as_secs(),
                "period window rolled over"
            );
        }
        state.window = next_window;
        state.last_mint_at = Some(now);
        state.accounts.insert(
            account.clone(),
            AccountState {
                last_mint_at: Some(now),
            },
        );

        info!(
            account = %account,
            amount = %amount,
            total_supply = %credit.total_supply,
            minted_in_window = %next_window.minted_in_window,
            "mint accepted"
        );

        Ok(MintReceipt {
            account,
            amount,
            balance: credit.balance,
            total_supply: credit.total_supply,
            window_start: next_window.window_start,
            minted_in_window: next_window.minted_in_window,
            minted_at: now,
        })
    }

    /// Seconds `account` must still wait at `now` before minting again.
    pub fn cooldown_remaining(&self, state: &MintState, account: &AccountId, now: Timestamp) -> u64 {
        self.policy.cooldown_remaining(&state.account(account), now)
    }

    /// Quota still available to all accounts for a request arriving at `now`.
    pub fn period_remaining(&self, state: &MintState, now: Timestamp) -> TokenAmount {
        let window = self.policy.window_at(&state.window, now);
        self.limits()
            .max_amount_per_period
            .saturating_sub(window.minted_in_window)
    }

    /// When the current window expires, or `None` if a request at `now`
    /// would already roll it over.
    pub fn next_window_reset(&self, state: &MintState, now: Timestamp) -> Option<Timestamp> {
        if self.policy.window_expired(&state.window, now) {
            return None;
        }
        Some(
            state
                .window
                .window_start
                .saturating_add_secs(self.limits().period_duration),
        )
    }
}

/// Contract checks that run before any rule is evaluated.
fn validate_request(amount: TokenAmount, now: Timestamp, state: &MintState) -> PlutoResult<()> {
    if amount.is_zero() {
        return Err(PlutoError::InvalidRequest {
            reason: "amount must be greater than zero".to_string(),
        });
    }
    if now < state.window.window_start {
        return Err(PlutoError::InvalidRequest {
            reason: format!(
                "request time {} precedes the period window start {}",
                now, state.window.window_start
            ),
        });
    }
    if let Some(last) = state.last_mint_at {
        if now < last {
            return Err(PlutoError::InvalidRequest {
                reason: format!("request time {} precedes the last accepted mint at {}", now, last),
            });
        }
    }
    Ok(())
}

// ── Tests ────────────────────────────────────────────────────────────────────
