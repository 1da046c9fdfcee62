//! Core trait definitions for the PLUTO minting pipeline.
//!
//! These three traits define the trust boundary:
//!
//! - `AdmissionPolicy`: trusted gate (decides every request, never mutates)
//! - `Ledger`: trusted sink (holds balances and the supply cap)
//! - `Clock`: environment time source
//!
//! The engine wires them together in the correct order. `Ledger::credit` is
//! never called unless the admission policy first returns `Accepted`.

use pluto_contracts::{
    account::{AccountId, AccountState},
    amount::TokenAmount,
    error::PlutoResult,
    mint::{LedgerCredit, PeriodWindow},
    policy::{Admission, MintContext, MintPolicy},
    time::Timestamp,
};

/// The admission policy: the gate every mint request passes through.
///
/// Implementations must be deterministic and side-effect free. Evaluation
/// should be fast, with no I/O on the hot path.
pub trait AdmissionPolicy: Send + Sync {
    /// Decide whether the request described by `ctx` may mint.
    ///
    /// Rules are checked in a fixed order and the first failing rule is the
    /// one reported. An `Accepted` admission carries the window the engine
    /// must store once the ledger credit succeeds.
    fn admit(&self, ctx: &MintContext) -> PlutoResult<Admission>;

    /// The limits this policy enforces.
    fn limits(&self) -> &MintPolicy;

    /// Whether a request arriving at `now` would roll `window` over.
    fn window_expired(&self, window: &PeriodWindow, now: Timestamp) -> bool;

    /// The window as a request arriving at `now` would observe it, after any
    /// rollover. Pure: the stored window is not touched.
    fn window_at(&self, window: &PeriodWindow, now: Timestamp) -> PeriodWindow;

    /// Seconds `account_state` must still wait at `now` before its cooldown
    /// lets it mint again. Zero when free.
    fn cooldown_remaining(&self, account_state: &AccountState, now: Timestamp) -> u64;
}

/// The capped ledger: balances, total supply, and the supply cap.
///
/// The ledger is an external collaborator from the engine's point of view.
/// It enforces its own cap as a last line of defense; a refusal there
/// surfaces as the same `SupplyCapExceeded` rejection the policy produces.
pub trait Ledger: Send + Sync {
    /// The absolute supply ceiling.
    fn cap(&self) -> TokenAmount;

    /// Current total supply.
    fn total_supply(&self) -> TokenAmount;

    /// Current balance of `account` (zero if it never received tokens).
    fn balance_of(&self, account: &AccountId) -> TokenAmount;

    /// Credit `amount` new tokens to `account`.
    ///
    /// Must be all-or-nothing: on error, neither the balance nor the total
    /// supply may have changed.
    fn credit(
        &self,
        account: &AccountId,
        amount: TokenAmount,
        minted_at: Timestamp,
    ) -> PlutoResult<LedgerCredit>;
}

/// Source of environment time for callers that do not supply it explicitly.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
