//! The admission rules and their checks.
//!
//! Each check is a pure function over the limits and the relevant slice of
//! state. They are evaluated in `MintRule::ORDER`; the first failing rule
//! decides the rejection.

use pluto_contracts::{
    account::{AccountId, AccountState},
    amount::TokenAmount,
    error::{Rejection, RejectionKind},
    mint::PeriodWindow,
    policy::MintPolicy,
    time::Timestamp,
};

/// The four admission rules, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MintRule {
    PerCallCeiling,
    PerAccountCooldown,
    GlobalPeriodQuota,
    SupplyCap,
}

impl MintRule {
    /// Evaluation order. This is a contract: when several rules would fail,
    /// callers see the first one listed here.
    pub const ORDER: [MintRule; 4] = [
        MintRule::PerCallCeiling,
        MintRule::PerAccountCooldown,
        MintRule::GlobalPeriodQuota,
        MintRule::SupplyCap,
    ];

    pub fn kind(&self) -> RejectionKind {
        match self {
            MintRule::PerCallCeiling => RejectionKind::CallAmountExceeded,
            MintRule::PerAccountCooldown => RejectionKind::CooldownActive,
            MintRule::GlobalPeriodQuota => RejectionKind::PeriodQuotaExceeded,
            MintRule::SupplyCap => RejectionKind::SupplyCapExceeded,
        }
    }

    pub fn id(&self) -> &'static str {
        self.kind().rule_id()
    }
}

/// Reject any single call above `max_amount_per_call`.
pub fn check_call_ceiling(limits: &MintPolicy, amount: TokenAmount) -> Result<(), Rejection> {
    if amount > limits.max_amount_per_call {
        return Err(Rejection::CallAmountExceeded {
            requested: amount,
            max_per_call: limits.max_amount_per_call,
        });
    }
    Ok(())
}

/// Seconds left before an account with `state` may mint again at `now`.
pub fn cooldown_remaining(limits: &MintPolicy, state: &AccountState, now: Timestamp) -> u64 {
    state
        .last_mint_at
        .map(|last| limits.min_cooldown_interval.saturating_sub(now.elapsed_since(last)))
        .unwrap_or(0)
}

/// Reject if the account minted less than `min_cooldown_interval` ago.
pub fn check_cooldown(
    limits: &MintPolicy,
    account: &AccountId,
    state: &AccountState,
    now: Timestamp,
) -> Result<(), Rejection> {
    let remaining_secs = cooldown_remaining(limits, state, now);
    if remaining_secs > 0 {
        return Err(Rejection::CooldownActive {
            account: account.clone(),
            remaining_secs,
        });
    }
    Ok(())
}

/// Reject if `amount` would push the (already rolled) window past
/// `max_amount_per_period`. Returns the new accumulator on success.
pub fn check_period_quota(
    limits: &MintPolicy,
    window: &PeriodWindow,
    amount: TokenAmount,
) -> Result<TokenAmount, Rejection> {
    // Overflow means the sum is far beyond any representable quota.
    match window.minted_in_window.checked_add(amount) {
        Some(minted) if minted <= limits.max_amount_per_period => Ok(minted),
        _ => Err(Rejection::PeriodQuotaExceeded {
            requested: amount,
            minted_in_window: window.minted_in_window,
            max_per_period: limits.max_amount_per_period,
        }),
    }
}

/// Reject if `amount` would push total supply past `cap`.
pub fn check_supply_cap(
    cap: TokenAmount,
    total_supply: TokenAmount,
    amount: TokenAmount,
) -> Result<(), Rejection> {
    match total_supply.checked_add(amount) {
        Some(next) if next <= cap => Ok(()),
        _ => Err(Rejection::SupplyCapExceeded {
            requested: amount,
            total_supply,
            cap,
        }),
    }
}
