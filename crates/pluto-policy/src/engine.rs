//! TOML-driven admission policy implementation.
//!
//! `RuleSetPolicy` loads a `PolicyConfig` from a TOML string or file and
//! implements the `AdmissionPolicy` trait from pluto-core.
//!
//! Evaluation algorithm:
//!
//! 1. Walk `MintRule::ORDER`.
//! 2. Before the period quota is checked, roll the window over if it has
//!    expired (wholesale, re-anchored to the request time).
//! 3. The first rule that fails produces `Admission::Rejected` and stops
//!    evaluation.
//! 4. If every rule passes → `Admission::Accepted` with the rolled window
//!    and its updated accumulator.

use std::path::Path;

use tracing::{debug, warn};

use pluto_contracts::{
    account::AccountState,
    error::{PlutoError, PlutoResult},
    mint::PeriodWindow,
    policy::{Admission, MintContext, MintPolicy},
    time::Timestamp,
};
use pluto_core::traits::AdmissionPolicy;

use crate::{
    config::PolicyConfig,
    rule::{
        check_call_ceiling, check_cooldown, check_period_quota, check_supply_cap,
        cooldown_remaining, MintRule,
    },
    window::{phase, roll_over, WindowPhase},
};

/// An `AdmissionPolicy` enforcing the per-call ceiling, per-account
/// cooldown, global period quota, and supply cap.
///
/// Construct via `from_toml_str`, `from_file`, or `new`, then pass to the
/// engine.
///
/// ```rust,ignore
/// use pluto_policy::engine::RuleSetPolicy;
///
/// let policy = RuleSetPolicy::from_file(Path::new("policies/mainnet.toml"))?;
/// ```
#[derive(Debug, Clone)]
pub struct RuleSetPolicy {
    config: Option<PolicyConfig>,
    limits: MintPolicy,
}

impl RuleSetPolicy {
    /// Build a policy directly from base-unit limits.
    ///
    /// Returns `PlutoError::ConfigError` if the limits are inconsistent.
    pub fn new(limits: MintPolicy) -> PlutoResult<Self> {
        limits.validate()?;
        Ok(Self { config: None, limits })
    }

    /// Parse `s` as TOML and build a `RuleSetPolicy`.
    ///
    /// Returns `PlutoError::ConfigError` if the TOML is malformed, does not
    /// match the `PolicyConfig` schema, or describes invalid limits.
    pub fn from_toml_str(s: &str) -> PlutoResult<Self> {
        let config: PolicyConfig = toml::from_str(s).map_err(|e| PlutoError::ConfigError {
            reason: format!("failed to parse policy TOML: {}", e),
        })?;
        let limits = config.mint_policy()?;
        Ok(Self {
            config: Some(config),
            limits,
        })
    }

    /// Read the file at `path` and parse it as TOML policy configuration.
    pub fn from_file(path: &Path) -> PlutoResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| PlutoError::ConfigError {
            reason: format!("failed to read policy file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The configuration this policy was loaded from, if it came from TOML.
    pub fn config(&self) -> Option<&PolicyConfig> {
        self.config.as_ref()
    }
}

impl AdmissionPolicy for RuleSetPolicy {
    /// Evaluate the request against every rule in order.
    ///
    /// The window rollover happens in front of the quota check and is only
    /// reflected in the returned admission; a rejected request leaves the
    /// caller's window as it was.
    fn admit(&self, ctx: &MintContext) -> PlutoResult<Admission> {
        debug!(
            account = %ctx.account,
            amount = %ctx.amount,
            now = ctx.now.as_secs(),
            "evaluating mint admission"
        );

        let limits = &self.limits;
        let mut window = ctx.window;

        for rule in MintRule::ORDER {
            let outcome = match rule {
                MintRule::PerCallCeiling => check_call_ceiling(limits, ctx.amount),

                MintRule::PerAccountCooldown => {
                    check_cooldown(limits, &ctx.account, &ctx.account_state, ctx.now)
                }

                MintRule::GlobalPeriodQuota => {
                    if phase(&window, limits.period_duration, ctx.now) == WindowPhase::Expired {
                        debug!(
                            window_start = window.window_start.as_secs(),
                            now = ctx.now.as_secs(),
                            "period window expired, evaluating against a fresh window"
                        );
                    }
                    window = roll_over(&window, limits.period_duration, ctx.now);
                    check_period_quota(limits, &window, ctx.amount).map(|minted| {
                        window.minted_in_window = minted;
                    })
                }

                MintRule::SupplyCap => check_supply_cap(ctx.cap, ctx.total_supply, ctx.amount),
            };

            if let Err(rejection) = outcome {
                warn!(
                    rule_id = rule.id(),
                    account = %ctx.account,
                    amount = %ctx.amount,
                    reason = %rejection,
                    "mint request refused"
                );
                return Ok(Admission::Rejected(rejection));
            }

            debug!(rule_id = rule.id(), account = %ctx.account, "rule passed");
        }

        Ok(Admission::Accepted { next_window: window })
    }

    fn limits(&self) -> &MintPolicy {
        &self.limits
    }

    fn window_expired(&self, window: &PeriodWindow, now: Timestamp) -> bool {
        phase(window, self.limits.period_duration, now) == WindowPhase::Expired
    }

    fn window_at(&self, window: &PeriodWindow, now: Timestamp) -> PeriodWindow {
        roll_over(window, self.limits.period_duration, now)
    }

    fn cooldown_remaining(&self, account_state: &AccountState, now: Timestamp) -> u64 {
        cooldown_remaining(&self.limits, account_state, now)
    }
}
