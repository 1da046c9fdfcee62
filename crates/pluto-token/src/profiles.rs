//! Embedded deployment profiles.

use std::sync::Arc;

use pluto_contracts::error::PlutoResult;
use pluto_core::traits::Clock;
use pluto_policy::RuleSetPolicy;

use crate::token::PlutoToken;

const MAINNET_POLICY: &str = include_str!("../policies/mainnet.toml");
const TESTNET_POLICY: &str = include_str!("../policies/testnet.toml");

/// A named set of limits shipped with the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// 8888 PLT cap, 8 per call, daily cooldown, 888 per year.
    Mainnet,
    /// 31 PLT cap, 8 per call, 4s cooldown, 16 per 8s.
    Testnet,
}

impl Profile {
    pub fn policy_toml(&self) -> &'static str {
        match self {
            Profile::Mainnet => MAINNET_POLICY,
            Profile::Testnet => TESTNET_POLICY,
        }
    }

    pub fn policy(&self) -> PlutoResult<RuleSetPolicy> {
        RuleSetPolicy::from_toml_str(self.policy_toml())
    }

    /// Deploy a fresh token with this profile's limits.
    pub fn deploy(&self, clock: Arc<dyn Clock>) -> PlutoResult<PlutoToken> {
        PlutoToken::deploy(self.policy()?, clock)
    }
}
