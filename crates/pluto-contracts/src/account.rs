//! Account identity and per-account minting state.
//!
//! PLUTO does not manage keys or addresses; an account is whatever stable
//! string the host environment uses to identify the caller.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Stable identifier for a minting account.
///
/// The engine keys its cooldown map on this value, so two requests carrying
/// the same string are the same account.
/// Example: AccountId("0x70997970c51812dc3a010c7d01b50e0d17dc79c8")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Minting history the engine keeps for one account.
///
/// Created lazily the first time the account mints successfully and never
/// removed afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    /// Time of the account's most recent accepted mint. `None` until the
    /// first mint succeeds.
    pub last_mint_at: Option<Timestamp>,
}
