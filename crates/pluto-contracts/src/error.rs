//! Error types for the PLUTO minting pipeline.
//!
//! All fallible operations return `PlutoResult<T>`. A request that breaks one
//! of the admission rules fails with `PlutoError::Rejected`, carrying the
//! `Rejection` that names the rule; every other variant is a contract or
//! infrastructure failure rather than a business decision.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{account::AccountId, amount::TokenAmount};

/// Which admission rule refused a mint.
///
/// Variants are listed in evaluation order. When several rules would fail
/// for the same request, only the first in this order is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RejectionKind {
    CallAmountExceeded,
    CooldownActive,
    PeriodQuotaExceeded,
    SupplyCapExceeded,
}

impl RejectionKind {
    /// Every kind, in rule-evaluation order.
    pub const ORDER: [RejectionKind; 4] = [
        RejectionKind::CallAmountExceeded,
        RejectionKind::CooldownActive,
        RejectionKind::PeriodQuotaExceeded,
        RejectionKind::SupplyCapExceeded,
    ];

    /// The fixed reason fragment included in every rejection message of this
    /// kind. External callers match on these strings; they must not change.
    pub const fn reason(&self) -> &'static str {
        match self {
            RejectionKind::CallAmountExceeded => "amount exceed the maximum allowed amount",
            RejectionKind::CooldownActive => "you need to wait before you can mint again",
            RejectionKind::PeriodQuotaExceeded => "max mint token in period exceeded",
            RejectionKind::SupplyCapExceeded => "cap exceeded",
        }
    }

    /// Stable rule identifier used in logs.
    pub const fn rule_id(&self) -> &'static str {
        match self {
            RejectionKind::CallAmountExceeded => "per-call-ceiling",
            RejectionKind::CooldownActive => "per-account-cooldown",
            RejectionKind::PeriodQuotaExceeded => "global-period-quota",
            RejectionKind::SupplyCapExceeded => "supply-cap",
        }
    }
}

/// A business-rule refusal of a single mint request.
///
/// Terminal for the request that produced it; no state was changed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Rejection {
    #[error("PlutoToken: amount exceed the maximum allowed amount (requested {requested}, per-call limit {max_per_call})")]
    CallAmountExceeded {
        requested: TokenAmount,
        max_per_call: TokenAmount,
    },

    #[error("PlutoToken: you need to wait before you can mint again ({account} may mint in {remaining_secs}s)")]
    CooldownActive { account: AccountId, remaining_secs: u64 },

    #[error("PlutoToken: max mint token in period exceeded (requested {requested}, already minted {minted_in_window} of {max_per_period})")]
    PeriodQuotaExceeded {
        requested: TokenAmount,
        minted_in_window: TokenAmount,
        max_per_period: TokenAmount,
    },

    #[error("PlutoToken: cap exceeded (requested {requested}, total supply {total_supply}, cap {cap})")]
    SupplyCapExceeded {
        requested: TokenAmount,
        total_supply: TokenAmount,
        cap: TokenAmount,
    },
}

impl Rejection {
    pub fn kind(&self) -> RejectionKind {
        match self {
            Rejection::CallAmountExceeded { .. } => RejectionKind::CallAmountExceeded,
            Rejection::CooldownActive { .. } => RejectionKind::CooldownActive,
            Rejection::PeriodQuotaExceeded { .. } => RejectionKind::PeriodQuotaExceeded,
            Rejection::SupplyCapExceeded { .. } => RejectionKind::SupplyCapExceeded,
        }
    }
}

/// The unified error type for the PLUTO crates.
#[derive(Debug, Error)]
pub enum PlutoError {
    /// An admission rule refused the mint.
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// The request is malformed: zero amount, or a timestamp earlier than
    /// state the engine has already committed.
    #[error("invalid mint request: {reason}")]
    InvalidRequest { reason: String },

    /// A policy parameter is missing, inconsistent, or unparsable.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// Checked arithmetic on amounts overflowed.
    #[error("arithmetic overflow: {context}")]
    ArithmeticOverflow { context: String },

    /// The ledger could not persist a credit.
    ///
    /// Treated as fatal for the request: the engine does not commit its own
    /// state when the ledger write fails.
    #[error("ledger write failed: {reason}")]
    LedgerWriteFailed { reason: String },
}

impl PlutoError {
    /// The rejection kind, when this error is a business rejection.
    pub fn rejection_kind(&self) -> Option<RejectionKind> {
        match self {
            PlutoError::Rejected(rejection) => Some(rejection.kind()),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the PLUTO crates.
pub type PlutoResult<T> = Result<T, PlutoError>;
