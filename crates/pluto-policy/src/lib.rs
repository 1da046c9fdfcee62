//! # pluto-policy
//!
//! The admission rule set for the PLUTO capped-token runtime.
//!
//! ## Overview
//!
//! This crate provides [`RuleSetPolicy`], which implements the
//! [`AdmissionPolicy`](pluto_core::traits::AdmissionPolicy) trait. Limits are
//! declared in a TOML file, scaled into base units, and enforced by four
//! rules evaluated in a fixed order:
//!
//! 1. per-call ceiling
//! 2. per-account cooldown
//! 3. global period quota (after wholesale window rollover)
//! 4. supply cap
//!
//! The first failing rule is the one reported.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use pluto_policy::engine::RuleSetPolicy;
//!
//! let policy = RuleSetPolicy::from_file(Path::new("policies/mainnet.toml"))?;
//! // Pass `policy` to `pluto_core::MintEngine::new(...)`.
//! ```

pub mod config;
pub mod engine;
pub mod rule;
pub mod window;

pub use config::{LimitsSection, NominalAmount, PolicyConfig, TokenSection};
pub use engine::RuleSetPolicy;
pub use rule::MintRule;

// ── Tests ─────────────────────────────────────────────────────────────────────
