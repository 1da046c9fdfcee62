//! # pluto-core
//!
//! The admission-gated mint engine for the PLUTO capped-token runtime.
//!
//! This crate provides:
//! - The trust-boundary traits (`AdmissionPolicy`, `Ledger`, `Clock`)
//! - The `MintEngine` that wires policy and ledger together in the correct
//!   order
//! - `SystemClock` and `ManualClock`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pluto_core::{MintEngine, traits::{AdmissionPolicy, Ledger}};
//!
//! let engine = MintEngine::new(Box::new(policy), Box::new(ledger))?;
//! let receipt = engine.try_mint(&mut state, request)?;
//! ```

pub mod clock;
pub mod engine;
pub mod traits;

pub use clock::{ManualClock, SystemClock};
pub use engine::MintEngine;
