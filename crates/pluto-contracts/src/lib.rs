//! # pluto-contracts
//!
//! Shared types, limits, and error definitions for the PLUTO minting runtime.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions and error types.

pub mod account;
pub mod amount;
pub mod error;
pub mod mint;
pub mod policy;
pub mod time;
