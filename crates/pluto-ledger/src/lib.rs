//! # pluto-ledger
//!
//! In-memory capped ledger with an append-only, SHA-256 hash-chained mint
//! journal for the PLUTO runtime.
//!
//! ## Overview
//!
//! `InMemoryLedger` holds balances and total supply and refuses any credit
//! that would pass its cap. Every accepted credit becomes a `JournalEntry`
//! whose SHA-256 hash covers the mint and the previous entry's hash.
//! `verify_chain` recomputes the links and checks that each entry's supply
//! is the previous supply plus its amount.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pluto_ledger::InMemoryLedger;
//! use pluto_core::traits::Ledger;
//!
//! let ledger = InMemoryLedger::new("PLT", cap);
//! ledger.credit(&account, amount, now)?;
//!
//! assert!(ledger.verify_integrity());
//! let journal = ledger.export_journal();
//! ```

pub mod chain;
pub mod event;
pub mod memory;

pub use chain::{hash_entry, verify_chain};
pub use event::{JournalEntry, MintJournal};
pub use memory::InMemoryLedger;

// ── Tests ─────────────────────────────────────────────────────────────────────
