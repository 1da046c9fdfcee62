//! Journal entries and the exported mint journal.

use serde::{Deserialize, Serialize};

use pluto_contracts::{amount::TokenAmount, mint::MintRecord};

use crate::chain::verify_chain;

/// One accepted mint, linked to the mint before it.
///
/// `this_hash` covers the record and `prev_hash`, so rewriting an amount or
/// dropping an entry breaks every later link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Position in the journal, starting at 0.
    pub sequence: u64,

    pub record: MintRecord,

    /// `this_hash` of the previous mint, or `GENESIS_HASH` for the first.
    pub prev_hash: String,

    pub this_hash: String,
}

impl JournalEntry {
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// Every mint a ledger has accepted, with the supply figures they add up to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintJournal {
    /// Symbol of the token the ledger belongs to.
    pub token: String,

    pub cap: TokenAmount,

    /// Ledger supply at export time.
    pub total_supply: TokenAmount,

    /// Entries in mint order.
    pub entries: Vec<JournalEntry>,

    /// `this_hash` of the last entry. Empty if nothing was minted.
    pub terminal_hash: String,
}

impl MintJournal {
    /// Whether the entries chain correctly and agree with the supply figures:
    /// the last entry's supply equals `total_supply`, which stays within
    /// `cap`, and `terminal_hash` names the last entry.
    pub fn verify(&self) -> bool {
        let (last_supply, last_hash) = match self.entries.last() {
            Some(entry) => (entry.record.total_supply, entry.this_hash.as_str()),
            None => (TokenAmount::ZERO, ""),
        };

        verify_chain(&self.entries)
            && last_supply == self.total_supply
            && self.total_supply <= self.cap
            && last_hash == self.terminal_hash
    }
}
