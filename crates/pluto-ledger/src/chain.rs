//! Hash-chain primitives: hashing and journal verification.
//!
//! Each link commits to the mint it records as fixed-width big-endian
//! fields, in order:
//!
//!   1. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!   2. sequence (u64)
//!   3. account id length (u32), then the id bytes
//!   4. amount (u128 base units)
//!   5. minted_at (u64 seconds)
//!   6. total_supply after the mint (u128 base units)
//!   7. recorded_at (i64 microseconds since the Unix epoch)

use sha2::{Digest, Sha256};

use pluto_contracts::{amount::TokenAmount, mint::MintRecord};

use crate::event::JournalEntry;

/// Compute the SHA-256 hash linking `record` at `sequence` to `prev_hash`.
///
/// Returns a lowercase 64-character hex string.
pub fn hash_entry(prev_hash: &str, sequence: u64, record: &MintRecord) -> String {
    let account = record.account.as_str().as_bytes();

    let mut hasher = Sha256::new();
    hasher.update(prev_hash.as_bytes());
    hasher.update(sequence.to_be_bytes());
    hasher.update((account.len() as u32).to_be_bytes());
    hasher.update(account);
    hasher.update(record.amount.raw().to_be_bytes());
    hasher.update(record.minted_at.as_secs().to_be_bytes());
    hasher.update(record.total_supply.raw().to_be_bytes());
    hasher.update(record.recorded_at.timestamp_micros().to_be_bytes());

    hex::encode(hasher.finalize())
}

/// Verify a journal's entries.
///
/// Valid when every entry links to its predecessor (or `GENESIS_HASH`), its
/// sequence matches its position, its stored hash matches the value
/// recomputed from its record, and its `total_supply` is the previous
/// supply plus its own amount. An empty journal is valid.
pub fn verify_chain(entries: &[JournalEntry]) -> bool {
    let mut expected_prev = JournalEntry::GENESIS_HASH;
    let mut supply = TokenAmount::ZERO;

    for (position, entry) in entries.iter().enumerate() {
        if entry.sequence != position as u64 || entry.prev_hash != expected_prev {
            return false;
        }

        supply = match supply.checked_add(entry.record.amount) {
            Some(next) if next == entry.record.total_supply => next,
            _ => return false,
        };

        if entry.this_hash != hash_entry(&entry.prev_hash, entry.sequence, &entry.record) {
            return false;
        }

        expected_prev = &entry.this_hash;
    }

    true
}
