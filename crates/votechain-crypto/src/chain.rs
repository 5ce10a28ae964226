use votechain_types::{EntryHash, Timestamp};

use crate::hasher::EntryHasher;

/// Trait for records that participate in a hash chain.
pub trait HasEntryHash {
    /// Position claimed by the record.
    fn index(&self) -> u64;
    /// Creation time, as hashed.
    fn timestamp(&self) -> &Timestamp;
    /// Payload, as hashed.
    fn value(&self) -> &str;
    /// The record's own stored hash.
    fn entry_hash(&self) -> EntryHash;
    /// The previous record's hash (None for genesis).
    fn prev_hash(&self) -> Option<EntryHash>;

    /// Recompute the hash from the record's own fields.
    fn computed_hash(&self) -> EntryHash {
        EntryHasher::derive(
            self.index(),
            self.timestamp(),
            self.value(),
            self.prev_hash().as_ref(),
        )
    }
}

/// Hash chain integrity verifier.
///
/// Verifies that a sequence of records forms a valid hash chain:
/// record `i` claims index `i`, its prev_hash matches record `i - 1`'s hash,
/// and its stored hash is correct for its fields.
pub struct HashChainVerifier;

impl HashChainVerifier {
    /// Verify a chain, stopping at the first violation.
    pub fn verify_chain(records: &[impl HasEntryHash]) -> Result<(), ChainError> {
        match Self::violations(records).into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Collect every violation in the chain, in position order.
    pub fn violations(records: &[impl HasEntryHash]) -> Vec<ChainError> {
        let mut found = Vec::new();

        for (position, record) in records.iter().enumerate() {
            let expected = position as u64;
            if record.index() != expected {
                found.push(ChainError::IndexGap {
                    position,
                    expected,
                    actual: record.index(),
                });
            }

            if position == 0 {
                if record.prev_hash().is_some() {
                    found.push(ChainError::GenesisHasPrevHash);
                }
            } else {
                let expected_prev = records[position - 1].entry_hash();
                match record.prev_hash() {
                    Some(prev) if prev == expected_prev => {}
                    Some(_) => found.push(ChainError::BrokenLink { position }),
                    None => found.push(ChainError::MissingPrevHash { position }),
                }
            }

            if record.computed_hash() != record.entry_hash() {
                found.push(ChainError::HashMismatch { position });
            }
        }

        found
    }
}

/// Errors from chain verification.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("genesis entry has a previous hash (should be empty)")]
    GenesisHasPrevHash,

    #[error("index gap at position {position}: expected {expected}, found {actual}")]
    IndexGap {
        position: usize,
        expected: u64,
        actual: u64,
    },

    #[error("broken link at position {position}: prev_hash does not match")]
    BrokenLink { position: usize },

    #[error("missing prev_hash at position {position} (should reference previous entry)")]
    MissingPrevHash { position: usize },

    #[error("hash mismatch at position {position}: computed hash differs from stored")]
    HashMismatch { position: usize },
}
