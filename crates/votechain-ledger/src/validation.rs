use votechain_crypto::{ChainError, HasEntryHash, HashChainVerifier};
use votechain_types::EntryHash;

use crate::entry::Entry;
use crate::error::RejectionReason;

/// Check `candidate` as the direct successor of `predecessor`.
///
/// Structural checks (index, link) run before the hash is recomputed.
pub fn check_entry(candidate: &Entry, predecessor: &Entry) -> Result<(), RejectionReason> {
    let expected = predecessor
        .index
        .checked_add(1)
        .ok_or(RejectionReason::IndexOverflow {
            predecessor: predecessor.index,
        })?;
    if candidate.index != expected {
        return Err(RejectionReason::IndexMismatch {
            expected,
            actual: candidate.index,
        });
    }

    if candidate.prev_hash != Some(predecessor.hash) {
        return Err(RejectionReason::PrevHashMismatch {
            index: candidate.index,
        });
    }

    if candidate.computed_hash() != candidate.hash {
        return Err(RejectionReason::HashMismatch {
            index: candidate.index,
        });
    }

    Ok(())
}

/// Boolean verdict of [`check_entry`].
pub fn validate_entry(candidate: &Entry, predecessor: &Entry) -> bool {
    check_entry(candidate, predecessor).is_ok()
}

/// Check a caller-supplied genesis entry.
pub(crate) fn check_genesis(entry: &Entry) -> Result<(), RejectionReason> {
    if entry.index != 0 {
        return Err(RejectionReason::IndexMismatch {
            expected: 0,
            actual: entry.index,
        });
    }
    if entry.prev_hash.is_some() {
        return Err(RejectionReason::GenesisHasPrevHash);
    }
    if !entry.verify_hash() {
        return Err(RejectionReason::HashMismatch { index: 0 });
    }
    Ok(())
}

/// Result of auditing a whole chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainAudit {
    pub length: u64,
    pub head: EntryHash,
    pub valid: bool,
    pub violations: Vec<ChainError>,
}

impl ChainAudit {
    /// Audit a non-empty sequence of entries.
    pub(crate) fn of(entries: &[Entry], head: EntryHash) -> Self {
        let violations = HashChainVerifier::violations(entries);
        Self {
            length: entries.len() as u64,
            head,
            valid: violations.is_empty(),
            violations,
        }
    }

    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}
