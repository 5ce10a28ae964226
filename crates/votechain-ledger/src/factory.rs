//! Pure entry construction. Nothing here validates; see [`crate::validation`].

use votechain_crypto::EntryHasher;
use votechain_types::Timestamp;

use crate::entry::Entry;

/// Build the index-0 entry stamped with the current time.
pub fn genesis() -> Entry {
    genesis_at(Timestamp::now())
}

/// Build the index-0 entry: empty value, no predecessor.
pub fn genesis_at(timestamp: Timestamp) -> Entry {
    let hash = EntryHasher::derive(0, &timestamp, "", None);
    Entry {
        index: 0,
        timestamp,
        value: String::new(),
        hash,
        prev_hash: None,
    }
}

/// Build the successor of `predecessor` carrying `value`, stamped now.
pub fn create_entry(predecessor: &Entry, value: impl Into<String>) -> Entry {
    create_entry_at(predecessor, value, Timestamp::now())
}

/// Build the successor of `predecessor` with an explicit timestamp.
///
/// The index saturates at `u64::MAX`; such an entry never validates against
/// its predecessor.
pub fn create_entry_at(
    predecessor: &Entry,
    value: impl Into<String>,
    timestamp: Timestamp,
) -> Entry {
    let index = predecessor.index.saturating_add(1);
    let value = value.into();
    let prev_hash = Some(predecessor.hash);
    let hash = EntryHasher::derive(index, &timestamp, &value, prev_hash.as_ref());
    Entry {
        index,
        timestamp,
        value,
        hash,
        prev_hash,
    }
}
