use serde::{Deserialize, Serialize};
use votechain_crypto::HasEntryHash;
use votechain_types::{hash::optional_hex, EntryHash, Timestamp};

/// One link in the vote chain.
///
/// `hash` is fixed at construction over (`index`, `timestamp`, `value`,
/// `prev_hash`) and never recomputed. Serializes as
/// `{"index", "timestamp", "value", "hash", "prev_hash"}` with `prev_hash`
/// written as `""` for genesis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub index: u64,
    pub timestamp: Timestamp,
    pub value: String,
    pub hash: EntryHash,
    #[serde(with = "optional_hex")]
    pub prev_hash: Option<EntryHash>,
}

impl Entry {
    /// Returns `true` for the index-0 entry with no predecessor.
    pub fn is_genesis(&self) -> bool {
        self.index == 0 && self.prev_hash.is_none()
    }

    /// Returns `true` if the stored hash matches the entry's own fields.
    pub fn verify_hash(&self) -> bool {
        self.computed_hash() == self.hash
    }
}

impl HasEntryHash for Entry {
    fn index(&self) -> u64 {
        self.index
    }

    fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn entry_hash(&self) -> EntryHash {
        self.hash
    }

    fn prev_hash(&self) -> Option<EntryHash> {
        self.prev_hash
    }
}
