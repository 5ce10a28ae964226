use sha2::{Digest, Sha256};
use votechain_types::{EntryHash, Timestamp};

/// SHA-256 entry hasher.
///
/// The preimage is the plain UTF-8 concatenation of the entry fields, in
/// this order and without separators:
///
/// 1. `index` in base 10
/// 2. `timestamp` in its canonical RFC 3339 form (see [`Timestamp`])
/// 3. `value` verbatim
/// 4. `prev_hash` as 64 lowercase hex characters, or nothing for genesis
///
/// This layout is a compatibility contract: any client holding an entry's
/// JSON can recompute its hash byte for byte.
pub struct EntryHasher;

impl EntryHasher {
    /// Build the exact preimage string hashed for these fields.
    pub fn preimage(
        index: u64,
        timestamp: &Timestamp,
        value: &str,
        prev_hash: Option<&EntryHash>,
    ) -> String {
        let prev = prev_hash.map(EntryHash::to_hex).unwrap_or_default();
        format!("{index}{}{value}{prev}", timestamp.to_canonical())
    }

    /// Derive the content hash of an entry from its fields.
    pub fn derive(
        index: u64,
        timestamp: &Timestamp,
        value: &str,
        prev_hash: Option<&EntryHash>,
    ) -> EntryHash {
        let preimage = Self::preimage(index, timestamp, value, prev_hash);
        Self::raw_hash(preimage.as_bytes())
    }

    /// Plain SHA-256 of arbitrary bytes.
    pub fn raw_hash(data: &[u8]) -> EntryHash {
        let mut hasher = Sha256::new();
        hasher.update(data);
        EntryHash::from_bytes(hasher.finalize().into())
    }
}
