use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use votechain_types::EntryHash;

use crate::entry::Entry;
use crate::error::LedgerError;
use crate::factory::{create_entry, genesis};
use crate::traits::{ChainReader, ChainWriter};
use crate::validation::{check_entry, check_genesis, ChainAudit};

/// The canonical in-memory vote chain.
///
/// A store only exists once genesis is in place, so there is no observable
/// uninitialized state. A single `RwLock` guards the sequence: appends hold
/// the write guard from reading the tail through committing the new entry,
/// which keeps the chain linear under concurrent callers. Reads clone a
/// snapshot under the read guard.
pub struct ChainStore {
    inner: RwLock<ChainState>,
}

/// Length and tail hash of the chain, read together.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainHead {
    pub length: u64,
    pub hash: EntryHash,
}

struct ChainState {
    entries: Vec<Entry>,
}

impl ChainState {
    fn tail(&self) -> Result<&Entry, LedgerError> {
        self.entries.last().ok_or(LedgerError::EmptyChain)
    }

    fn commit(&mut self, candidate: Entry) -> Result<Entry, LedgerError> {
        let tail = self.tail()?;
        if let Err(reason) = check_entry(&candidate, tail) {
            tracing::warn!(
                index = candidate.index,
                tail = tail.index,
                %reason,
                "rejected chain entry"
            );
            return Err(LedgerError::Rejected(reason));
        }

        tracing::debug!(index = candidate.index, hash = %candidate.hash, "appended chain entry");
        self.entries.push(candidate.clone());
        Ok(candidate)
    }
}

impl ChainStore {
    /// Create the chain with a freshly stamped genesis entry.
    pub fn initialize() -> Self {
        let store = Self::from_genesis(genesis());
        tracing::info!("vote chain initialized");
        store
    }

    /// Create the chain from a caller-built genesis entry.
    pub fn with_genesis(entry: Entry) -> Result<Self, LedgerError> {
        check_genesis(&entry).map_err(LedgerError::InvalidGenesis)?;
        Ok(Self::from_genesis(entry))
    }

    fn from_genesis(entry: Entry) -> Self {
        tracing::info!(hash = %entry.hash, timestamp = %entry.timestamp, "genesis entry");
        Self {
            inner: RwLock::new(ChainState {
                entries: vec![entry],
            }),
        }
    }

    /// Current length and tail hash from a single read.
    pub fn head(&self) -> Result<ChainHead, LedgerError> {
        let state = self.read()?;
        let tail = state.tail()?;
        Ok(ChainHead {
            length: state.entries.len() as u64,
            hash: tail.hash,
        })
    }

    /// Verify every entry and link of the current chain.
    ///
    /// Rehashes every entry under the read guard; keep it off hot paths.
    pub fn audit(&self) -> Result<ChainAudit, LedgerError> {
        let state = self.read()?;
        let head = state.tail()?.hash;
        Ok(ChainAudit::of(&state.entries, head))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, ChainState>, LedgerError> {
        self.inner.read().map_err(|_| LedgerError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, ChainState>, LedgerError> {
        self.inner.write().map_err(|_| LedgerError::LockPoisoned)
    }
}

impl ChainWriter for ChainStore {
    fn append(&self, value: &str) -> Result<Entry, LedgerError> {
        let mut state = self.write()?;
        let candidate = create_entry(state.tail()?, value);
        state.commit(candidate)
    }

    fn append_entry(&self, candidate: Entry) -> Result<Entry, LedgerError> {
        let mut state = self.write()?;
        state.commit(candidate)
    }
}

impl ChainReader for ChainStore {
    fn get_all(&self) -> Result<Vec<Entry>, LedgerError> {
        Ok(self.read()?.entries.clone())
    }

    fn tail(&self) -> Result<Entry, LedgerError> {
        self.read()?.tail().cloned()
    }

    fn get(&self, index: u64) -> Result<Entry, LedgerError> {
        let state = self.read()?;
        usize::try_from(index)
            .ok()
            .and_then(|i| state.entries.get(i))
            .cloned()
            .ok_or(LedgerError::NotFound(index))
    }

    fn len(&self) -> Result<u64, LedgerError> {
        Ok(self.read()?.entries.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use votechain_crypto::EntryHasher;
    use votechain_types::{EntryHash, Timestamp};

    use super::*;
    use crate::error::RejectionReason;
    use crate::factory::{create_entry_at, genesis_at};

    #[test]
    fn genesis_invariant() {
        let store = ChainStore::initialize();
        let all = store.get_all().unwrap();
        assert_eq!(all.len(), 1);
        let g = &all[0];
        assert_eq!(g.index, 0);
        assert_eq!(g.value, "");
        assert_eq!(g.prev_hash, None);
        assert_eq!(g.hash, EntryHasher::derive(0, &g.timestamp, "", None));
    }

    #[test]
    fn append_extends_tail() {
        let store = ChainStore::initialize();
        let before = store.tail().unwrap();

        let added = store.append("x").unwrap();
        assert_eq!(added.index, before.index + 1);
        assert_eq!(added.prev_hash, Some(before.hash));
        assert!(added.verify_hash());
        assert_eq!(store.len().unwrap(), 2);
        assert_eq!(store.tail().unwrap(), added);
    }

    #[test]
    fn forged_index_rejected_without_change() {
        let store = ChainStore::initialize();
        store.append("yes").unwrap();
        let tail = store.tail().unwrap();

        let mut forged = create_entry(&tail, "no");
        forged.index = 5;
        forged.hash = EntryHasher::derive(5, &forged.timestamp, "no", forged.prev_hash.as_ref());

        let err = store.append_entry(forged).unwrap_err();
        assert_eq!(
            err,
            LedgerError::Rejected(RejectionReason::IndexMismatch {
                expected: 2,
                actual: 5
            })
        );
        assert!(err.is_rejection());
        assert_eq!(store.len().unwrap(), 2);
        assert_eq!(store.tail().unwrap(), tail);
    }

    #[test]
    fn foreign_prev_hash_rejected_without_change() {
        let store = ChainStore::initialize();
        let tail = store.tail().unwrap();

        let mut forged = create_entry(&tail, "no");
        forged.prev_hash = Some(EntryHash::from_bytes([3; 32]));

        assert!(matches!(
            store.append_entry(forged),
            Err(LedgerError::Rejected(RejectionReason::PrevHashMismatch { index: 1 }))
        ));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn tampered_value_rejected_without_change() {
        let store = ChainStore::initialize();
        let tail = store.tail().unwrap();

        let mut forged = create_entry(&tail, "yes");
        forged.value = "no".into();

        assert!(matches!(
            store.append_entry(forged),
            Err(LedgerError::Rejected(RejectionReason::HashMismatch { index: 1 }))
        ));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn prebuilt_successor_accepted() {
        let store = ChainStore::initialize();
        let tail = store.tail().unwrap();
        let candidate = create_entry(&tail, "manual");
        let committed = store.append_entry(candidate.clone()).unwrap();
        assert_eq!(committed, candidate);
        assert_eq!(store.get(1).unwrap(), candidate);
    }

    #[test]
    fn stale_candidate_rejected_after_concurrent_append() {
        let store = ChainStore::initialize();
        let tail = store.tail().unwrap();
        let stale = create_entry(&tail, "late");
        store.append("early").unwrap();

        assert!(store.append_entry(stale).unwrap_err().is_rejection());
        assert_eq!(store.len().unwrap(), 2);
        assert!(store.audit().unwrap().is_valid());
    }

    #[test]
    fn chain_usable_after_rejections() {
        let store = ChainStore::initialize();
        for _ in 0..3 {
            let mut forged = create_entry(&store.tail().unwrap(), "bad");
            forged.index += 1;
            assert!(store.append_entry(forged).is_err());
        }
        store.append("good").unwrap();
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn repeated_reads_identical() {
        let store = ChainStore::initialize();
        store.append("a").unwrap();
        store.append("b").unwrap();
        let first = store.get_all().unwrap();
        let second = store.get_all().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn head_tracks_tail() {
        let store = ChainStore::initialize();
        let added = store.append("a").unwrap();
        assert_eq!(
            store.head().unwrap(),
            ChainHead {
                length: 2,
                hash: added.hash
            }
        );
    }

    #[test]
    fn empty_state_reports_error() {
        let mut state = ChainState { entries: vec![] };
        assert!(matches!(state.tail(), Err(LedgerError::EmptyChain)));
        let candidate = create_entry(&genesis(), "x");
        assert_eq!(state.commit(candidate), Err(LedgerError::EmptyChain));
    }

    #[test]
    fn get_out_of_range() {
        let store = ChainStore::initialize();
        assert_eq!(store.get(7), Err(LedgerError::NotFound(7)));
    }

    #[test]
    fn with_genesis_accepts_valid_entry() {
        let g = genesis_at(Timestamp::from_unix(1_704_164_645, 123_456_789).unwrap());
        let store = ChainStore::with_genesis(g.clone()).unwrap();
        assert_eq!(store.get_all().unwrap(), vec![g.clone()]);

        let next = create_entry_at(&g, "yes", Timestamp::from_unix(1_704_164_646, 0).unwrap());
        store.append_entry(next).unwrap();
        assert_eq!(
            store.tail().unwrap().hash.to_hex(),
            "cc9d12c3f888f6863d077904a1cc08b60c18a7f210d78e02967ecc813abd44d0"
        );
    }

    #[test]
    fn with_genesis_rejects_non_genesis() {
        let g = genesis();
        let next = create_entry(&g, "x");
        assert!(matches!(
            ChainStore::with_genesis(next),
            Err(LedgerError::InvalidGenesis(_))
        ));
    }

    #[test]
    fn concurrent_appends_form_one_chain() {
        const THREADS: usize = 16;
        const PER_THREAD: usize = 25;

        let store = Arc::new(ChainStore::initialize());
        let initial = store.len().unwrap();

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..PER_THREAD {
                        store.append(&format!("t{t}-{i}")).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let all = store.get_all().unwrap();
        assert_eq!(all.len() as u64, initial + (THREADS * PER_THREAD) as u64);
        for (i, entry) in all.iter().enumerate() {
            assert_eq!(entry.index, i as u64);
        }
        for pair in all.windows(2) {
            assert!(crate::validate_entry(&pair[1], &pair[0]));
        }
        let values: HashSet<_> = all.iter().skip(1).map(|e| e.value.clone()).collect();
        assert_eq!(values.len(), THREADS * PER_THREAD);
        assert!(store.audit().unwrap().is_valid());
    }

    #[test]
    fn readers_never_see_torn_entries() {
        let store = Arc::new(ChainStore::initialize());
        let writer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..200 {
                    store.append(&i.to_string()).unwrap();
                }
            })
        };
        let reader = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..200 {
                    let snapshot = store.get_all().unwrap();
                    assert!(!snapshot.is_empty());
                    assert!(snapshot.iter().all(Entry::verify_hash));
                    for pair in snapshot.windows(2) {
                        assert_eq!(pair[1].prev_hash, Some(pair[0].hash));
                    }
                }
            })
        };
        writer.join().unwrap();
        reader.join().unwrap();
        assert_eq!(store.len().unwrap(), 201);
    }
}
