use crate::entry::Entry;
use crate::error::LedgerError;

/// Write boundary for chain append operations.
pub trait ChainWriter: Send + Sync {
    /// Build the successor of the current tail carrying `value` and commit it.
    fn append(&self, value: &str) -> Result<Entry, LedgerError>;

    /// Validate a pre-built candidate against the current tail and commit it.
    fn append_entry(&self, candidate: Entry) -> Result<Entry, LedgerError>;
}

/// Read boundary for chain queries.
pub trait ChainReader: Send + Sync {
    /// Snapshot of the full chain in index order.
    fn get_all(&self) -> Result<Vec<Entry>, LedgerError>;

    fn tail(&self) -> Result<Entry, LedgerError>;

    fn get(&self, index: u64) -> Result<Entry, LedgerError>;

    fn len(&self) -> Result<u64, LedgerError>;
}
