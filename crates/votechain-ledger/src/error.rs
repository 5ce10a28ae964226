/// Why a candidate entry was refused as the next link of the chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectionReason {
    #[error("index mismatch: expected {expected}, got {actual}")]
    IndexMismatch { expected: u64, actual: u64 },

    #[error("entry {predecessor} has no successor index")]
    IndexOverflow { predecessor: u64 },

    #[error("entry {index} does not link to the current tail")]
    PrevHashMismatch { index: u64 },

    #[error("entry {index} hash does not match its contents")]
    HashMismatch { index: u64 },

    #[error("genesis entry must not reference a previous hash")]
    GenesisHasPrevHash,
}

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("entry rejected: {0}")]
    Rejected(RejectionReason),

    #[error("invalid genesis entry: {0}")]
    InvalidGenesis(RejectionReason),

    #[error("entry {0} not found")]
    NotFound(u64),

    #[error("chain has no entries")]
    EmptyChain,

    #[error("chain lock poisoned")]
    LockPoisoned,
}

impl LedgerError {
    /// Returns `true` for a validation verdict rather than a store fault.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

impl From<RejectionReason> for LedgerError {
    fn from(reason: RejectionReason) -> Self {
        Self::Rejected(reason)
    }
}
