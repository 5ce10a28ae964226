//! Cryptographic primitives for votechain.
//!
//! Provides the SHA-256 entry hash derivation shared by every component that
//! builds or checks entries, and a verifier for whole hash-linked sequences.
//!
//! All crypto operations wrap established libraries; there is no custom cryptography.

pub mod chain;
pub mod hasher;

pub use chain::{ChainError, HasEntryHash, HashChainVerifier};
pub use hasher::EntryHasher;
