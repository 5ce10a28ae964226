//! Append-only, hash-linked vote chain.
//!
//! This crate is the heart of votechain. It provides:
//! - The [`Entry`] model, hash-linked to its predecessor
//! - Pure construction ([`create_entry`]) and linkage checks ([`validate_entry`])
//! - `ChainReader` / `ChainWriter` trait boundaries
//! - [`ChainStore`], the single in-memory chain with serialized appends
//! - Whole-chain audit reports

pub mod entry;
pub mod error;
pub mod factory;
pub mod memory;
pub mod traits;
pub mod validation;

pub use entry::Entry;
pub use error::{LedgerError, RejectionReason};
pub use factory::{create_entry, create_entry_at, genesis, genesis_at};
pub use memory::{ChainHead, ChainStore};
pub use traits::{ChainReader, ChainWriter};
pub use validation::{check_entry, validate_entry, ChainAudit};
