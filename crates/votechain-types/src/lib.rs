//! Foundation types for votechain.
//!
//! Every other votechain crate depends on `votechain-types`.
//!
//! # Key Types
//!
//! - [`EntryHash`]: SHA-256 digest of an entry, lowercase hex on the wire
//! - [`Timestamp`]: UTC instant with exactly one canonical text form

pub mod error;
pub mod hash;
pub mod temporal;

pub use error::TypeError;
pub use hash::EntryHash;
pub use temporal::Timestamp;
