//! LMDB voter directory backend.
//!
//! Implements [`ballot_store::VoterDirectory`] using the `heed` LMDB bindings.
//! Voters are keyed by phone number; secondary databases index national IDs
//! and ballot IDs back to the phone number, so both uniqueness checks and the
//! insert happen inside one write transaction.

pub mod directory;
pub mod environment;
pub mod error;

pub use directory::LmdbVoterDirectory;
pub use environment::LmdbEnvironment;
pub use error::LmdbError;
