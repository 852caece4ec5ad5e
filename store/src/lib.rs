//! Abstract voter directory gateway.
//!
//! Every directory backend (local LMDB, remote REST table, in-memory for
//! testing) implements [`VoterDirectory`]. The booth flows depend only on
//! the trait.

pub mod directory;
pub mod error;

pub use directory::VoterDirectory;
pub use error::DirectoryError;
