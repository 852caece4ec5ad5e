//! Nullable infrastructure for deterministic testing.
//!
//! External dependencies (clock, voter directory) are abstracted so tests can
//! swap in implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically, including forced failures
//! - Never touch the filesystem or network

pub mod clock;
pub mod directory;

pub use clock::NullClock;
pub use directory::NullDirectory;
