//! Fundamental types for the ballot booth.
//!
//! This crate defines the data model shared across every other crate in the
//! workspace: voter records, races and candidates, ballots, ballot IDs and
//! timestamps.

pub mod ballot;
pub mod error;
pub mod race;
pub mod time;
pub mod voter;

pub use ballot::{Ballot, BallotId};
pub use error::TypeError;
pub use race::{Candidate, Race};
pub use time::Timestamp;
pub use voter::{NewVoter, PostalAddress, VoterRecord};
