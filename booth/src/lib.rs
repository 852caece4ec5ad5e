//! Ballot booth flows.
//!
//! Control flow: [`registration`] → [`wizard`] → [`verification`].
//! Verification can also be entered directly with a ballot ID. Every flow
//! talks to voters only through [`ballot_store::VoterDirectory`].
//!
//! The remaining modules are display and export helpers: mock [`results`]
//! with CSV export, the verification [`certificate`], static [`help`]
//! content, and [`export`] for writing files.

pub mod certificate;
pub mod election;
pub mod error;
pub mod export;
pub mod help;
pub mod registration;
pub mod results;
pub mod verification;
pub mod wizard;

pub use election::Election;
pub use error::BoothError;
pub use registration::RegistrationForm;
pub use verification::{recover_ballot_id, verify_ballot, VerificationRecord, VerificationStatus};
pub use wizard::{CompletedBallot, VotingSession, WizardState};
