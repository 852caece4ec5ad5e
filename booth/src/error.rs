//! User-facing booth errors.
//!
//! Every variant is recoverable: the flow that raised it stays in its current
//! state so the user can correct the input and retry.

use ballot_store::DirectoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoothError {
    #[error("agreement required: accept the terms and conditions to continue")]
    AgreementRequired,

    #[error("age requirement not met: must be at least {minimum}, is {age}")]
    AgeTooLow { age: i32, minimum: i32 },

    #[error("duplicate registration: {0}")]
    DuplicateRegistration(String),

    #[error("details required: enter your name and phone number")]
    DetailsRequired,

    #[error("invalid name: use letters and spaces only")]
    InvalidName,

    #[error("invalid phone number: must be exactly 10 digits")]
    InvalidPhoneFormat,

    #[error("invalid national ID: must be exactly 12 digits")]
    InvalidNationalIdFormat,

    #[error("invalid date of birth: {0}")]
    InvalidBirthDate(String),

    #[error("not registered: no voter found with this name and phone number")]
    NotRegistered,

    #[error("already voted: this voter has already cast a ballot")]
    AlreadyVoted,

    #[error("selection required for race '{race}'")]
    SelectionRequired { race: String },

    #[error("candidate '{candidate}' is not on the ballot for race '{race}'")]
    UnknownCandidate { race: String, candidate: String },

    #[error("race '{requested}' is not the current race '{current}'")]
    WrongRace { requested: String, current: String },

    #[error("action not available while {state}")]
    WrongState { state: &'static str },

    #[error("ballot ID required")]
    BallotIdRequired,

    #[error("invalid ballot ID: {0}")]
    InvalidBallotId(String),

    #[error("no vote recorded for this voter")]
    NoVoteRecorded,

    #[error("voter directory unavailable: {0}")]
    GatewayUnavailable(String),

    #[error("election configuration error: {0}")]
    Election(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DirectoryError> for BoothError {
    fn from(e: DirectoryError) -> Self {
        match e {
            DirectoryError::Conflict(what) => BoothError::DuplicateRegistration(what),
            DirectoryError::NotFound(_) => BoothError::NotRegistered,
            DirectoryError::AlreadyVoted(_) => BoothError::AlreadyVoted,
            DirectoryError::Unavailable(msg) | DirectoryError::Serialization(msg) => {
                BoothError::GatewayUnavailable(msg)
            }
        }
    }
}
