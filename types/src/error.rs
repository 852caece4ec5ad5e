//! Errors raised while parsing model types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid ballot ID: {0}")]
    InvalidBallotId(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),
}
