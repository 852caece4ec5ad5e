//! Shared utilities for the ballot booth.

pub mod ballot_id;
pub mod logging;
pub mod validation;

pub use ballot_id::generate_ballot_id;
pub use logging::{init_logging, LogFormat};
pub use validation::{
    compute_age, is_digit_string, is_valid_voter_name, parse_birth_date, NATIONAL_ID_LEN,
    PHONE_LEN, VOTING_AGE,
};
