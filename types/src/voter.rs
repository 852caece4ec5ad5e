//! Voter identity records held by the voter directory.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ballot::BallotId;

/// A registration payload, before the directory has accepted it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVoter {
    pub name: String,
    /// Exactly 10 decimal digits; unique across the directory.
    pub phone_number: String,
    /// Exactly 12 decimal digits; unique across the directory.
    pub national_id: String,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<PostalAddress>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

/// A voter known to the directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterRecord {
    pub name: String,
    pub phone_number: String,
    pub national_id: String,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<PostalAddress>,
    /// Assigned once, when the voter's ballot is recorded.
    #[serde(default)]
    pub ballot_id: Option<BallotId>,
    /// Transitions false -> true exactly once.
    #[serde(default)]
    pub has_voted: bool,
}

impl VoterRecord {
    /// A fresh record for a newly registered voter.
    pub fn registered(voter: NewVoter) -> Self {
        Self {
            name: voter.name,
            phone_number: voter.phone_number,
            national_id: voter.national_id,
            date_of_birth: voter.date_of_birth,
            email: voter.email,
            address: voter.address,
            ballot_id: None,
            has_voted: false,
        }
    }

    /// Mark this voter as having voted with the given ballot.
    ///
    /// Returns `false` and leaves the record untouched if the voter has
    /// already voted.
    pub fn mark_voted(&mut self, ballot_id: BallotId) -> bool {
        if self.has_voted {
            return false;
        }
        self.has_voted = true;
        self.ballot_id = Some(ballot_id);
        true
    }
}
