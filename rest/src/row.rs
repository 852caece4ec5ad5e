//! Wire shape of a row in the hosted voter table.

use ballot_types::{BallotId, NewVoter, PostalAddress, VoterRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Flat column layout used by the REST API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VoterRow {
    pub name: String,
    pub phone_number: String,
    pub national_id: String,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub street_address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub ballot_id: Option<String>,
    #[serde(default)]
    pub has_voted: bool,
}

impl From<&NewVoter> for VoterRow {
    fn from(voter: &NewVoter) -> Self {
        let address = voter.address.clone();
        Self {
            name: voter.name.clone(),
            phone_number: voter.phone_number.clone(),
            national_id: voter.national_id.clone(),
            date_of_birth: voter.date_of_birth,
            email: voter.email.clone(),
            street_address: address.as_ref().map(|a| a.street.clone()),
            city: address.as_ref().map(|a| a.city.clone()),
            state: address.as_ref().map(|a| a.state.clone()),
            zip_code: address.map(|a| a.zip_code),
            ballot_id: None,
            has_voted: false,
        }
    }
}

impl VoterRow {
    /// Convert into the domain record.
    ///
    /// A stored ballot ID that no longer parses is dropped rather than
    /// failing the whole lookup.
    pub fn into_record(self) -> VoterRecord {
        let address = match (self.street_address, self.city, self.state, self.zip_code) {
            (None, None, None, None) => None,
            (street, city, state, zip_code) => Some(PostalAddress {
                street: street.unwrap_or_default(),
                city: city.unwrap_or_default(),
                state: state.unwrap_or_default(),
                zip_code: zip_code.unwrap_or_default(),
            }),
        };
        let ballot_id = self.ballot_id.as_deref().and_then(|raw| match BallotId::parse(raw) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring malformed ballot ID in voter row");
                None
            }
        });
        VoterRecord {
            name: self.name,
            phone_number: self.phone_number,
            national_id: self.national_id,
            date_of_birth: self.date_of_birth,
            email: self.email,
            address,
            ballot_id,
            has_voted: self.has_voted,
        }
    }
}
