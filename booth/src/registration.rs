//! Voter registration.
//!
//! One mutable form plus an `agreed` flag. Submission is a single gateway
//! call; there is no partial-save state.

use ballot_store::{DirectoryError, VoterDirectory};
use ballot_types::{NewVoter, PostalAddress, VoterRecord};
use ballot_utils::{
    compute_age, is_digit_string, is_valid_voter_name, parse_birth_date, NATIONAL_ID_LEN,
    PHONE_LEN, VOTING_AGE,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::BoothError;

/// Registration form as entered by the voter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    /// `YYYY-MM-DD`.
    pub date_of_birth: String,
    pub national_id: String,
    pub phone_number: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<PostalAddress>,
    /// Terms and conditions accepted.
    #[serde(default)]
    pub agreed: bool,
}

impl RegistrationForm {
    /// Validate the form against `today` without touching the directory.
    ///
    /// Checks run in order: agreement, name, phone, national ID, date of
    /// birth, then minimum age.
    pub fn validate(&self, today: NaiveDate) -> Result<NewVoter, BoothError> {
        if !self.agreed {
            return Err(BoothError::AgreementRequired);
        }
        if !is_valid_voter_name(&self.name) {
            return Err(BoothError::InvalidName);
        }
        let phone_number = self.phone_number.trim();
        if !is_digit_string(phone_number, PHONE_LEN) {
            return Err(BoothError::InvalidPhoneFormat);
        }
        let national_id = self.national_id.trim();
        if !is_digit_string(national_id, NATIONAL_ID_LEN) {
            return Err(BoothError::InvalidNationalIdFormat);
        }
        let date_of_birth = parse_birth_date(&self.date_of_birth)
            .map_err(|e| BoothError::InvalidBirthDate(e.to_string()))?;

        let age = compute_age(date_of_birth, today);
        if age < VOTING_AGE {
            return Err(BoothError::AgeTooLow {
                age,
                minimum: VOTING_AGE,
            });
        }

        Ok(NewVoter {
            name: self.name.trim().to_string(),
            phone_number: phone_number.to_string(),
            national_id: national_id.to_string(),
            date_of_birth,
            email: self
                .email
                .as_deref()
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string),
            address: self.address.clone(),
        })
    }

    /// Validate and register. On success the caller moves on to the voting
    /// flow with the returned record.
    pub async fn submit<D: VoterDirectory>(
        &self,
        directory: &D,
        today: NaiveDate,
    ) -> Result<VoterRecord, BoothError> {
        let voter = match self.validate(today) {
            Ok(voter) => voter,
            Err(e) => {
                tracing::warn!(error = %e, "registration rejected");
                return Err(e);
            }
        };

        match directory.insert(&voter).await {
            Ok(record) => {
                tracing::info!(name = %record.name, "voter registered");
                Ok(record)
            }
            Err(DirectoryError::Conflict(what)) => {
                tracing::warn!(%what, "duplicate registration");
                Err(BoothError::DuplicateRegistration(what))
            }
            Err(e) => {
                tracing::error!(error = %e, "voter directory insert failed");
                Err(BoothError::GatewayUnavailable(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballot_nullables::NullDirectory;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 5).unwrap()
    }

    fn form() -> RegistrationForm {
        RegistrationForm {
            name: "Asha Rao".into(),
            date_of_birth: "1990-04-12".into(),
            national_id: "123456789012".into(),
            phone_number: "9876543210".into(),
            email: Some("  ".into()),
            address: None,
            agreed: true,
        }
    }

    #[tokio::test]
    async fn registers_adult_voter() {
        let dir = NullDirectory::new();
        let record = form().submit(&dir, today()).await.unwrap();
        assert_eq!(record.name, "Asha Rao");
        assert!(record.email.is_none());
        assert!(!record.has_voted);
        assert_eq!(dir.insert_calls(), 1);
    }

    #[tokio::test]
    async fn agreement_required_skips_gateway() {
        let dir = NullDirectory::new();
        let mut f = form();
        f.agreed = false;
        let err = f.submit(&dir, today()).await.unwrap_err();
        assert!(matches!(err, BoothError::AgreementRequired));
        assert_eq!(dir.insert_calls(), 0);
    }

    #[tokio::test]
    async fn underage_rejected_day_before_birthday() {
        let dir = NullDirectory::new();
        let mut f = form();
        f.date_of_birth = "2006-11-06".into();
        let err = f.submit(&dir, today()).await.unwrap_err();
        assert!(matches!(err, BoothError::AgeTooLow { age: 17, minimum: 18 }));
        assert_eq!(dir.insert_calls(), 0);
    }

    #[tokio::test]
    async fn duplicate_phone_reported() {
        let dir = NullDirectory::new();
        form().submit(&dir, today()).await.unwrap();
        let mut again = form();
        again.national_id = "999999999999".into();
        let err = again.submit(&dir, today()).await.unwrap_err();
        assert!(matches!(err, BoothError::DuplicateRegistration(_)));
    }

    #[tokio::test]
    async fn gateway_failure_is_distinct_from_conflict() {
        let dir = NullDirectory::new();
        dir.set_unavailable(true);
        let err = form().submit(&dir, today()).await.unwrap_err();
        assert!(matches!(err, BoothError::GatewayUnavailable(_)));
    }

    #[test]
    fn format_checks() {
        let mut f = form();
        f.phone_number = "12345".into();
        assert!(matches!(f.validate(today()), Err(BoothError::InvalidPhoneFormat)));

        let mut f = form();
        f.national_id = "12345678901A".into();
        assert!(matches!(f.validate(today()), Err(BoothError::InvalidNationalIdFormat)));

        let mut f = form();
        f.date_of_birth = "not a date".into();
        assert!(matches!(f.validate(today()), Err(BoothError::InvalidBirthDate(_))));

        let mut f = form();
        f.name = "".into();
        assert!(matches!(f.validate(today()), Err(BoothError::InvalidName)));
    }
}
