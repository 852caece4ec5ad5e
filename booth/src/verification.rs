//! Ballot verification and lost-ballot-ID recovery.
//!
//! The directory records *that* a voter voted, and under which ballot ID,
//! but not what they chose. Per-race detail is therefore only available
//! when the verifier is handed the [`CompletedBallot`] from the session that
//! cast it; any later lookup yields a "verified, details unavailable" record.

use ballot_store::VoterDirectory;
use ballot_types::{BallotId, Timestamp};
use ballot_utils::{is_digit_string, PHONE_LEN};
use serde::{Deserialize, Serialize};

use crate::{BoothError, CompletedBallot};

/// Label shown when a stored selection no longer resolves to a candidate.
pub const NO_SELECTION: &str = "No selection";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationStatus {
    /// Found, with per-race selections reconstructed from the session.
    Verified,
    /// Found, but selections are not retained after the voting session.
    DetailsUnavailable,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::DetailsUnavailable => "verified (details unavailable)",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceVerification {
    pub title: String,
    /// `Name (Party)`, or [`NO_SELECTION`].
    pub selection: String,
    pub verified: bool,
}

/// Read-only view built on lookup; never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub ballot_id: BallotId,
    /// When the ballot was cast, if known from the session.
    pub cast_at: Option<Timestamp>,
    /// When this lookup ran.
    pub verified_at: Timestamp,
    pub status: VerificationStatus,
    pub races: Vec<RaceVerification>,
}

impl VerificationRecord {
    fn from_session(completed: &CompletedBallot, verified_at: Timestamp) -> Self {
        let races = completed
            .selections()
            .map(|(race, chosen)| RaceVerification {
                title: race.title.clone(),
                selection: chosen
                    .map(|c| c.label())
                    .unwrap_or_else(|| NO_SELECTION.to_string()),
                verified: chosen.is_some(),
            })
            .collect();
        Self {
            ballot_id: completed.ballot_id.clone(),
            cast_at: Some(completed.timestamp),
            verified_at,
            status: VerificationStatus::Verified,
            races,
        }
    }

    fn details_unavailable(ballot_id: BallotId, verified_at: Timestamp) -> Self {
        Self {
            ballot_id,
            cast_at: None,
            verified_at,
            status: VerificationStatus::DetailsUnavailable,
            races: Vec::new(),
        }
    }

    /// Text offered through the share / copy-to-clipboard action.
    pub fn share_text(&self) -> String {
        let when = self.cast_at.unwrap_or(self.verified_at);
        format!(
            "My vote has been verified!\n\nBallot ID: {}\nTimestamp: {}\nStatus: Verified ✓\n\nSecure E-Voting System",
            self.ballot_id,
            when.to_human()
        )
    }
}

/// Look a ballot up by ID.
///
/// `handoff` is the just-completed ballot from the voting session, if the
/// user arrived straight from the wizard.
pub async fn verify_ballot<D: VoterDirectory>(
    directory: &D,
    raw_ballot_id: &str,
    handoff: Option<&CompletedBallot>,
    now: Timestamp,
) -> Result<VerificationRecord, BoothError> {
    if raw_ballot_id.trim().is_empty() {
        return Err(BoothError::BallotIdRequired);
    }
    let ballot_id = BallotId::parse(raw_ballot_id)
        .map_err(|_| BoothError::InvalidBallotId(raw_ballot_id.trim().to_string()))?;

    let found = directory
        .find_by_ballot_id(&ballot_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "ballot lookup failed");
            BoothError::GatewayUnavailable(e.to_string())
        })?;
    if found.is_none() {
        tracing::warn!(%ballot_id, "unknown ballot ID");
        return Err(BoothError::InvalidBallotId(ballot_id.to_string()));
    }

    let record = match handoff {
        Some(completed) if completed.ballot_id == ballot_id => {
            VerificationRecord::from_session(completed, now)
        }
        _ => VerificationRecord::details_unavailable(ballot_id, now),
    };
    tracing::info!(ballot_id = %record.ballot_id, status = record.status.as_str(), "ballot verified");
    Ok(record)
}

/// Recover a lost ballot ID from the voter's name and phone number.
pub async fn recover_ballot_id<D: VoterDirectory>(
    directory: &D,
    name: &str,
    phone: &str,
) -> Result<BallotId, BoothError> {
    let (name, phone) = (name.trim(), phone.trim());
    if name.is_empty() || phone.is_empty() {
        return Err(BoothError::DetailsRequired);
    }
    if !is_digit_string(phone, PHONE_LEN) {
        return Err(BoothError::InvalidPhoneFormat);
    }

    let voter = directory
        .find_by_name_and_phone(name, phone)
        .await
        .map_err(|e| BoothError::GatewayUnavailable(e.to_string()))?
        .ok_or(BoothError::NotRegistered)?;

    match voter.ballot_id {
        Some(id) if voter.has_voted => Ok(id),
        _ => Err(BoothError::NoVoteRecorded),
    }
}
