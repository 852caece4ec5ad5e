//! The voting wizard.
//!
//! A finite-state machine stepping a verified voter through the election's
//! races in order:
//!
//! ```text
//! RegistrationCheck ──yes──▶ IdentityVerification ──found, not voted──▶ InProgress(0)
//!        │                          │                                      │ next / previous
//!        └──no──▶ NeedsRegistration └──back──▶ RegistrationCheck            ▼
//!                                                                  InProgress(n-1) ──next──▶ Complete
//!                                                                                               │ already voted
//!                                                                                               ▼
//!                                                                                            Rejected
//! ```
//!
//! Transitions are reducers on [`WizardState`] that return the next state
//! and never mutate; [`VotingSession`] is the single controller that applies
//! them and owns the gateway calls. A rejected transition leaves the session
//! exactly where it was.

use ballot_store::{DirectoryError, VoterDirectory};
use ballot_types::{Ballot, BallotId, Candidate, Race, Timestamp, VoterRecord};
use ballot_utils::{generate_ballot_id, is_digit_string, is_valid_voter_name, PHONE_LEN};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{BoothError, Election};

/// Everything the verification view needs from a finished wizard.
///
/// Handed forward by value; never re-fetched from the directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedBallot {
    pub ballot_id: BallotId,
    pub timestamp: Timestamp,
    pub votes: Ballot,
    pub races: Vec<Race>,
}

impl CompletedBallot {
    /// Each race in ballot order with the chosen candidate, if it still
    /// resolves against the race definition.
    pub fn selections(&self) -> impl Iterator<Item = (&Race, Option<&Candidate>)> {
        self.races.iter().map(|race| {
            let chosen = self
                .votes
                .selection(&race.id)
                .and_then(|id| race.candidate(id));
            (race, chosen)
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WizardState {
    /// "Are you registered?" prompt.
    RegistrationCheck,
    /// Collecting name and phone for the directory lookup.
    IdentityVerification,
    /// The voter answered "no"; they leave the wizard for registration.
    NeedsRegistration,
    /// Voting on the race at `index`.
    InProgress { index: usize, ballot: Ballot },
    /// Ballot cast; immutable from here on.
    Complete(CompletedBallot),
    /// The directory refused the ballot because the voter's vote was already
    /// recorded by another session. Terminal; the ballot ID is discarded.
    Rejected,
}

impl WizardState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::RegistrationCheck => "checking registration",
            Self::IdentityVerification => "verifying identity",
            Self::NeedsRegistration => "awaiting registration",
            Self::InProgress { .. } => "voting",
            Self::Complete(_) => "complete",
            Self::Rejected => "rejected",
        }
    }

    fn wrong_state(&self) -> BoothError {
        BoothError::WrongState { state: self.name() }
    }

    pub fn answer_registration_check(&self, registered: bool) -> Result<Self, BoothError> {
        match self {
            Self::RegistrationCheck if registered => Ok(Self::IdentityVerification),
            Self::RegistrationCheck => Ok(Self::NeedsRegistration),
            _ => Err(self.wrong_state()),
        }
    }

    pub fn back_to_registration_check(&self) -> Result<Self, BoothError> {
        match self {
            Self::IdentityVerification => Ok(Self::RegistrationCheck),
            _ => Err(self.wrong_state()),
        }
    }

    /// Apply the outcome of the identity lookup.
    pub fn identity_checked(&self, voter: Option<&VoterRecord>) -> Result<Self, BoothError> {
        if *self != Self::IdentityVerification {
            return Err(self.wrong_state());
        }
        match voter {
            None => Err(BoothError::NotRegistered),
            Some(v) if v.has_voted => Err(BoothError::AlreadyVoted),
            Some(_) => Ok(Self::InProgress {
                index: 0,
                ballot: Ballot::new(),
            }),
        }
    }

    /// Record a selection for the current race, replacing any earlier one.
    pub fn select(
        &self,
        election: &Election,
        race_id: &str,
        candidate_id: &str,
    ) -> Result<Self, BoothError> {
        let Self::InProgress { index, ballot } = self else {
            return Err(self.wrong_state());
        };
        let race = election
            .races
            .get(*index)
            .ok_or_else(|| self.wrong_state())?;
        if race.id != race_id {
            return Err(BoothError::WrongRace {
                requested: race_id.to_string(),
                current: race.id.clone(),
            });
        }
        if race.candidate(candidate_id).is_none() {
            return Err(BoothError::UnknownCandidate {
                race: race_id.to_string(),
                candidate: candidate_id.to_string(),
            });
        }
        let mut ballot = ballot.clone();
        ballot.select(race_id, candidate_id);
        Ok(Self::InProgress {
            index: *index,
            ballot,
        })
    }

    /// Leave the current race. From the last race this issues the ballot ID
    /// and completes the wizard.
    pub fn next<R: Rng + ?Sized>(
        &self,
        election: &Election,
        rng: &mut R,
        now: Timestamp,
    ) -> Result<Self, BoothError> {
        let Self::InProgress { index, ballot } = self else {
            return Err(self.wrong_state());
        };
        let race = election
            .races
            .get(*index)
            .ok_or_else(|| self.wrong_state())?;
        if !ballot.contains(&race.id) {
            return Err(BoothError::SelectionRequired {
                race: race.id.clone(),
            });
        }
        if index + 1 < election.len() {
            return Ok(Self::InProgress {
                index: index + 1,
                ballot: ballot.clone(),
            });
        }
        Ok(Self::Complete(CompletedBallot {
            ballot_id: generate_ballot_id(rng, now.year()),
            timestamp: now,
            votes: ballot.clone(),
            races: election.races.clone(),
        }))
    }

    /// Step back one race, keeping every selection. No-op at the first race
    /// and outside the voting stage.
    pub fn previous(&self) -> Self {
        match self {
            Self::InProgress { index, ballot } if *index > 0 => Self::InProgress {
                index: index - 1,
                ballot: ballot.clone(),
            },
            other => other.clone(),
        }
    }
}

/// One voter's pass through the wizard.
pub struct VotingSession {
    election: Election,
    state: WizardState,
    voter: Option<VoterRecord>,
    recorded: bool,
}

impl VotingSession {
    pub fn new(election: Election) -> Self {
        Self {
            election,
            state: WizardState::RegistrationCheck,
            voter: None,
            recorded: false,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn election(&self) -> &Election {
        &self.election
    }

    /// The voter whose identity was verified, once past identity checks.
    pub fn voter(&self) -> Option<&VoterRecord> {
        self.voter.as_ref()
    }

    fn transition(&mut self, next: WizardState) {
        tracing::debug!(from = self.state.name(), to = next.name(), "wizard transition");
        self.state = next;
    }

    pub fn answer_registration_check(&mut self, registered: bool) -> Result<(), BoothError> {
        let next = self.state.answer_registration_check(registered)?;
        self.transition(next);
        Ok(())
    }

    pub fn back_to_registration_check(&mut self) -> Result<(), BoothError> {
        let next = self.state.back_to_registration_check()?;
        self.transition(next);
        Ok(())
    }

    /// Look the voter up by name and phone and, if eligible, start voting.
    pub async fn verify_identity<D: VoterDirectory>(
        &mut self,
        directory: &D,
        name: &str,
        phone: &str,
    ) -> Result<(), BoothError> {
        if self.state != WizardState::IdentityVerification {
            return Err(self.state.wrong_state());
        }
        let (name, phone) = (name.trim(), phone.trim());
        if name.is_empty() || phone.is_empty() {
            return Err(BoothError::DetailsRequired);
        }
        if !is_valid_voter_name(name) {
            return Err(BoothError::InvalidName);
        }
        if !is_digit_string(phone, PHONE_LEN) {
            return Err(BoothError::InvalidPhoneFormat);
        }

        let found = directory
            .find_by_name_and_phone(name, phone)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "identity lookup failed");
                BoothError::GatewayUnavailable(e.to_string())
            })?;

        match self.state.identity_checked(found.as_ref()) {
            Ok(next) => {
                tracing::info!(%name, "identity verified");
                self.voter = found;
                self.transition(next);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(%name, error = %e, "identity rejected");
                Err(e)
            }
        }
    }

    pub fn select(&mut self, race_id: &str, candidate_id: &str) -> Result<(), BoothError> {
        let next = self.state.select(&self.election, race_id, candidate_id)?;
        self.transition(next);
        Ok(())
    }

    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Timestamp) -> Result<(), BoothError> {
        let next = self.state.next(&self.election, rng, now)?;
        if let WizardState::Complete(done) = &next {
            tracing::info!(ballot_id = %done.ballot_id, "ballot cast");
        }
        self.transition(next);
        Ok(())
    }

    pub fn previous(&mut self) {
        let next = self.state.previous();
        self.transition(next);
    }

    /// The race being voted on.
    pub fn current_race(&self) -> Option<&Race> {
        match &self.state {
            WizardState::InProgress { index, .. } => self.election.races.get(*index),
            _ => None,
        }
    }

    /// The recorded choice for the current race, to pre-populate the control.
    pub fn current_selection(&self) -> Option<&str> {
        match &self.state {
            WizardState::InProgress { index, ballot } => self
                .election
                .races
                .get(*index)
                .and_then(|race| ballot.selection(&race.id)),
            _ => None,
        }
    }

    /// `(index + 1) / total` while voting.
    pub fn progress(&self) -> Option<f64> {
        match &self.state {
            WizardState::InProgress { index, .. } => {
                Some((*index as f64 + 1.0) / self.election.len() as f64)
            }
            _ => None,
        }
    }

    pub fn progress_percent(&self) -> Option<f64> {
        self.progress().map(|p| p * 100.0)
    }

    pub fn ballot(&self) -> Option<&Ballot> {
        match &self.state {
            WizardState::InProgress { ballot, .. } => Some(ballot),
            WizardState::Complete(done) => Some(&done.votes),
            _ => None,
        }
    }

    pub fn completed(&self) -> Option<&CompletedBallot> {
        match &self.state {
            WizardState::Complete(done) => Some(done),
            _ => None,
        }
    }

    /// Hand the finished ballot to the verification view.
    pub fn into_completed(self) -> Option<CompletedBallot> {
        match self.state {
            WizardState::Complete(done) => Some(done),
            _ => None,
        }
    }

    /// Whether the directory has acknowledged the completed vote.
    pub fn is_recorded(&self) -> bool {
        self.recorded
    }

    /// Mark the voter as voted in the directory and attach the ballot ID.
    ///
    /// One best-effort call. A transport failure leaves the session
    /// `Complete` and the call may be retried; once acknowledged, further
    /// calls are no-ops. If the directory reports the voter as already voted,
    /// another session won: the session moves to `Rejected`, the ballot is
    /// dropped and `AlreadyVoted` is returned.
    pub async fn record_completion<D: VoterDirectory>(
        &mut self,
        directory: &D,
    ) -> Result<(), BoothError> {
        let WizardState::Complete(done) = &self.state else {
            return Err(self.state.wrong_state());
        };
        if self.recorded {
            return Ok(());
        }
        let Some(voter) = &self.voter else {
            return Err(self.state.wrong_state());
        };

        match directory.record_vote(&voter.phone_number, &done.ballot_id).await {
            Ok(record) => {
                tracing::info!(ballot_id = %done.ballot_id, "vote recorded in directory");
                self.voter = Some(record);
                self.recorded = true;
                Ok(())
            }
            Err(DirectoryError::AlreadyVoted(_)) => {
                tracing::warn!(ballot_id = %done.ballot_id, "ballot refused, voter already voted");
                self.transition(WizardState::Rejected);
                Err(BoothError::AlreadyVoted)
            }
            Err(e) => {
                tracing::error!(ballot_id = %done.ballot_id, error = %e, "failed to record vote");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballot_nullables::NullDirectory;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn voter(has_voted: bool) -> VoterRecord {
        let mut record = VoterRecord::registered(ballot_types::NewVoter {
            name: "Asha Rao".into(),
            phone_number: "9876543210".into(),
            national_id: "123456789012".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
            email: None,
            address: None,
        });
        if has_voted {
            record.mark_voted(BallotId::parse("VT-2024-AAAAAAAAA").unwrap());
        }
        record
    }

    async fn voting_session(dir: &NullDirectory) -> VotingSession {
        let mut session = VotingSession::new(Election::default());
        session.answer_registration_check(true).unwrap();
        session
            .verify_identity(dir, "Asha Rao", "9876543210")
            .await
            .unwrap();
        session
    }

    fn now() -> Timestamp {
        Timestamp::new(1_730_817_025)
    }

    #[test]
    fn answering_no_exits_to_registration() {
        let mut session = VotingSession::new(Election::default());
        session.answer_registration_check(false).unwrap();
        assert_eq!(*session.state(), WizardState::NeedsRegistration);
    }

    #[test]
    fn back_returns_to_registration_check() {
        let mut session = VotingSession::new(Election::default());
        session.answer_registration_check(true).unwrap();
        session.back_to_registration_check().unwrap();
        assert_eq!(*session.state(), WizardState::RegistrationCheck);
    }

    #[tokio::test]
    async fn unknown_voter_stays_in_identity_verification() {
        let dir = NullDirectory::new();
        let mut session = VotingSession::new(Election::default());
        session.answer_registration_check(true).unwrap();
        let err = session
            .verify_identity(&dir, "Asha Rao", "9876543210")
            .await
            .unwrap_err();
        assert!(matches!(err, BoothError::NotRegistered));
        assert_eq!(*session.state(), WizardState::IdentityVerification);
    }

    #[tokio::test]
    async fn already_voted_never_advances() {
        let dir = NullDirectory::with_voters([voter(true)]);
        let mut session = VotingSession::new(Election::default());
        session.answer_registration_check(true).unwrap();
        for _ in 0..2 {
            let err = session
                .verify_identity(&dir, "Asha Rao", "9876543210")
                .await
                .unwrap_err();
            assert!(matches!(err, BoothError::AlreadyVoted));
            assert_eq!(*session.state(), WizardState::IdentityVerification);
        }
    }

    #[tokio::test]
    async fn bad_phone_skips_lookup() {
        let dir = NullDirectory::with_voters([voter(false)]);
        let mut session = VotingSession::new(Election::default());
        session.answer_registration_check(true).unwrap();
        let err = session
            .verify_identity(&dir, "Asha Rao", "98765")
            .await
            .unwrap_err();
        assert!(matches!(err, BoothError::InvalidPhoneFormat));
        let err = session.verify_identity(&dir, "", "").await.unwrap_err();
        assert!(matches!(err, BoothError::DetailsRequired));
        assert_eq!(dir.lookup_calls(), 0);
    }

    #[tokio::test]
    async fn gateway_error_is_not_not_found() {
        let dir = NullDirectory::with_voters([voter(false)]);
        dir.set_unavailable(true);
        let mut session = VotingSession::new(Election::default());
        session.answer_registration_check(true).unwrap();
        let err = session
            .verify_identity(&dir, "Asha Rao", "9876543210")
            .await
            .unwrap_err();
        assert!(matches!(err, BoothError::GatewayUnavailable(_)));
    }

    #[tokio::test]
    async fn next_requires_selection() {
        let dir = NullDirectory::with_voters([voter(false)]);
        let mut session = voting_session(&dir).await;
        let mut rng = StdRng::seed_from_u64(1);
        let err = session.next(&mut rng, now()).unwrap_err();
        assert!(matches!(err, BoothError::SelectionRequired { ref race } if race == "president"));
        assert_eq!(session.ballot().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn previous_at_first_race_is_noop() {
        let dir = NullDirectory::with_voters([voter(false)]);
        let mut session = voting_session(&dir).await;
        session.select("president", "candidate-2").unwrap();
        let before = session.state().clone();
        session.previous();
        assert_eq!(*session.state(), before);
    }

    #[tokio::test]
    async fn revisiting_preserves_and_overwrites_selection() {
        let dir = NullDirectory::with_voters([voter(false)]);
        let mut session = voting_session(&dir).await;
        let mut rng = StdRng::seed_from_u64(1);
        session.select("president", "candidate-2").unwrap();
        session.next(&mut rng, now()).unwrap();
        session.previous();
        assert_eq!(session.current_selection(), Some("candidate-2"));
        session.select("president", "candidate-3").unwrap();
        assert_eq!(session.ballot().unwrap().len(), 1);
        assert_eq!(
            session.ballot().unwrap().selection("president"),
            Some("candidate-3")
        );
    }

    #[tokio::test]
    async fn cannot_select_for_unvisited_race() {
        let dir = NullDirectory::with_voters([voter(false)]);
        let mut session = voting_session(&dir).await;
        let err = session.select("referendum-1", "ref-yes").unwrap_err();
        assert!(matches!(err, BoothError::WrongRace { .. }));
        let err = session.select("president", "cm-1").unwrap_err();
        assert!(matches!(err, BoothError::UnknownCandidate { .. }));
        assert!(session.ballot().unwrap().is_empty());
    }

    #[tokio::test]
    async fn progress_tracks_race_index() {
        let dir = NullDirectory::with_voters([voter(false)]);
        let mut session = voting_session(&dir).await;
        let mut rng = StdRng::seed_from_u64(1);
        assert!(VotingSession::new(Election::default()).progress().is_none());
        let first = session.progress_percent().unwrap();
        assert!((first - 100.0 / 3.0).abs() < 1e-9);
        session.select("president", "candidate-1").unwrap();
        session.next(&mut rng, now()).unwrap();
        let second = session.progress_percent().unwrap();
        assert!((second - 200.0 / 3.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn completion_is_recorded_once() {
        let dir = NullDirectory::with_voters([voter(false)]);
        let mut session = voting_session(&dir).await;
        let mut rng = StdRng::seed_from_u64(9);
        for (race, choice) in [
            ("president", "candidate-1"),
            ("chief-minister", "cm-2"),
            ("referendum-1", "ref-yes"),
        ] {
            session.select(race, choice).unwrap();
            session.next(&mut rng, now()).unwrap();
        }
        let ballot_id = session.completed().unwrap().ballot_id.clone();
        assert!(ballot_id.as_str().starts_with("VT-2024-"));

        session.record_completion(&dir).await.unwrap();
        session.record_completion(&dir).await.unwrap();
        assert_eq!(dir.record_vote_calls(), 1);
        let stored = dir.get("9876543210").unwrap();
        assert!(stored.has_voted);
        assert_eq!(stored.ballot_id, Some(ballot_id));
    }

    #[tokio::test]
    async fn failed_recording_keeps_complete_state() {
        let dir = NullDirectory::with_voters([voter(false)]);
        let mut session = voting_session(&dir).await;
        let mut rng = StdRng::seed_from_u64(9);
        for (race, choice) in [
            ("president", "candidate-1"),
            ("chief-minister", "cm-1"),
            ("referendum-1", "ref-no"),
        ] {
            session.select(race, choice).unwrap();
            session.next(&mut rng, now()).unwrap();
        }
        dir.set_unavailable(true);
        let err = session.record_completion(&dir).await.unwrap_err();
        assert!(matches!(err, BoothError::GatewayUnavailable(_)));
        assert!(session.completed().is_some());
        assert!(!session.is_recorded());

        dir.set_unavailable(false);
        session.record_completion(&dir).await.unwrap();
        assert!(session.is_recorded());
    }

    #[tokio::test]
    async fn losing_concurrent_session_is_rejected() {
        let dir = NullDirectory::with_voters([voter(false)]);
        let mut first = voting_session(&dir).await;
        let mut second = voting_session(&dir).await;
        let mut rng = StdRng::seed_from_u64(3);
        for session in [&mut first, &mut second] {
            for (race, choice) in [
                ("president", "candidate-1"),
                ("chief-minister", "cm-1"),
                ("referendum-1", "ref-yes"),
            ] {
                session.select(race, choice).unwrap();
                session.next(&mut rng, now()).unwrap();
            }
        }
        let winner = first.completed().unwrap().ballot_id.clone();

        first.record_completion(&dir).await.unwrap();
        let err = second.record_completion(&dir).await.unwrap_err();
        assert!(matches!(err, BoothError::AlreadyVoted));
        assert_eq!(*second.state(), WizardState::Rejected);
        assert!(second.completed().is_none());
        assert!(!second.is_recorded());

        // No retry from a rejected session.
        let err = second.record_completion(&dir).await.unwrap_err();
        assert!(matches!(err, BoothError::WrongState { state: "rejected" }));
        assert_eq!(dir.record_vote_calls(), 2);
        assert!(second.into_completed().is_none());
        assert_eq!(dir.get("9876543210").unwrap().ballot_id, Some(winner));
    }

    #[test]
    fn complete_state_rejects_further_changes() {
        let election = Election::default();
        let done = WizardState::Complete(CompletedBallot {
            ballot_id: BallotId::parse("VT-2024-ABC123XYZ").unwrap(),
            timestamp: now(),
            votes: Ballot::new(),
            races: election.races.clone(),
        });
        assert!(done.select(&election, "president", "candidate-1").is_err());
        assert!(done
            .next(&election, &mut StdRng::seed_from_u64(0), now())
            .is_err());
        assert_eq!(done.previous(), done);
    }
}
