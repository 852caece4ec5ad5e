//! The voter directory trait.

use std::future::Future;

use ballot_types::{BallotId, NewVoter, VoterRecord};

use crate::DirectoryError;

/// Lookup and insert operations over the voter table.
///
/// Each call is a single round-trip; nothing spans calls, so callers must not
/// assume atomicity between a lookup and a later insert or update. Duplicate
/// registrations are resolved by the backend's uniqueness constraints on
/// phone number and national ID, surfaced as [`DirectoryError::Conflict`].
///
/// "Not found" is `Ok(None)`; `Err` always means the call itself failed.
pub trait VoterDirectory {
    /// Insert a newly registered voter.
    fn insert(
        &self,
        voter: &NewVoter,
    ) -> impl Future<Output = Result<VoterRecord, DirectoryError>> + Send;

    /// Exact match on name (case-sensitive, as entered) and phone number.
    fn find_by_name_and_phone(
        &self,
        name: &str,
        phone: &str,
    ) -> impl Future<Output = Result<Option<VoterRecord>, DirectoryError>> + Send;

    /// Exact match on ballot ID.
    fn find_by_ballot_id(
        &self,
        ballot_id: &BallotId,
    ) -> impl Future<Output = Result<Option<VoterRecord>, DirectoryError>> + Send;

    /// Mark the voter with this phone number as voted and attach the ballot ID.
    ///
    /// Fails with [`DirectoryError::NotFound`] for an unknown voter and
    /// [`DirectoryError::AlreadyVoted`] if the flag is already set.
    fn record_vote(
        &self,
        phone: &str,
        ballot_id: &BallotId,
    ) -> impl Future<Output = Result<VoterRecord, DirectoryError>> + Send;
}
