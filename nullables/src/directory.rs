//! Nullable voter directory: an in-memory table for testing.

use ballot_store::{DirectoryError, VoterDirectory};
use ballot_types::{BallotId, NewVoter, VoterRecord};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// An in-memory voter table keyed by phone number.
///
/// Enforces the same uniqueness constraints as a real backend (phone number
/// and national ID) and can be switched into an "unavailable" mode to
/// exercise transport-failure paths. Every call is counted.
pub struct NullDirectory {
    voters: Mutex<HashMap<String, VoterRecord>>,
    unavailable: AtomicBool,
    inserts: AtomicUsize,
    lookups: AtomicUsize,
    vote_updates: AtomicUsize,
}

impl NullDirectory {
    pub fn new() -> Self {
        Self {
            voters: Mutex::new(HashMap::new()),
            unavailable: AtomicBool::new(false),
            inserts: AtomicUsize::new(0),
            lookups: AtomicUsize::new(0),
            vote_updates: AtomicUsize::new(0),
        }
    }

    /// Seed the table directly, bypassing constraint checks and counters.
    pub fn with_voters(voters: impl IntoIterator<Item = VoterRecord>) -> Self {
        let dir = Self::new();
        {
            let mut table = dir.voters.lock().unwrap();
            for voter in voters {
                table.insert(voter.phone_number.clone(), voter);
            }
        }
        dir
    }

    /// When set, every call fails with [`DirectoryError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn insert_calls(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn lookup_calls(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn record_vote_calls(&self) -> usize {
        self.vote_updates.load(Ordering::SeqCst)
    }

    /// Snapshot of a voter by phone number.
    pub fn get(&self, phone: &str) -> Option<VoterRecord> {
        self.voters.lock().unwrap().get(phone).cloned()
    }

    pub fn len(&self) -> usize {
        self.voters.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), DirectoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(DirectoryError::Unavailable("null directory offline".into()))
        } else {
            Ok(())
        }
    }
}

impl Default for NullDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl VoterDirectory for NullDirectory {
    async fn insert(&self, voter: &NewVoter) -> Result<VoterRecord, DirectoryError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        let mut table = self.voters.lock().unwrap();
        if table.contains_key(&voter.phone_number) {
            return Err(DirectoryError::Conflict(format!(
                "phone number {}",
                voter.phone_number
            )));
        }
        if table.values().any(|v| v.national_id == voter.national_id) {
            return Err(DirectoryError::Conflict("national ID".into()));
        }
        let record = VoterRecord::registered(voter.clone());
        table.insert(record.phone_number.clone(), record.clone());
        Ok(record)
    }

    async fn find_by_name_and_phone(
        &self,
        name: &str,
        phone: &str,
    ) -> Result<Option<VoterRecord>, DirectoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self
            .voters
            .lock()
            .unwrap()
            .get(phone)
            .filter(|v| v.name == name)
            .cloned())
    }

    async fn find_by_ballot_id(
        &self,
        ballot_id: &BallotId,
    ) -> Result<Option<VoterRecord>, DirectoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self
            .voters
            .lock()
            .unwrap()
            .values()
            .find(|v| v.ballot_id.as_ref() == Some(ballot_id))
            .cloned())
    }

    async fn record_vote(
        &self,
        phone: &str,
        ballot_id: &BallotId,
    ) -> Result<VoterRecord, DirectoryError> {
        self.vote_updates.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        let mut table = self.voters.lock().unwrap();
        let record = table
            .get_mut(phone)
            .ok_or_else(|| DirectoryError::NotFound(phone.to_string()))?;
        if !record.mark_voted(ballot_id.clone()) {
            return Err(DirectoryError::AlreadyVoted(phone.to_string()));
        }
        Ok(record.clone())
    }
}
