//! LMDB implementation of VoterDirectory.

use std::sync::Arc;

use heed::types::{Bytes, Str};
use heed::{Database, Env, RoTxn};

use ballot_store::{DirectoryError, VoterDirectory};
use ballot_types::{BallotId, NewVoter, VoterRecord};

use crate::LmdbError;

#[derive(Clone)]
pub struct LmdbVoterDirectory {
    pub(crate) env: Arc<Env>,
    pub(crate) voters_db: Database<Str, Bytes>,
    pub(crate) national_id_db: Database<Str, Str>,
    pub(crate) ballot_id_db: Database<Str, Str>,
}

impl LmdbVoterDirectory {
    fn load(&self, txn: &RoTxn, phone: &str) -> Result<Option<VoterRecord>, LmdbError> {
        match self.voters_db.get(txn, phone)? {
            Some(bytes) => Ok(Some(bincode::deserialize(bytes)?)),
            None => Ok(None),
        }
    }

    /// Number of registered voters.
    pub fn voter_count(&self) -> Result<u64, LmdbError> {
        let rtxn = self.env.read_txn()?;
        Ok(self.voters_db.len(&rtxn)?)
    }

    fn insert_sync(&self, voter: &NewVoter) -> Result<VoterRecord, DirectoryError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        if self
            .voters_db
            .get(&wtxn, &voter.phone_number)
            .map_err(LmdbError::from)?
            .is_some()
        {
            return Err(DirectoryError::Conflict(format!(
                "phone number {}",
                voter.phone_number
            )));
        }
        if self
            .national_id_db
            .get(&wtxn, &voter.national_id)
            .map_err(LmdbError::from)?
            .is_some()
        {
            return Err(DirectoryError::Conflict("national ID".into()));
        }

        let record = VoterRecord::registered(voter.clone());
        let bytes = bincode::serialize(&record).map_err(LmdbError::from)?;
        self.voters_db
            .put(&mut wtxn, &record.phone_number, &bytes)
            .map_err(LmdbError::from)?;
        self.national_id_db
            .put(&mut wtxn, &record.national_id, &record.phone_number)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(record)
    }

    fn record_vote_sync(
        &self,
        phone: &str,
        ballot_id: &BallotId,
    ) -> Result<VoterRecord, DirectoryError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let mut record = self
            .load(&wtxn, phone)?
            .ok_or_else(|| DirectoryError::NotFound(phone.to_string()))?;
        if !record.mark_voted(ballot_id.clone()) {
            return Err(DirectoryError::AlreadyVoted(phone.to_string()));
        }
        let bytes = bincode::serialize(&record).map_err(LmdbError::from)?;
        self.voters_db
            .put(&mut wtxn, phone, &bytes)
            .map_err(LmdbError::from)?;
        self.ballot_id_db
            .put(&mut wtxn, ballot_id.as_str(), phone)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(record)
    }
}

impl VoterDirectory for LmdbVoterDirectory {
    async fn insert(&self, voter: &NewVoter) -> Result<VoterRecord, DirectoryError> {
        let result = self.insert_sync(voter);
        if let Err(ref e) = result {
            tracing::debug!(error = %e, "voter insert rejected");
        }
        result
    }

    async fn find_by_name_and_phone(
        &self,
        name: &str,
        phone: &str,
    ) -> Result<Option<VoterRecord>, DirectoryError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.load(&rtxn, phone)?.filter(|v| v.name == name))
    }

    async fn find_by_ballot_id(
        &self,
        ballot_id: &BallotId,
    ) -> Result<Option<VoterRecord>, DirectoryError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let Some(phone) = self
            .ballot_id_db
            .get(&rtxn, ballot_id.as_str())
            .map_err(LmdbError::from)?
        else {
            return Ok(None);
        };
        Ok(self.load(&rtxn, phone)?)
    }

    async fn record_vote(
        &self,
        phone: &str,
        ballot_id: &BallotId,
    ) -> Result<VoterRecord, DirectoryError> {
        self.record_vote_sync(phone, ballot_id)
    }
}
