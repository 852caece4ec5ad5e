//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::{Bytes, Str};
use heed::{Database, Env, EnvOpenOptions};

use crate::directory::LmdbVoterDirectory;
use crate::LmdbError;

const VOTERS_DB: &str = "voters";
const NATIONAL_ID_DB: &str = "national_ids";
const BALLOT_ID_DB: &str = "ballot_ids";

/// Default map size: 64 MiB is plenty for a voter table.
pub const DEFAULT_MAP_SIZE: usize = 64 * 1024 * 1024;

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    voters_db: Database<Str, Bytes>,
    national_id_db: Database<Str, Str>,
    ballot_id_db: Database<Str, Str>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given directory.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;
        // SAFETY: the environment is opened once per process for this path
        // and never concurrently reopened with different flags.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(3)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let voters_db = env.create_database(&mut wtxn, Some(VOTERS_DB))?;
        let national_id_db = env.create_database(&mut wtxn, Some(NATIONAL_ID_DB))?;
        let ballot_id_db = env.create_database(&mut wtxn, Some(BALLOT_ID_DB))?;
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), "opened voter directory environment");

        Ok(Self {
            env: Arc::new(env),
            voters_db,
            national_id_db,
            ballot_id_db,
        })
    }

    /// A directory handle sharing this environment.
    pub fn voter_directory(&self) -> LmdbVoterDirectory {
        LmdbVoterDirectory {
            env: Arc::clone(&self.env),
            voters_db: self.voters_db,
            national_id_db: self.national_id_db,
            ballot_id_db: self.ballot_id_db,
        }
    }
}
