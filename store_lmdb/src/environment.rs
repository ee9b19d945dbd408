//! LMDB environment setup.

use std::path::{Path, PathBuf};

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::LmdbError;

/// Default map size: 1 GiB.
pub const DEFAULT_MAP_SIZE: usize = 1 << 30;

/// Name of the database holding evidence records.
pub const EVIDENCE_DB: &str = "evidence";

/// Wraps the LMDB environment and the evidence database handle.
pub struct LmdbEnvironment {
    env: Env,
    evidence_db: Database<Bytes, Bytes>,
    path: PathBuf,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given directory.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;
        // SAFETY: a given directory is opened at most once at a time in this
        // process, and never concurrently by another process.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(4)
                .open(path)?
        };
        let mut wtxn = env.write_txn()?;
        let evidence_db: Database<Bytes, Bytes> =
            env.create_database(&mut wtxn, Some(EVIDENCE_DB))?;
        wtxn.commit()?;
        tracing::info!(path = %path.display(), map_size, "opened LMDB environment");
        Ok(Self {
            env,
            evidence_db,
            path: path.to_path_buf(),
        })
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn evidence_db(&self) -> Database<Bytes, Bytes> {
        self.evidence_db
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
