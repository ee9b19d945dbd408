//! LMDB database integrity checks.
//!
//! Run on startup to detect corruption early: every key in the evidence
//! database must be a 64-character lowercase hex fingerprint with a non-empty
//! value. Content-level checks (recomputing fingerprints) belong to the
//! evidence vault.

use crate::environment::LmdbEnvironment;
use crate::LmdbError;

/// Summary of an integrity check run.
#[derive(Debug, Default)]
pub struct IntegrityReport {
    pub records_checked: u64,
    pub errors: Vec<String>,
}

impl IntegrityReport {
    /// Returns `true` if no errors were detected.
    pub fn is_healthy(&self) -> bool {
        self.errors.is_empty()
    }
}

fn is_fingerprint_key(key: &[u8]) -> bool {
    key.len() == 64 && key.iter().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Scan the evidence database.
///
/// Read failures on individual entries are recorded in the report rather than
/// causing a hard error.
pub fn check_integrity(environment: &LmdbEnvironment) -> Result<IntegrityReport, LmdbError> {
    let mut report = IntegrityReport::default();
    let rtxn = environment.env().read_txn()?;

    for entry in environment.evidence_db().iter(&rtxn)? {
        match entry {
            Ok((key, value)) => {
                report.records_checked += 1;
                if !is_fingerprint_key(key) {
                    report
                        .errors
                        .push(format!("malformed key: {}", String::from_utf8_lossy(key)));
                } else if value.is_empty() {
                    report
                        .errors
                        .push(format!("empty record: {}", String::from_utf8_lossy(key)));
                }
            }
            Err(e) => report.errors.push(format!("failed to read entry: {e}")),
        }
    }

    if report.is_healthy() {
        tracing::info!(records = report.records_checked, "LMDB integrity check passed");
    } else {
        tracing::warn!(
            records = report.records_checked,
            errors = report.errors.len(),
            "LMDB integrity check found problems"
        );
    }
    Ok(report)
}
