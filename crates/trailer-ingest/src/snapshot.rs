//! Local snapshot of a suite's case titles.
//!
//! The snapshot is a YAML document recording which cases exist in one
//! (project, suite) scope and when it was last refreshed:
//!
//! ```yaml
//! project_id: 3
//! suite_id: 33
//! last_updated: 2019-05-01T12:00:00.000000000Z
//! cases:
//!   61947: Login works
//! ```

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use trailer_model::{CaseId, CaseRecord, SuiteScope};

use crate::error::{IngestError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteSnapshot {
    pub project_id: u64,
    pub suite_id: u64,
    /// RFC 3339 timestamp of the last change.
    pub last_updated: String,
    #[serde(default)]
    pub cases: BTreeMap<CaseId, String>,
}

impl SuiteSnapshot {
    /// An empty snapshot that considers every case new.
    pub fn new(scope: SuiteScope) -> Self {
        Self {
            project_id: scope.project_id,
            suite_id: scope.suite_id,
            last_updated: format_timestamp(DateTime::<Utc>::UNIX_EPOCH),
            cases: BTreeMap::new(),
        }
    }

    pub fn scope(&self) -> SuiteScope {
        SuiteScope::new(self.project_id, self.suite_id)
    }

    pub fn last_updated_at(&self) -> Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.last_updated)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|source| IngestError::InvalidTimestamp {
                value: self.last_updated.clone(),
                source,
            })
    }

    /// Records every case modified after `last_updated`.
    ///
    /// Cases without a modification time are always recorded. Returns true
    /// when the snapshot changed.
    pub fn merge_updated(&mut self, cases: &[CaseRecord]) -> Result<bool> {
        let since = self.last_updated_at()?.timestamp();
        let mut updated = false;
        for case in cases {
            if case.updated_on.is_none_or(|updated_on| updated_on > since) {
                self.cases.insert(case.id, case.title.clone());
                updated = true;
            }
        }
        Ok(updated)
    }

    /// Removes the given cases. Returns true when any was present.
    pub fn remove_cases(&mut self, case_ids: &[CaseId]) -> bool {
        let mut updated = false;
        for case_id in case_ids {
            updated |= self.cases.remove(case_id).is_some();
        }
        updated
    }

    /// Stamps `last_updated` with `now`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_updated = format_timestamp(now);
    }

    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn load_snapshot(path: &Path) -> Result<SuiteSnapshot> {
    let data = fs::read_to_string(path).map_err(|source| IngestError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&data).map_err(|source| IngestError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the snapshot at `path` if it exists, otherwise starts a new one.
///
/// A file recorded for a different scope is still loaded, with a warning.
pub fn load_or_new(path: &Path, scope: SuiteScope) -> Result<SuiteSnapshot> {
    if !path.exists() {
        return Ok(SuiteSnapshot::new(scope));
    }
    let snapshot = load_snapshot(path)?;
    if snapshot.scope() != scope {
        warn!(
            path = %path.display(),
            file_scope = %snapshot.scope(),
            requested_scope = %scope,
            "snapshot was recorded for a different suite"
        );
    }
    Ok(snapshot)
}

/// Writes the snapshot through a temp file and a rename.
pub fn save_snapshot(snapshot: &SuiteSnapshot, path: &Path) -> Result<()> {
    let yaml = snapshot.to_yaml().map_err(|source| IngestError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;

    let temp_path = path.with_extension("yaml.tmp");

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| IngestError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|source| IngestError::Io {
        operation: "create",
        path: temp_path.clone(),
        source,
    })?;
    file.write_all(yaml.as_bytes())
        .map_err(|source| IngestError::Io {
            operation: "write",
            path: temp_path.clone(),
            source,
        })?;
    file.sync_all().map_err(|source| IngestError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source,
    })?;

    fs::rename(&temp_path, path).map_err(|source| IngestError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), cases = snapshot.cases.len(), "saved suite snapshot");
    Ok(())
}
