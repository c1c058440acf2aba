//! Header names and their positions.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Header names of the columns a result report must carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportColumns {
    pub run: String,
    pub case_id: String,
    pub status: String,
    pub comment: String,
}

impl Default for ReportColumns {
    fn default() -> Self {
        Self {
            run: "Run".to_string(),
            case_id: "Case ID".to_string(),
            status: "Status".to_string(),
            comment: "Comment".to_string(),
        }
    }
}

/// Column positions keyed by header name.
#[derive(Debug, Clone)]
pub struct HeaderIndex(BTreeMap<String, usize>);

impl HeaderIndex {
    /// Indexes a header row. Duplicate names are rejected.
    pub fn build<'a>(headers: impl IntoIterator<Item = &'a str>, path: &Path) -> Result<Self> {
        let mut positions = BTreeMap::new();
        for (i, header) in headers.into_iter().enumerate() {
            if positions.insert(header.to_string(), i).is_some() {
                return Err(IngestError::DuplicateHeader {
                    header: header.to_string(),
                    path: path.to_path_buf(),
                });
            }
        }
        Ok(Self(positions))
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.0.get(column).copied()
    }

    pub fn require(&self, column: &str, path: &Path) -> Result<usize> {
        self.position(column)
            .ok_or_else(|| IngestError::MissingColumn {
                column: column.to_string(),
                path: path.to_path_buf(),
            })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
