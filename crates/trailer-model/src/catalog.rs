//! Sections and cases fetched from one (project, suite) scope.

use serde::{Deserialize, Serialize};

use crate::ids::{CaseId, SectionId};

/// A flat, named grouping of cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub name: String,
}

impl Section {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: SectionId::new(id),
            name: name.into(),
        }
    }
}

/// A test case as reported by the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub id: CaseId,
    pub section_id: SectionId,
    pub title: String,
    /// Last modification time in epoch seconds, when the remote reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<i64>,
}

impl CaseRecord {
    pub fn new(id: u64, section_id: u64, title: impl Into<String>) -> Self {
        Self {
            id: CaseId::new(id),
            section_id: SectionId::new(section_id),
            title: title.into(),
            updated_on: None,
        }
    }

    #[must_use]
    pub fn with_updated_on(mut self, updated_on: i64) -> Self {
        self.updated_on = Some(updated_on);
        self
    }
}

/// All sections and cases of one (project, suite) pair in one account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub sections: Vec<Section>,
    pub cases: Vec<CaseRecord>,
}

impl Catalog {
    pub fn new(sections: Vec<Section>, cases: Vec<CaseRecord>) -> Self {
        Self { sections, cases }
    }

    pub fn case_count(&self) -> usize {
        self.cases.len()
    }
}
