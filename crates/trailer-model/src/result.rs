//! Result rows, translated results and the run payload built from them.

use serde::{Deserialize, Serialize};

use crate::ids::CaseId;

/// One parsed line of an exported result report, keyed by the source case id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub source_case_id: CaseId,
    pub status: String,
    pub comment: String,
    pub run_label: String,
}

/// A result addressed to a case of the target account.
///
/// Serializes to the shape the bulk result endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedResult {
    pub case_id: CaseId,
    pub status_id: u32,
    pub comment: String,
}

impl TranslatedResult {
    pub fn new(case_id: CaseId, status_id: u32, comment: impl Into<String>) -> Self {
        Self {
            case_id,
            status_id,
            comment: comment.into(),
        }
    }
}

/// A run to create in the target account and the results to record in it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunPayload {
    pub name: String,
    pub member_case_ids: Vec<CaseId>,
    pub results: Vec<TranslatedResult>,
}

impl RunPayload {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            member_case_ids: Vec::new(),
            results: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_payload_is_empty() {
        let payload = RunPayload::new("nightly");
        assert_eq!(payload.name, "nightly");
        assert!(payload.member_case_ids.is_empty());
        assert!(payload.results.is_empty());
    }
}
