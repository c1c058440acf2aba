//! The remote test-management API as seen by the transfer pipeline.

use serde::{Deserialize, Serialize};
use tracing::debug;
use trailer_model::{CaseId, CaseRecord, Catalog, RunId, Section, SuiteScope, TranslatedResult};

use crate::error::{ApiError, Result, TransferError};

/// A case's membership in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    pub case_id: CaseId,
}

/// Body of a run-creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRun {
    pub suite_id: u64,
    pub name: String,
    #[serde(rename = "case_ids")]
    pub member_case_ids: Vec<CaseId>,
    pub include_all: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedRun {
    pub id: RunId,
}

/// One result as recorded by the remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedResult {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_id: Option<u32>,
}

/// Operations the pipeline needs from one account.
///
/// Calls block until the remote answers.
pub trait TestRailApi {
    fn get_sections(&self, scope: SuiteScope) -> std::result::Result<Vec<Section>, ApiError>;

    fn get_cases(&self, scope: SuiteScope) -> std::result::Result<Vec<CaseRecord>, ApiError>;

    /// Current members of a run.
    fn get_tests(&self, run_id: RunId) -> std::result::Result<Vec<TestRecord>, ApiError>;

    fn add_run(&self, project_id: u64, run: &NewRun) -> std::result::Result<CreatedRun, ApiError>;

    /// Records all results in one call. The remote rejects the whole batch
    /// when any result references a case it does not accept.
    fn add_results_for_cases(
        &self,
        run_id: RunId,
        results: &[TranslatedResult],
    ) -> std::result::Result<Vec<SubmittedResult>, ApiError>;
}

/// Fetches sections, then cases, of one scope.
pub fn fetch_catalog<A: TestRailApi + ?Sized>(api: &A, scope: SuiteScope) -> Result<Catalog> {
    let sections = api
        .get_sections(scope)
        .map_err(|source| TransferError::Fetch {
            what: "sections",
            source,
        })?;
    let cases = api.get_cases(scope).map_err(|source| TransferError::Fetch {
        what: "cases",
        source,
    })?;
    debug!(
        %scope,
        sections = sections.len(),
        cases = cases.len(),
        "fetched catalog"
    );
    Ok(Catalog::new(sections, cases))
}
