//! Pruning results down to the current members of a run.

use std::collections::BTreeSet;

use tracing::{debug, info};
use trailer_model::{CaseId, RunId, TranslatedResult};

use crate::api::TestRailApi;
use crate::error::{Result, TransferError};

/// Case ids currently part of `run_id`.
pub fn fetch_membership<A: TestRailApi + ?Sized>(api: &A, run_id: RunId) -> Result<BTreeSet<CaseId>> {
    let tests = api
        .get_tests(run_id)
        .map_err(|source| TransferError::Membership { run_id, source })?;
    let members: BTreeSet<CaseId> = tests.into_iter().map(|test| test.case_id).collect();
    debug!(%run_id, members = members.len(), "fetched run membership");
    Ok(members)
}

/// Keeps only results whose case belongs to `members`.
///
/// Returns the number of results dropped. Applying it twice changes nothing.
pub fn prune_results(results: &mut Vec<TranslatedResult>, members: &BTreeSet<CaseId>) -> usize {
    let before = results.len();
    results.retain(|result| members.contains(&result.case_id));
    let dropped = before - results.len();
    if dropped > 0 {
        info!(dropped, kept = results.len(), "pruned results for cases outside the run");
    }
    dropped
}
