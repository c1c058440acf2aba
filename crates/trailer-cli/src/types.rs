use std::path::PathBuf;

use trailer_reconcile::ReconcileReport;
use trailer_transfer::SubmissionState;

/// Outcome of one migrated report.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run_name: String,
    pub path: PathBuf,
    pub members: usize,
    pub results: usize,
    pub unmapped: usize,
    /// Results the remote recorded; `None` on a dry run.
    pub accepted: Option<usize>,
    pub excluded: usize,
    pub state: Option<SubmissionState>,
}

#[derive(Debug, Clone)]
pub struct MigrationResult {
    pub reconcile: ReconcileReport,
    pub mapped_cases: usize,
    pub runs: Vec<RunSummary>,
    pub dry_run: bool,
}
