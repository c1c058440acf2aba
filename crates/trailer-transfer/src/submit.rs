//! Submission of a result batch with retry-and-exclude handling.
//!
//! Each attempt moves through a small state machine:
//!
//! ```text
//! Built -> Submitted -> Accepted
//!                    -> RejectedUnknownCases -> Pruned -> Submitted
//!                                            -> Failed
//!                    -> RejectedOther -> Failed
//! ```
//!
//! An unknown-case rejection removes the cited cases from the batch and tries
//! again, until the attempt budget runs out. Every other rejection is final.

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, info, warn};
use trailer_model::{CaseId, RunId, RunPayload, SuiteScope, TranslatedResult};

use crate::api::{NewRun, SubmittedResult, TestRailApi};
use crate::error::{Result, TransferError};
use crate::prune::{fetch_membership, prune_results};
use crate::rejection::Verdict;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionState {
    Built,
    Submitted,
    Accepted,
    RejectedUnknownCases,
    Pruned,
    RejectedOther,
    Failed,
}

impl SubmissionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Failed)
    }

    /// Whether the machine may move from `self` to `next`.
    ///
    /// A batch left empty by pruning is accepted without a remote call.
    pub fn can_transition_to(self, next: Self) -> bool {
        use SubmissionState as S;
        matches!(
            (self, next),
            (S::Built | S::Pruned, S::Submitted)
                | (S::Built, S::Pruned)
                | (S::Built | S::Pruned, S::Accepted)
                | (
                    S::Submitted,
                    S::Accepted | S::RejectedUnknownCases | S::RejectedOther
                )
                | (S::RejectedUnknownCases, S::Pruned | S::Failed)
                | (S::RejectedOther, S::Failed)
        )
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Built => "built",
            Self::Submitted => "submitted",
            Self::Accepted => "accepted",
            Self::RejectedUnknownCases => "rejected (unknown cases)",
            Self::Pruned => "pruned",
            Self::RejectedOther => "rejected",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOptions {
    /// Total submissions allowed, including the first.
    pub attempts: u32,
    /// Re-read run membership and drop foreign results before each attempt.
    pub prune_to_run: bool,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self {
            attempts: 1,
            prune_to_run: false,
        }
    }
}

impl SubmitOptions {
    #[must_use]
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    #[must_use]
    pub fn with_prune_to_run(mut self, prune: bool) -> Self {
        self.prune_to_run = prune;
        self
    }
}

/// What happened to one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    pub run_id: RunId,
    /// Remote calls made.
    pub attempts: u32,
    /// Records returned by the accepting call.
    pub accepted: Vec<SubmittedResult>,
    /// Cases removed after being cited as unknown.
    pub excluded: BTreeSet<CaseId>,
    /// Results dropped because their case was not part of the run.
    pub pruned: usize,
    /// Every state the batch passed through, starting with `Built`.
    pub history: Vec<SubmissionState>,
}

impl SubmissionReport {
    fn new(run_id: RunId) -> Self {
        Self {
            run_id,
            attempts: 0,
            accepted: Vec::new(),
            excluded: BTreeSet::new(),
            pruned: 0,
            history: vec![SubmissionState::Built],
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.history
            .last()
            .copied()
            .unwrap_or(SubmissionState::Built)
    }

    fn advance(&mut self, next: SubmissionState) {
        debug_assert!(
            self.state().can_transition_to(next),
            "invalid transition {} -> {next}",
            self.state()
        );
        debug!(run_id = %self.run_id, from = %self.state(), to = %next, "submission state");
        self.history.push(next);
    }
}

/// Records `results` against an existing run.
///
/// `results` is edited in place: cited unknown cases and, with
/// [`SubmitOptions::prune_to_run`], cases outside the run are removed from it.
pub fn submit_results<A: TestRailApi + ?Sized>(
    api: &A,
    run_id: RunId,
    results: &mut Vec<TranslatedResult>,
    options: &SubmitOptions,
) -> Result<SubmissionReport> {
    let budget = options.attempts.max(1);
    let mut report = SubmissionReport::new(run_id);

    loop {
        if options.prune_to_run {
            let members = fetch_membership(api, run_id)?;
            report.pruned += prune_results(results, &members);
            if report.state() != SubmissionState::Pruned {
                report.advance(SubmissionState::Pruned);
            }
        }

        if results.is_empty() {
            warn!(%run_id, "No results uploaded");
            report.advance(SubmissionState::Accepted);
            return Ok(report);
        }

        report.attempts += 1;
        report.advance(SubmissionState::Submitted);
        debug!(%run_id, attempt = report.attempts, results = results.len(), "submitting results");

        match Verdict::from_response(api.add_results_for_cases(run_id, results)) {
            Verdict::Accepted(records) => {
                report.advance(SubmissionState::Accepted);
                if records.is_empty() {
                    warn!(%run_id, "No results uploaded");
                } else {
                    info!(%run_id, accepted = records.len(), "uploaded results");
                }
                report.accepted = records;
                return Ok(report);
            }
            Verdict::RejectedUnknownCases { cases, error } => {
                report.advance(SubmissionState::RejectedUnknownCases);
                let cited: Vec<String> = cases.iter().map(ToString::to_string).collect();
                warn!(%run_id, cases = %cited.join(", "), "remote rejected unknown cases");
                results.retain(|result| !cases.contains(&result.case_id));
                report.excluded.extend(cases);

                if report.attempts >= budget {
                    report.advance(SubmissionState::Failed);
                    return Err(TransferError::RetryBudgetExhausted {
                        run_id,
                        attempts: report.attempts,
                        source: error,
                    });
                }
                report.advance(SubmissionState::Pruned);
            }
            Verdict::RejectedOther(error) => {
                report.advance(SubmissionState::RejectedOther);
                report.advance(SubmissionState::Failed);
                return Err(TransferError::Rejected {
                    run_id,
                    source: error,
                });
            }
        }
    }
}

/// Creates the run described by `payload` in `scope`, then records its results.
///
/// Membership is fixed at creation; later exclusions only touch results.
pub fn submit_run<A: TestRailApi + ?Sized>(
    api: &A,
    scope: SuiteScope,
    payload: &mut RunPayload,
    options: &SubmitOptions,
) -> Result<SubmissionReport> {
    let request = NewRun {
        suite_id: scope.suite_id,
        name: payload.name.clone(),
        member_case_ids: payload.member_case_ids.clone(),
        include_all: false,
    };
    let run = api
        .add_run(scope.project_id, &request)
        .map_err(|source| TransferError::RunCreation {
            name: payload.name.clone(),
            source,
        })?;
    info!(run_id = %run.id, name = %payload.name, members = request.member_case_ids.len(), "created run");

    submit_results(api, run.id, &mut payload.results, options)
}
