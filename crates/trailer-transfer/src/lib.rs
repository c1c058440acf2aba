//! Moving test results into a TestRail account.
//!
//! # Pipeline
//!
//! 1. [`translate`] rewrites exported rows with a
//!    [`CorrespondenceMap`](trailer_model::CorrespondenceMap) and a
//!    [`StatusTable`](trailer_model::StatusTable)
//! 2. [`submit_run`] creates the run with its members and records the results
//! 3. A bad request naming unknown cases drops those cases' results and retries,
//!    see [`SubmissionState`]
//!
//! JUnit reports take a shorter path through [`results_from_junit`] and
//! [`submit_results`] against an existing run.
//!
//! All remote calls go through the [`TestRailApi`] trait.

mod api;
mod error;
mod junit;
mod prune;
mod rejection;
mod submit;
mod translate;

// === Error Types ===
pub use error::{ApiError, Result, TransferError};

// === Remote API ===
pub use api::{CreatedRun, NewRun, SubmittedResult, TestRailApi, TestRecord, fetch_catalog};

// === Translation ===
pub use junit::{case_ids_in_name, results_from_junit};
pub use translate::{Translation, translate};

// === Submission ===
pub use prune::{fetch_membership, prune_results};
pub use rejection::{Verdict, classify_rejection, unknown_cases};
pub use submit::{SubmissionReport, SubmissionState, SubmitOptions, submit_results, submit_run};
