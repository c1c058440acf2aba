//! Classification of the remote's answer to a result batch.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use trailer_model::CaseId;

use crate::api::SubmittedResult;
use crate::error::ApiError;

/// Fragment the remote emits for each case it refuses to record.
static UNKNOWN_CASE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"case C(\d+) unknown").expect("Invalid unknown case regex")
});

/// Outcome of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted(Vec<SubmittedResult>),
    /// Bad request citing specific cases; the rest of the batch may be retried.
    RejectedUnknownCases {
        cases: BTreeSet<CaseId>,
        error: ApiError,
    },
    RejectedOther(ApiError),
}

impl Verdict {
    pub fn from_response(response: Result<Vec<SubmittedResult>, ApiError>) -> Self {
        match response {
            Ok(records) => Self::Accepted(records),
            Err(error) => classify_rejection(error),
        }
    }
}

/// Sorts a failure into a recoverable unknown-case rejection or a terminal one.
///
/// Only bad requests are inspected for case ids.
pub fn classify_rejection(error: ApiError) -> Verdict {
    if !error.is_bad_request() {
        return Verdict::RejectedOther(error);
    }
    let cases = unknown_cases(&error.message);
    if cases.is_empty() {
        Verdict::RejectedOther(error)
    } else {
        Verdict::RejectedUnknownCases { cases, error }
    }
}

/// Case ids cited as unknown in a rejection message.
pub fn unknown_cases(message: &str) -> BTreeSet<CaseId> {
    UNKNOWN_CASE_REGEX
        .captures_iter(message)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u64>().ok())
        .map(CaseId::new)
        .collect()
}
