//! Error types for result transfer.

use thiserror::Error;
use trailer_model::{CaseId, RunId};

/// Failure reported by the remote test-management API.
///
/// Clients convert their transport errors into this type; the message is kept
/// verbatim because rejected case ids are encoded in it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    /// HTTP status code, when the request reached the server.
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn is_bad_request(&self) -> bool {
        self.status == Some(400) || self.message.contains("400 Bad Request")
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransferError {
    /// A row carries a status missing from the status table.
    #[error("could not find status '{status}' in status codes (case {case_id})")]
    UnknownStatus { status: String, case_id: CaseId },

    /// Catalog download failed.
    #[error("failed to fetch {what}: {source}")]
    Fetch {
        what: &'static str,
        #[source]
        source: ApiError,
    },

    /// The run could not be created.
    #[error("failed to create run '{name}': {source}")]
    RunCreation {
        name: String,
        #[source]
        source: ApiError,
    },

    /// Run membership could not be read for pruning.
    #[error("failed to read tests of run {run_id}: {source}")]
    Membership {
        run_id: RunId,
        #[source]
        source: ApiError,
    },

    /// The remote rejected the batch for a reason other than unknown cases.
    #[error("failed to upload results to run {run_id}: {source}")]
    Rejected {
        run_id: RunId,
        #[source]
        source: ApiError,
    },

    /// Unknown-case rejections continued until the attempt budget ran out.
    #[error("gave up on run {run_id} after {attempts} attempt(s): {source}")]
    RetryBudgetExhausted {
        run_id: RunId,
        attempts: u32,
        #[source]
        source: ApiError,
    },
}

impl TransferError {
    /// Whether the error only means nothing was recorded, with the input intact.
    #[must_use]
    pub fn is_budget_exhausted(&self) -> bool {
        matches!(self, Self::RetryBudgetExhausted { .. })
    }
}

pub type Result<T> = std::result::Result<T, TransferError>;
