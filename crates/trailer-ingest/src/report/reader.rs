//! Result report reading.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use trailer_model::{CaseId, ResultRow};

use super::columns::{HeaderIndex, ReportColumns};
use crate::error::{IngestError, Result};

/// The rows of one report and the run they belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultReport {
    pub path: PathBuf,
    /// Run label of the first row; empty when the report has no rows.
    pub run_label: String,
    pub rows: Vec<ResultRow>,
}

impl ResultReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Reads a result report using the given column names.
///
/// All rows are expected to share one run label. Rows with a different label
/// are kept under the first row's label and a warning is logged.
pub fn read_result_report(path: &Path, columns: &ReportColumns) -> Result<ResultReport> {
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let headers = reader.headers().map_err(csv_error)?.clone();
    if headers.is_empty() {
        return Err(IngestError::EmptyReport {
            path: path.to_path_buf(),
        });
    }

    // Spreadsheet exports often start with a UTF-8 byte order mark.
    let names = headers.iter().enumerate().map(|(i, name)| {
        if i == 0 {
            name.trim_start_matches('\u{feff}')
        } else {
            name
        }
    });
    let index = HeaderIndex::build(names, path)?;
    let run_idx = index.require(&columns.run, path)?;
    let case_idx = index.require(&columns.case_id, path)?;
    let status_idx = index.require(&columns.status, path)?;
    let comment_idx = index.require(&columns.comment, path)?;

    let mut run_label: Option<String> = None;
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result.map_err(csv_error)?;
        let line = record.position().map_or(0, csv::Position::line);
        let cell = |idx: usize, column: &str| {
            record
                .get(idx)
                .ok_or_else(|| IngestError::MissingCell {
                    column: column.to_string(),
                    line,
                    path: path.to_path_buf(),
                })
        };

        let label = cell(run_idx, &columns.run)?;
        let run_label = run_label.get_or_insert_with(|| {
            debug!(path = %path.display(), run_label = %label, "reading result report");
            label.to_string()
        });
        if label != run_label.as_str() {
            warn!(
                path = %path.display(),
                line,
                expected = %run_label,
                found = %label,
                "row belongs to a different run label; keeping the first"
            );
        }

        let raw_case_id = cell(case_idx, &columns.case_id)?;
        let source_case_id =
            CaseId::parse_prefixed(raw_case_id).map_err(|_| IngestError::InvalidCaseId {
                value: raw_case_id.to_string(),
                line,
                path: path.to_path_buf(),
            })?;

        rows.push(ResultRow {
            source_case_id,
            status: cell(status_idx, &columns.status)?.to_string(),
            comment: cell(comment_idx, &columns.comment)?.to_string(),
            run_label: run_label.clone(),
        });
    }

    Ok(ResultReport {
        path: path.to_path_buf(),
        run_label: run_label.unwrap_or_default(),
        rows,
    })
}
