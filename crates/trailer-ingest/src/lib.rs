//! Input and state files for the trailer tool.
//!
//! # Features
//!
//! - **Result reports**: CSV exports with one row per case result, read into
//!   [`ResultRow`](trailer_model::ResultRow)s
//! - **Report discovery**: recursive search for CSV reports in a directory
//! - **JUnit XML**: test case outcomes from CI reports
//! - **Suite snapshots**: YAML record of a suite's cases, written atomically
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use trailer_ingest::{ReportColumns, discover_reports, read_result_report};
//!
//! for path in discover_reports(Path::new("exports"))? {
//!     let report = read_result_report(&path, &ReportColumns::default())?;
//!     println!("{}: {} rows", report.run_label, report.rows.len());
//! }
//! ```

mod discovery;
mod error;
mod junit;
mod report;
mod snapshot;

// === Error Types ===
pub use error::{IngestError, Result};

// === Result Reports ===
pub use discovery::discover_reports;
pub use report::{HeaderIndex, ReportColumns, ResultReport, read_result_report};

// === JUnit ===
pub use junit::{JUnitCase, JUnitOutcome, JUnitSuite, parse_junit_file, parse_junit_str};

// === Suite Snapshots ===
pub use snapshot::{SuiteSnapshot, format_timestamp, load_or_new, load_snapshot, save_snapshot};
