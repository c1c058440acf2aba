//! Exported result reports: one CSV file per run.

mod columns;
mod reader;

pub use columns::{HeaderIndex, ReportColumns};
pub use reader::{ResultReport, read_result_report};
