//! Error types for report and snapshot file handling.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading inputs or persisting snapshots.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// Failed to read or write a file.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Temp file could not be renamed over the destination.
    #[error("failed to replace {target_path} with {temp_path}: {source}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Result Report Errors ===
    /// CSV syntax or I/O error.
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The report has no header row.
    #[error("result report is empty: {path}")]
    EmptyReport { path: PathBuf },

    /// A header name occurs more than once.
    #[error("{header} is a duplicate header in {path}")]
    DuplicateHeader { header: String, path: PathBuf },

    /// Required column not found in the header row.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// A row has fewer cells than the header requires.
    #[error("row at line {line} of {path} has no '{column}' cell")]
    MissingCell {
        column: String,
        line: u64,
        path: PathBuf,
    },

    /// A case identifier cell is not a prefix followed by digits.
    #[error("invalid case id '{value}' at line {line} of {path}")]
    InvalidCaseId {
        value: String,
        line: u64,
        path: PathBuf,
    },

    // === JUnit Errors ===
    /// Malformed JUnit XML.
    #[error("failed to parse JUnit XML {path}: {source}")]
    Xml {
        path: PathBuf,
        #[source]
        source: quick_xml::Error,
    },

    // === Snapshot Errors ===
    /// Snapshot YAML could not be read or written.
    #[error("invalid suite snapshot {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `last_updated` is not an RFC 3339 timestamp.
    #[error("invalid last_updated timestamp '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
