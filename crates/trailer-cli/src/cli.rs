//! CLI argument definitions for trailer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, value_parser};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use trailer_client::DEFAULT_BASE_URL;

#[derive(Parser)]
#[command(
    name = "trailer",
    version,
    about = "Move test results into TestRail",
    long_about = "Upload JUnit results to a TestRail run, keep a local snapshot of a suite's \
                  cases, and migrate exported runs between two TestRail accounts.\n\n\
                  Credentials are read from TESTRAIL_USERNAME and TESTRAIL_TOKEN."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Upload JUnit results to an existing run.
    Upload(UploadArgs),

    /// Record a suite's cases in a local snapshot.
    Download(DownloadArgs),

    /// Remove cases from a local snapshot.
    Prune(PruneArgs),

    /// Recreate exported runs in another account.
    Migrate(MigrateArgs),
}

#[derive(Parser)]
pub struct UploadArgs {
    /// JUnit XML reports.
    #[arg(value_name = "JUNIT_FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Run to record results in.
    #[arg(long = "run-id", value_parser = value_parser!(u64).range(1..))]
    pub run_id: u64,

    /// Prefix for every result comment.
    #[arg(long = "comment", default_value = "")]
    pub comment: String,

    /// Submissions allowed when the run rejects unknown cases.
    #[arg(
        long = "attempts",
        visible_alias = "ignore-failures",
        default_value_t = 1,
        value_parser = value_parser!(u32).range(1..)
    )]
    pub attempts: u32,

    /// Print the results instead of uploading them.
    #[arg(long = "dry")]
    pub dry: bool,

    #[arg(long = "base-url", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

#[derive(Parser)]
pub struct DownloadArgs {
    #[arg(long = "project-id", value_parser = value_parser!(u64).range(1..))]
    pub project_id: u64,

    #[arg(long = "suite-id", value_parser = value_parser!(u64).range(1..))]
    pub suite_id: u64,

    /// Snapshot to update (logged instead when omitted).
    #[arg(long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    #[arg(long = "base-url", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

#[derive(Parser)]
pub struct PruneArgs {
    /// Snapshot to edit.
    #[arg(long = "file", value_name = "PATH")]
    pub file: PathBuf,

    /// Case ids to remove.
    #[arg(value_name = "CASE_ID", required = true)]
    pub case_ids: Vec<u64>,
}

#[derive(Parser)]
pub struct MigrateArgs {
    /// Migration config (accounts, suites, statuses, overrides).
    #[arg(long = "config", value_name = "PATH")]
    pub config: PathBuf,

    /// Directory searched recursively for exported CSV reports.
    #[arg(value_name = "DIR")]
    pub directory: PathBuf,

    /// Translate and summarise without creating runs.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_accepts_ignore_failures_alias() {
        let cli = Cli::try_parse_from([
            "trailer",
            "upload",
            "report.xml",
            "--run-id",
            "42",
            "--ignore-failures",
            "3",
        ])
        .unwrap();
        let Command::Upload(args) = cli.command else {
            panic!("expected upload");
        };
        assert_eq!(args.run_id, 42);
        assert_eq!(args.attempts, 3);
        assert_eq!(args.base_url, DEFAULT_BASE_URL);
        assert!(!args.dry);
    }

    #[test]
    fn zero_run_id_is_rejected() {
        assert!(Cli::try_parse_from(["trailer", "upload", "r.xml", "--run-id", "0"]).is_err());
    }

    #[test]
    fn download_requires_both_ids() {
        assert!(Cli::try_parse_from(["trailer", "download", "--project-id", "3"]).is_err());
        assert!(
            Cli::try_parse_from(["trailer", "download", "--project-id", "3", "--suite-id", "33"])
                .is_ok()
        );
    }

    #[test]
    fn migrate_parses_directory_and_flags() {
        let cli = Cli::try_parse_from([
            "trailer",
            "migrate",
            "--config",
            "trailer.yaml",
            "exports",
            "--dry-run",
        ])
        .unwrap();
        let Command::Migrate(args) = cli.command else {
            panic!("expected migrate");
        };
        assert_eq!(args.directory, PathBuf::from("exports"));
        assert!(args.dry_run);
    }
}
