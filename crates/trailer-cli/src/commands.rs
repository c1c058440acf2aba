use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, info_span, warn};

use trailer_cli::config::load_config;
use trailer_client::{Credentials, TestRailClient};
use trailer_ingest::{
    SuiteSnapshot, discover_reports, load_or_new, load_snapshot, parse_junit_file,
    read_result_report, save_snapshot,
};
use trailer_model::{CaseId, RunId, StatusTable, SuiteScope};
use trailer_reconcile::Reconciler;
use trailer_transfer::{
    SubmitOptions, TestRailApi, fetch_catalog, results_from_junit, submit_results, submit_run,
    translate,
};

use crate::cli::{DownloadArgs, MigrateArgs, PruneArgs, UploadArgs};
use crate::summary::print_results_table;
use crate::types::{MigrationResult, RunSummary};

fn connect(base_url: &str, env_prefix: &str) -> Result<TestRailClient> {
    let credentials = Credentials::from_env(env_prefix).context("load credentials")?;
    TestRailClient::new(base_url, credentials).context("create TestRail client")
}

pub fn run_upload(args: &UploadArgs) -> Result<()> {
    let mut suites = Vec::new();
    for path in &args.files {
        suites.extend(
            parse_junit_file(path).with_context(|| format!("parse {}", path.display()))?,
        );
    }
    let mut results = results_from_junit(&suites, &args.comment, &StatusTable::default())
        .context("build results")?;
    info!(files = args.files.len(), results = results.len(), "collected JUnit results");

    if args.dry {
        print_results_table(args.run_id, &results);
        return Ok(());
    }

    let client = connect(&args.base_url, "")?;
    let run_id = RunId::new(args.run_id);
    let options = SubmitOptions::default()
        .with_attempts(args.attempts)
        .with_prune_to_run(true);
    match submit_results(&client, run_id, &mut results, &options) {
        Ok(report) => {
            if !report.excluded.is_empty() {
                warn!(%run_id, excluded = report.excluded.len(), "some cases were rejected by the run");
            }
            Ok(())
        }
        Err(err) if err.is_budget_exhausted() => {
            warn!(%run_id, error = %err, "No results uploaded");
            Ok(())
        }
        Err(err) => Err(err).context("upload results"),
    }
}

pub fn run_download(args: &DownloadArgs) -> Result<()> {
    let scope = SuiteScope::new(args.project_id, args.suite_id);
    let mut snapshot = match &args.file {
        Some(path) => load_or_new(path, scope).context("load snapshot")?,
        None => SuiteSnapshot::new(scope),
    };

    let client = connect(&args.base_url, "")?;
    let cases = client
        .get_cases(scope)
        .with_context(|| format!("fetch cases of {scope}"))?;

    if !snapshot.merge_updated(&cases).context("merge cases")? {
        info!(%scope, "snapshot is up to date");
        return Ok(());
    }
    snapshot.touch(Utc::now());

    match &args.file {
        Some(path) => save_snapshot(&snapshot, path).context("save snapshot")?,
        None => {
            let yaml = snapshot.to_yaml().context("serialize snapshot")?;
            info!("\n{yaml}");
        }
    }
    Ok(())
}

pub fn run_prune(args: &PruneArgs) -> Result<()> {
    let mut snapshot = load_snapshot(&args.file).context("load snapshot")?;
    let case_ids: Vec<CaseId> = args.case_ids.iter().copied().map(CaseId::new).collect();
    if !snapshot.remove_cases(&case_ids) {
        info!(path = %args.file.display(), "no listed case was in the snapshot");
        return Ok(());
    }
    snapshot.touch(Utc::now());
    save_snapshot(&snapshot, &args.file).context("save snapshot")
}

pub fn run_migrate(args: &MigrateArgs) -> Result<MigrationResult> {
    let config = load_config(&args.config)?;
    let source = config.source.connect().context("connect to source account")?;
    let target = config.target.connect().context("connect to target account")?;

    let source_catalog =
        fetch_catalog(&source, config.source.scope()).context("fetch source catalog")?;
    let target_catalog =
        fetch_catalog(&target, config.target.scope()).context("fetch target catalog")?;
    let reconciliation = Reconciler::new()
        .with_overrides(config.overrides.clone())
        .reconcile(&source_catalog, &target_catalog)
        .context("reconcile case identities")?;

    let reports = discover_reports(&args.directory).context("find result reports")?;
    let options = SubmitOptions::default().with_attempts(config.attempts);
    let mut runs = Vec::with_capacity(reports.len());

    for path in &reports {
        let report = read_result_report(path, &config.columns)
            .with_context(|| format!("read {}", path.display()))?;
        if report.is_empty() {
            warn!(path = %path.display(), "report has no rows, skipping");
            continue;
        }
        let span = info_span!("run", run_name = %report.run_label);
        let _guard = span.enter();
        info!("Migrating {}", report.run_label);

        let translation = translate(&report.rows, &reconciliation.map, &config.statuses)
            .with_context(|| format!("translate {}", path.display()))?;
        let mut payload = translation.payload;
        let mut summary = RunSummary {
            run_name: payload.name.clone(),
            path: path.clone(),
            members: payload.member_case_ids.len(),
            results: payload.results.len(),
            unmapped: translation.unmapped.len(),
            accepted: None,
            excluded: 0,
            state: None,
        };

        if !args.dry_run {
            let submission = submit_run(&target, config.target.scope(), &mut payload, &options)
                .with_context(|| format!("migrate run '{}'", payload.name))?;
            info!("Created run for {}", payload.name);
            summary.accepted = Some(submission.accepted.len());
            summary.excluded = submission.excluded.len();
            summary.state = Some(submission.state());
        }
        runs.push(summary);
    }

    Ok(MigrationResult {
        mapped_cases: reconciliation.map.len(),
        reconcile: reconciliation.report,
        runs,
        dry_run: args.dry_run,
    })
}
