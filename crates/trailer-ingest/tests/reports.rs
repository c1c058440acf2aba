use std::fs;

use trailer_ingest::{ReportColumns, discover_reports, parse_junit_file, read_result_report};
use trailer_model::CaseId;

#[test]
fn reads_every_discovered_report() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::create_dir_all(dir.path().join("dtr")).expect("create dir");
    fs::write(
        dir.path().join("dtr/2.6.csv"),
        "Run,Case ID,Status,Comment\nDTR 2.6,C1,Passed,ok\nDTR 2.6,C2,Failed,bad\n",
    )
    .expect("write report");
    fs::write(
        dir.path().join("ucp.csv"),
        "Run,Case ID,Status,Comment\nUCP 3.1,C9,Retest,\n",
    )
    .expect("write report");

    let reports: Vec<_> = discover_reports(dir.path())
        .expect("discover")
        .iter()
        .map(|path| read_result_report(path, &ReportColumns::default()).expect("read"))
        .collect();

    let labels: Vec<_> = reports.iter().map(|r| r.run_label.as_str()).collect();
    assert_eq!(labels, vec!["DTR 2.6", "UCP 3.1"]);
    assert_eq!(reports[0].rows[1].source_case_id, CaseId::new(2));
    assert_eq!(reports[1].rows[0].status, "Retest");
}

#[test]
fn mixed_run_labels_keep_the_first() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("run.csv");
    fs::write(
        &path,
        "Run,Case ID,Status,Comment\nfirst,C1,Passed,\nsecond,C2,Passed,\n",
    )
    .expect("write report");

    let report = read_result_report(&path, &ReportColumns::default()).expect("read");

    assert_eq!(report.run_label, "first");
    assert!(report.rows.iter().all(|row| row.run_label == "first"));
}

#[test]
fn reads_junit_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("junit.xml");
    fs::write(
        &path,
        r#"<testsuite name="e2e"><testcase name="C5 upgrade"><failure message="x"/></testcase></testsuite>"#,
    )
    .expect("write xml");

    let suites = parse_junit_file(&path).expect("parse");

    assert_eq!(suites.len(), 1);
    assert!(suites[0].cases[0].outcome.is_failure());
}

#[test]
fn missing_junit_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = parse_junit_file(&dir.path().join("missing.xml")).unwrap_err();
    assert!(err.to_string().starts_with("failed to read"));
}
