//! Results derived from JUnit test outcomes.
//!
//! A JUnit test reports against every case whose `C<id>` token appears in its
//! name. When several tests report against one case, any failure marks the
//! case failed and each test contributes a comment line.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use trailer_ingest::{JUnitCase, JUnitOutcome, JUnitSuite};
use trailer_model::{CaseId, StatusTable, TranslatedResult};

use crate::error::{Result, TransferError};

static CASE_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bC(\d+)\b").expect("Invalid case token regex"));

const PASSED: &str = "Passed";
const FAILED: &str = "Failed";

/// Case ids referenced by a test name, in order of appearance.
pub fn case_ids_in_name(name: &str) -> Vec<CaseId> {
    CASE_TOKEN_REGEX
        .captures_iter(name)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u64>().ok())
        .map(CaseId::new)
        .collect()
}

#[derive(Debug, Default)]
struct CaseVerdict {
    failed: bool,
    lines: Vec<String>,
}

/// Builds one result per referenced case, ordered by case id.
///
/// Skipped tests and tests without a case token contribute nothing.
pub fn results_from_junit(
    suites: &[JUnitSuite],
    comment_prefix: &str,
    statuses: &StatusTable,
) -> Result<Vec<TranslatedResult>> {
    let mut verdicts: BTreeMap<CaseId, CaseVerdict> = BTreeMap::new();

    for case in suites.iter().flat_map(|suite| &suite.cases) {
        if matches!(case.outcome, JUnitOutcome::Skipped { .. }) {
            continue;
        }
        let case_ids = case_ids_in_name(&case.name);
        if case_ids.is_empty() {
            debug!(test = %case.name, "test does not reference a case");
            continue;
        }
        let line = comment_line(case, comment_prefix);
        for case_id in case_ids {
            let verdict = verdicts.entry(case_id).or_default();
            verdict.failed |= case.outcome.is_failure();
            verdict.lines.push(line.clone());
        }
    }

    let status_id = |name: &str, case_id: CaseId| {
        statuses
            .get(name)
            .ok_or_else(|| TransferError::UnknownStatus {
                status: name.to_string(),
                case_id,
            })
    };

    verdicts
        .into_iter()
        .map(|(case_id, verdict)| {
            let status = if verdict.failed { FAILED } else { PASSED };
            Ok(TranslatedResult::new(
                case_id,
                status_id(status, case_id)?,
                verdict.lines.join("\n"),
            ))
        })
        .collect()
}

fn comment_line(case: &JUnitCase, prefix: &str) -> String {
    let verdict = match (&case.outcome, case.outcome.message()) {
        (outcome, Some(message)) if outcome.is_failure() => format!("failed: {message}"),
        (outcome, None) if outcome.is_failure() => "failed".to_string(),
        _ => "passed".to_string(),
    };
    if prefix.is_empty() {
        format!("{}: {verdict}", case.name)
    } else {
        format!("{prefix} {}: {verdict}", case.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(name: &str, outcome: JUnitOutcome) -> JUnitCase {
        JUnitCase {
            name: name.to_string(),
            classname: None,
            time: None,
            outcome,
        }
    }

    fn suite(cases: Vec<JUnitCase>) -> Vec<JUnitSuite> {
        vec![JUnitSuite {
            name: "integration".to_string(),
            cases,
        }]
    }

    #[test]
    fn finds_case_tokens() {
        assert_eq!(
            case_ids_in_name("TestLogin C101 and C7"),
            vec![CaseId::new(101), CaseId::new(7)]
        );
        assert!(case_ids_in_name("TestCACHE C12x").is_empty());
    }

    #[test]
    fn failure_wins_and_comments_accumulate() {
        let suites = suite(vec![
            case("TestA C5", JUnitOutcome::Passed),
            case(
                "TestB C5",
                JUnitOutcome::Failed {
                    message: Some("timeout".to_string()),
                },
            ),
            case("TestC C6", JUnitOutcome::Passed),
        ]);

        let results = results_from_junit(&suites, "CI #42", &StatusTable::default()).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].case_id, CaseId::new(5));
        assert_eq!(results[0].status_id, 5);
        assert_eq!(
            results[0].comment,
            "CI #42 TestA C5: passed\nCI #42 TestB C5: failed: timeout"
        );
        assert_eq!(results[1].status_id, 1);
        assert_eq!(results[1].comment, "CI #42 TestC C6: passed");
    }

    #[test]
    fn skipped_tests_produce_no_result() {
        let suites = suite(vec![case(
            "TestSkip C9",
            JUnitOutcome::Skipped { message: None },
        )]);
        let results = results_from_junit(&suites, "", &StatusTable::default()).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn errors_count_as_failures() {
        let suites = suite(vec![case("TestErr C3", JUnitOutcome::Errored { message: None })]);
        let results = results_from_junit(&suites, "", &StatusTable::default()).unwrap();
        assert_eq!(results[0].status_id, 5);
        assert_eq!(results[0].comment, "TestErr C3: failed");
    }

    #[test]
    fn missing_status_is_reported() {
        let statuses = StatusTable::new(BTreeMap::new());
        let suites = suite(vec![case("TestA C1", JUnitOutcome::Passed)]);
        assert!(matches!(
            results_from_junit(&suites, "", &statuses),
            Err(TransferError::UnknownStatus { .. })
        ));
    }
}
