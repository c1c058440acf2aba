//! JUnit XML report reading.
//!
//! Only the parts needed to score cases are kept: suite and case names, the
//! class name, the duration, and whether the case failed, errored or was
//! skipped (with the `message` attribute of that element).

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{IngestError, Result};

/// How a JUnit test case ended.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JUnitOutcome {
    #[default]
    Passed,
    Failed {
        message: Option<String>,
    },
    Errored {
        message: Option<String>,
    },
    Skipped {
        message: Option<String>,
    },
}

impl JUnitOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. } | Self::Errored { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Passed => None,
            Self::Failed { message } | Self::Errored { message } | Self::Skipped { message } => {
                message.as_deref()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JUnitCase {
    pub name: String,
    pub classname: Option<String>,
    pub time: Option<f64>,
    pub outcome: JUnitOutcome,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct JUnitSuite {
    pub name: String,
    pub cases: Vec<JUnitCase>,
}

/// Parses one JUnit report file. Nested suites are returned flattened.
pub fn parse_junit_file(path: &Path) -> Result<Vec<JUnitSuite>> {
    let xml = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source,
    })?;
    parse_junit_str(&xml).map_err(|source| IngestError::Xml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses JUnit XML from a string.
pub fn parse_junit_str(xml: &str) -> std::result::Result<Vec<JUnitSuite>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut finished = Vec::new();
    let mut open_suites: Vec<JUnitSuite> = Vec::new();
    let mut open_case: Option<JUnitCase> = None;

    loop {
        match reader.read_event()? {
            Event::Start(element) => match element.name().as_ref() {
                b"testsuite" => open_suites.push(start_suite(&element)?),
                b"testcase" => open_case = Some(start_case(&element)?),
                name => record_outcome(open_case.as_mut(), name, &element)?,
            },
            Event::Empty(element) => match element.name().as_ref() {
                b"testsuite" => finished.push(start_suite(&element)?),
                b"testcase" => {
                    let case = start_case(&element)?;
                    close_case(&mut open_suites, &mut finished, case);
                }
                name => record_outcome(open_case.as_mut(), name, &element)?,
            },
            Event::End(element) => match element.name().as_ref() {
                b"testcase" => {
                    if let Some(case) = open_case.take() {
                        close_case(&mut open_suites, &mut finished, case);
                    }
                }
                b"testsuite" => {
                    if let Some(suite) = open_suites.pop() {
                        finished.push(suite);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(finished)
}

fn start_suite(element: &BytesStart<'_>) -> std::result::Result<JUnitSuite, quick_xml::Error> {
    Ok(JUnitSuite {
        name: attribute(element, b"name")?.unwrap_or_default(),
        cases: Vec::new(),
    })
}

fn start_case(element: &BytesStart<'_>) -> std::result::Result<JUnitCase, quick_xml::Error> {
    Ok(JUnitCase {
        name: attribute(element, b"name")?.unwrap_or_default(),
        classname: attribute(element, b"classname")?,
        time: attribute(element, b"time")?.and_then(|t| t.trim().parse().ok()),
        outcome: JUnitOutcome::Passed,
    })
}

/// Cases outside any suite are collected under an unnamed suite.
fn close_case(open_suites: &mut [JUnitSuite], finished: &mut Vec<JUnitSuite>, case: JUnitCase) {
    if let Some(suite) = open_suites.last_mut() {
        suite.cases.push(case);
        return;
    }
    match finished.iter_mut().find(|s| s.name.is_empty()) {
        Some(unnamed) => unnamed.cases.push(case),
        None => finished.push(JUnitSuite {
            name: String::new(),
            cases: vec![case],
        }),
    }
}

/// Failures and errors take precedence over a skip; the first failure wins.
fn record_outcome(
    case: Option<&mut JUnitCase>,
    name: &[u8],
    element: &BytesStart<'_>,
) -> std::result::Result<(), quick_xml::Error> {
    let Some(case) = case else {
        return Ok(());
    };
    let message = || attribute(element, b"message");
    let outcome = match name {
        b"failure" => JUnitOutcome::Failed {
            message: message()?,
        },
        b"error" => JUnitOutcome::Errored {
            message: message()?,
        },
        b"skipped" => JUnitOutcome::Skipped {
            message: message()?,
        },
        _ => return Ok(()),
    };
    if !case.outcome.is_failure() {
        case.outcome = outcome;
    }
    Ok(())
}

fn attribute(
    element: &BytesStart<'_>,
    name: &[u8],
) -> std::result::Result<Option<String>, quick_xml::Error> {
    for attribute in element.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        if attribute.key.as_ref() == name {
            return Ok(Some(attribute.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuites>
  <testsuite name="integration" tests="4">
    <testcase name="TestLogin C101" classname="auth" time="1.5"/>
    <testcase name="TestLogout C102" classname="auth" time="0.2">
      <failure message="expected 200, got 500">stack trace</failure>
    </testcase>
    <testcase name="TestPush C103" classname="registry">
      <skipped message="flaky"/>
    </testcase>
    <testcase name="TestPull C104" classname="registry">
      <error message="panic: nil &amp; void"/>
    </testcase>
  </testsuite>
</testsuites>"#;

    #[test]
    fn parses_cases_and_outcomes() {
        let suites = parse_junit_str(REPORT).unwrap();

        assert_eq!(suites.len(), 1);
        let suite = &suites[0];
        assert_eq!(suite.name, "integration");
        assert_eq!(suite.cases.len(), 4);

        assert_eq!(suite.cases[0].outcome, JUnitOutcome::Passed);
        assert_eq!(suite.cases[0].classname.as_deref(), Some("auth"));
        assert_eq!(suite.cases[0].time, Some(1.5));
        assert_eq!(
            suite.cases[1].outcome,
            JUnitOutcome::Failed {
                message: Some("expected 200, got 500".to_string())
            }
        );
        assert!(matches!(suite.cases[2].outcome, JUnitOutcome::Skipped { .. }));
        assert_eq!(suite.cases[3].outcome.message(), Some("panic: nil & void"));
        assert!(suite.cases[3].outcome.is_failure());
    }

    #[test]
    fn nested_suites_are_flattened() {
        let xml = r#"<testsuite name="outer">
            <testsuite name="inner"><testcase name="a"/></testsuite>
            <testcase name="b"/>
        </testsuite>"#;

        let suites = parse_junit_str(xml).unwrap();

        let names: Vec<_> = suites.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["inner", "outer"]);
        assert_eq!(suites[0].cases[0].name, "a");
        assert_eq!(suites[1].cases[0].name, "b");
    }

    #[test]
    fn malformed_xml_is_an_error() {
        assert!(parse_junit_str("<testsuite><testcase></testsuite>").is_err());
    }
}
