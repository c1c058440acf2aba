#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Identifier of a test case within one TestRail account.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct CaseId(u64);

impl CaseId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Parses the exported form of a case identifier (`C1234`).
    ///
    /// The first character is a prefix and is dropped regardless of its value;
    /// the remainder must be a decimal integer.
    pub fn parse_prefixed(value: &str) -> Result<Self, ModelError> {
        let trimmed = value.trim();
        let mut chars = trimmed.chars();
        if chars.next().is_none() {
            return Err(ModelError::InvalidCaseId(value.to_string()));
        }
        chars
            .as_str()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ModelError::InvalidCaseId(value.to_string()))
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CaseId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ModelError::InvalidCaseId(s.to_string()))
    }
}

impl From<u64> for CaseId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct SectionId(u64);

impl SectionId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct RunId(u64);

impl RunId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A (project, suite) pair identifying one catalog in one account.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SuiteScope {
    pub project_id: u64,
    pub suite_id: u64,
}

impl SuiteScope {
    pub const fn new(project_id: u64, suite_id: u64) -> Self {
        Self {
            project_id,
            suite_id,
        }
    }
}

impl fmt::Display for SuiteScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "project {} / suite {}", self.project_id, self.suite_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prefixed_case_ids() {
        assert_eq!(CaseId::parse_prefixed("C61947").unwrap(), CaseId::new(61947));
        assert_eq!(CaseId::parse_prefixed(" T12 ").unwrap(), CaseId::new(12));
    }

    #[test]
    fn rejects_malformed_case_ids() {
        assert!(CaseId::parse_prefixed("").is_err());
        assert!(CaseId::parse_prefixed("C").is_err());
        assert!(CaseId::parse_prefixed("C12a").is_err());
        assert!(CaseId::parse_prefixed("12").is_ok_and(|id| id == CaseId::new(2)));
    }

    #[test]
    fn plain_parse_has_no_prefix() {
        assert_eq!("42".parse::<CaseId>().unwrap(), CaseId::new(42));
        assert!("C42".parse::<CaseId>().is_err());
    }
}
