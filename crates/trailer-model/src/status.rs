//! Status names and the table translating them into target status ids.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Status that records run membership without a result.
pub const UNTESTED: &str = "Untested";

pub fn is_untested(status: &str) -> bool {
    status == UNTESTED
}

/// Maps status names to the numeric status ids of the target account.
///
/// Custom statuses are numbered per account, so the table is configuration
/// rather than a constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusTable(BTreeMap<String, u32>);

impl StatusTable {
    pub fn new(entries: BTreeMap<String, u32>) -> Self {
        Self(entries)
    }

    pub fn get(&self, status: &str) -> Option<u32> {
        self.0.get(status).copied()
    }

    pub fn insert(&mut self, status: impl Into<String>, id: u32) -> Option<u32> {
        self.0.insert(status.into(), id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(name, id)| (name.as_str(), *id))
    }
}

impl Default for StatusTable {
    fn default() -> Self {
        let entries = [
            ("Passed", 1),
            ("Blocked", 2),
            (UNTESTED, 3),
            ("Retest", 4),
            ("Failed", 5),
            ("WontTest", 12),
            ("MixedSuccess", 11),
            ("WontFix", 10),
            ("InProgress", 7),
            ("NotRelevant", 12),
        ];
        Self(
            entries
                .into_iter()
                .map(|(name, id)| (name.to_string(), id))
                .collect(),
        )
    }
}
