//! Cross-account case identifier translation table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::CaseId;

/// Maps source case ids to target case ids.
///
/// Each source id maps to at most one target id. The map is partial: source
/// cases without a counterpart are absent rather than mapped to a sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrespondenceMap(BTreeMap<CaseId, CaseId>);

impl CorrespondenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, source: CaseId) -> Option<CaseId> {
        self.0.get(&source).copied()
    }

    pub fn contains(&self, source: CaseId) -> bool {
        self.0.contains_key(&source)
    }

    /// Records `source -> target`, returning the target it replaced.
    pub fn insert(&mut self, source: CaseId, target: CaseId) -> Option<CaseId> {
        self.0.insert(source, target)
    }

    /// Applies manual entries over the automatic ones; overrides always win.
    ///
    /// Returns how many entries replaced an existing mapping.
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<CaseId, CaseId>) -> usize {
        overrides
            .iter()
            .filter(|(source, target)| self.0.insert(**source, **target).is_some())
            .count()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CaseId, CaseId)> + '_ {
        self.0.iter().map(|(source, target)| (*source, *target))
    }
}

impl FromIterator<(CaseId, CaseId)> for CorrespondenceMap {
    fn from_iter<I: IntoIterator<Item = (CaseId, CaseId)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_automatic_entries() {
        let mut map: CorrespondenceMap = [(CaseId::new(1), CaseId::new(10))].into_iter().collect();
        let overrides = BTreeMap::from([
            (CaseId::new(1), CaseId::new(99)),
            (CaseId::new(2), CaseId::new(20)),
        ]);

        let replaced = map.apply_overrides(&overrides);

        assert_eq!(replaced, 1);
        assert_eq!(map.get(CaseId::new(1)), Some(CaseId::new(99)));
        assert_eq!(map.get(CaseId::new(2)), Some(CaseId::new(20)));
        assert_eq!(map.get(CaseId::new(3)), None);
    }
}
