//! Natural keys observed more than once within one catalog.

use std::collections::BTreeMap;

use trailer_model::CaseId;

use crate::key::NaturalKey;

/// Case ids sharing a natural key, in the order they were seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateGroups(BTreeMap<NaturalKey, Vec<CaseId>>);

impl DuplicateGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a repeat of `key`. `first` seeds the group the first time.
    pub fn record_repeat(&mut self, key: &NaturalKey, first: CaseId, repeat: CaseId) {
        self.0
            .entry(key.clone())
            .or_insert_with(|| vec![first])
            .push(repeat);
    }

    pub fn push(&mut self, key: &NaturalKey, case_id: CaseId) {
        self.0.entry(key.clone()).or_default().push(case_id);
    }

    pub fn contains(&self, key: &NaturalKey) -> bool {
        self.0.contains_key(key)
    }

    pub fn get(&self, key: &NaturalKey) -> Option<&[CaseId]> {
        self.0.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaturalKey, &[CaseId])> {
        self.0.iter().map(|(key, ids)| (key, ids.as_slice()))
    }
}

/// Orders a two-element group as (smaller, larger); `None` for any other size.
pub fn ordered_pair(ids: &[CaseId]) -> Option<(CaseId, CaseId)> {
    match ids {
        [a, b] if a <= b => Some((*a, *b)),
        [a, b] => Some((*b, *a)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_occurrence_leads_the_group() {
        let key = NaturalKey::new("S", "T");
        let mut groups = DuplicateGroups::new();
        groups.record_repeat(&key, CaseId::new(5), CaseId::new(3));
        groups.record_repeat(&key, CaseId::new(5), CaseId::new(9));

        assert_eq!(
            groups.get(&key),
            Some([CaseId::new(5), CaseId::new(3), CaseId::new(9)].as_slice())
        );
    }

    #[test]
    fn ordered_pair_requires_two_ids() {
        assert_eq!(
            ordered_pair(&[CaseId::new(8), CaseId::new(2)]),
            Some((CaseId::new(2), CaseId::new(8)))
        );
        assert_eq!(ordered_pair(&[CaseId::new(1)]), None);
        assert_eq!(
            ordered_pair(&[CaseId::new(1), CaseId::new(2), CaseId::new(3)]),
            None
        );
    }
}
