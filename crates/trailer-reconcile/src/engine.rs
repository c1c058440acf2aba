//! Reconciliation engine implementation.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use tracing::{debug, info, warn};
use trailer_model::{CaseId, Catalog, CorrespondenceMap};

use crate::duplicates::{DuplicateGroups, ordered_pair};
use crate::error::{ReconcileError, Result, Side};
use crate::key::NaturalKey;
use crate::sections::SectionIndex;

/// Counts describing how a correspondence map was assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Source cases matched through a unique natural key.
    pub direct_matches: usize,
    /// Duplicate groups resolved by pairing ids in ascending order.
    pub duplicate_pairs: usize,
    /// Unique source keys that appear more than once in the target.
    pub target_collisions: usize,
    /// Target cases whose natural key never appears in the source.
    pub unmatched_target: Vec<CaseId>,
    /// Source cases left without a counterpart after overrides.
    pub unmatched_source: Vec<CaseId>,
    /// Manual entries applied after the automatic pass.
    pub overrides_applied: usize,
    /// Manual entries that replaced an automatic mapping.
    pub overrides_replaced: usize,
}

/// Output of a reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub map: CorrespondenceMap,
    pub report: ReconcileReport,
}

/// Builds source-to-target case correspondences from natural keys.
///
/// Keys that occur exactly twice in both catalogs are paired by id order:
/// the smaller source id maps to the smaller target id. This assumes both
/// accounts created the duplicates in the same relative order; the content of
/// the cases is never compared.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    overrides: BTreeMap<CaseId, CaseId>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Manual source-to-target entries, applied last and always winning.
    #[must_use]
    pub fn with_overrides(mut self, overrides: BTreeMap<CaseId, CaseId>) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn overrides(&self) -> &BTreeMap<CaseId, CaseId> {
        &self.overrides
    }

    pub fn reconcile(&self, source: &Catalog, target: &Catalog) -> Result<Reconciliation> {
        let source_sections = SectionIndex::build(Side::Source, &source.sections)?;
        let target_sections = SectionIndex::build(Side::Target, &target.sections)?;

        // Source pass: the first id seen for a key stays the baseline entry.
        let mut key_to_source: BTreeMap<NaturalKey, CaseId> = BTreeMap::new();
        let mut source_duplicates = DuplicateGroups::new();
        for case in &source.cases {
            let key = source_sections.natural_key(case)?;
            match key_to_source.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(case.id);
                }
                Entry::Occupied(slot) => {
                    debug!(key = %slot.key(), case_id = %case.id, "duplicate key in source catalog");
                    source_duplicates.record_repeat(slot.key(), *slot.get(), case.id);
                }
            }
        }

        // Target pass: unambiguous keys match directly, duplicated ones wait.
        let mut direct: BTreeMap<NaturalKey, Vec<CaseId>> = BTreeMap::new();
        let mut target_duplicates = DuplicateGroups::new();
        let mut report = ReconcileReport::default();
        for case in &target.cases {
            let key = target_sections.natural_key(case)?;
            if source_duplicates.contains(&key) {
                target_duplicates.push(&key, case.id);
            } else if key_to_source.contains_key(&key) {
                direct.entry(key).or_default().push(case.id);
            } else {
                report.unmatched_target.push(case.id);
            }
        }

        // A key unique in the source but repeated in the target maps to the
        // last target case seen.
        let mut map = CorrespondenceMap::new();
        for (key, targets) in direct {
            let Some(&target_id) = targets.last() else {
                continue;
            };
            if targets.len() > 1 {
                warn!(
                    key = %key,
                    target_cases = targets.len(),
                    chosen = %target_id,
                    "target catalog repeats a key that is unique in the source; keeping the last case"
                );
                report.target_collisions += 1;
            }
            map.insert(key_to_source[&key], target_id);
            report.direct_matches += 1;
        }

        for (key, source_ids) in source_duplicates.iter() {
            let Some(target_ids) = target_duplicates.get(key) else {
                return Err(ReconcileError::MissingTargetDuplicates { key: key.clone() });
            };
            let mismatch = || ReconcileError::DuplicateGroupMismatch {
                key: key.clone(),
                source_count: source_ids.len(),
                target_count: target_ids.len(),
            };
            let (source_low, source_high) = ordered_pair(source_ids).ok_or_else(mismatch)?;
            let (target_low, target_high) = ordered_pair(target_ids).ok_or_else(mismatch)?;
            debug!(
                key = %key,
                pairs = %format!("{source_low}->{target_low}, {source_high}->{target_high}"),
                "paired duplicate cases by id order"
            );
            map.insert(source_low, target_low);
            map.insert(source_high, target_high);
            report.duplicate_pairs += 1;
        }

        report.overrides_applied = self.overrides.len();
        report.overrides_replaced = map.apply_overrides(&self.overrides);
        if report.overrides_replaced > 0 {
            warn!(
                replaced = report.overrides_replaced,
                "manual overrides replaced automatic mappings"
            );
        }

        report.unmatched_source = source
            .cases
            .iter()
            .map(|case| case.id)
            .filter(|id| !map.contains(*id))
            .collect();

        info!(
            mapped = map.len(),
            direct = report.direct_matches,
            duplicate_pairs = report.duplicate_pairs,
            target_collisions = report.target_collisions,
            unmatched_source = report.unmatched_source.len(),
            unmatched_target = report.unmatched_target.len(),
            overrides = report.overrides_applied,
            "reconciliation complete"
        );

        Ok(Reconciliation { map, report })
    }
}

/// Reconciles two catalogs, then applies `overrides`.
pub fn reconcile(
    source: &Catalog,
    target: &Catalog,
    overrides: &BTreeMap<CaseId, CaseId>,
) -> Result<CorrespondenceMap> {
    Reconciler::new()
        .with_overrides(overrides.clone())
        .reconcile(source, target)
        .map(|reconciliation| reconciliation.map)
}

#[cfg(test)]
mod tests {
    use trailer_model::{CaseRecord, Section};

    use super::*;

    fn catalog(sections: &[(u64, &str)], cases: &[(u64, u64, &str)]) -> Catalog {
        Catalog::new(
            sections
                .iter()
                .map(|(id, name)| Section::new(*id, *name))
                .collect(),
            cases
                .iter()
                .map(|(id, section, title)| CaseRecord::new(*id, *section, *title))
                .collect(),
        )
    }

    #[test]
    fn target_only_keys_are_reported_unmatched() {
        let source = catalog(&[(1, "A")], &[(1, 1, "X")]);
        let target = catalog(&[(5, "A")], &[(10, 5, "X"), (11, 5, "Y")]);

        let result = Reconciler::new().reconcile(&source, &target).unwrap();

        assert_eq!(result.map.get(CaseId::new(1)), Some(CaseId::new(10)));
        assert_eq!(result.report.unmatched_target, vec![CaseId::new(11)]);
        assert!(result.report.unmatched_source.is_empty());
    }

    #[test]
    fn source_triplicates_are_rejected() {
        let source = catalog(&[(1, "A")], &[(1, 1, "X"), (2, 1, "X"), (3, 1, "X")]);
        let target = catalog(&[(5, "A")], &[(10, 5, "X"), (11, 5, "X")]);

        let err = Reconciler::new().reconcile(&source, &target).unwrap_err();
        assert!(matches!(
            err,
            ReconcileError::DuplicateGroupMismatch {
                source_count: 3,
                target_count: 2,
                ..
            }
        ));
    }

    #[test]
    fn source_duplicates_without_target_group_are_rejected() {
        let source = catalog(&[(1, "A")], &[(1, 1, "X"), (2, 1, "X")]);
        let target = catalog(&[(5, "A")], &[(10, 5, "Y")]);

        let err = Reconciler::new().reconcile(&source, &target).unwrap_err();
        assert_eq!(
            err,
            ReconcileError::MissingTargetDuplicates {
                key: NaturalKey::new("A", "X")
            }
        );
    }

    #[test]
    fn target_duplicates_of_a_unique_source_key_keep_the_last_case() {
        let source = catalog(&[(1, "A")], &[(1, 1, "X"), (2, 1, "Y")]);
        let target = catalog(&[(5, "A")], &[(11, 5, "X"), (10, 5, "X"), (12, 5, "Y")]);

        let result = Reconciler::new().reconcile(&source, &target).unwrap();

        assert_eq!(result.map.get(CaseId::new(1)), Some(CaseId::new(10)));
        assert_eq!(result.map.get(CaseId::new(2)), Some(CaseId::new(12)));
        assert_eq!(result.report.target_collisions, 1);
        assert_eq!(result.report.direct_matches, 2);
    }

    #[test]
    fn report_counts_overrides() {
        let source = catalog(&[(1, "A")], &[(1, 1, "X"), (2, 1, "Renamed")]);
        let target = catalog(&[(5, "A")], &[(10, 5, "X"), (11, 5, "New name")]);
        let overrides = BTreeMap::from([(CaseId::new(2), CaseId::new(11))]);

        let result = Reconciler::new()
            .with_overrides(overrides)
            .reconcile(&source, &target)
            .unwrap();

        assert_eq!(result.map.get(CaseId::new(2)), Some(CaseId::new(11)));
        assert_eq!(result.report.overrides_applied, 1);
        assert_eq!(result.report.overrides_replaced, 0);
        assert!(result.report.unmatched_source.is_empty());
    }
}
