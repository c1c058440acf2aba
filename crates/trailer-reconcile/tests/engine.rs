use std::collections::BTreeMap;

use proptest::prelude::*;
use trailer_model::{CaseId, CaseRecord, Catalog, Section};
use trailer_reconcile::{ReconcileError, Reconciler, reconcile};

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

fn ids(pairs: &[(u64, u64)]) -> Vec<(CaseId, CaseId)> {
    pairs
        .iter()
        .map(|(s, t)| (CaseId::new(*s), CaseId::new(*t)))
        .collect()
}

#[test]
fn matches_cases_by_section_and_title() {
    let source = catalog(&[(1, "A")], &[(1, 1, "X"), (2, 1, "Y")]);
    let target = catalog(&[(7, "A")], &[(10, 7, "X"), (11, 7, "Y")]);

    let map = reconcile(&source, &target, &BTreeMap::new()).expect("reconcile");

    assert_eq!(map.iter().collect::<Vec<_>>(), ids(&[(1, 10), (2, 11)]));
}

#[test]
fn section_ids_differ_between_accounts() {
    let source = catalog(
        &[(1, "Login"), (2, "Logout")],
        &[(100, 1, "happy path"), (101, 2, "happy path")],
    );
    let target = catalog(
        &[(90, "Logout"), (91, "Login")],
        &[(500, 90, "happy path"), (501, 91, "happy path")],
    );

    let map = reconcile(&source, &target, &BTreeMap::new()).expect("reconcile");

    assert_eq!(map.get(CaseId::new(100)), Some(CaseId::new(501)));
    assert_eq!(map.get(CaseId::new(101)), Some(CaseId::new(500)));
}

#[test]
fn missing_counterparts_are_absent() {
    let source = catalog(&[(1, "A")], &[(1, 1, "X"), (2, 1, "Deleted")]);
    let target = catalog(&[(7, "A")], &[(10, 7, "X")]);

    let map = reconcile(&source, &target, &BTreeMap::new()).expect("reconcile");

    assert_eq!(map.len(), 1);
    assert_eq!(map.get(CaseId::new(2)), None);
}

#[test]
fn duplicate_pairs_map_by_id_order() {
    let source = catalog(&[(1, "A")], &[(20, 1, "X"), (5, 1, "X")]);
    let target = catalog(&[(7, "A")], &[(70, 7, "X"), (60, 7, "X")]);

    let map = reconcile(&source, &target, &BTreeMap::new()).expect("reconcile");

    assert_eq!(map.get(CaseId::new(5)), Some(CaseId::new(60)));
    assert_eq!(map.get(CaseId::new(20)), Some(CaseId::new(70)));
}

#[test]
fn two_against_three_fails() {
    let source = catalog(&[(1, "A")], &[(1, 1, "X"), (2, 1, "X")]);
    let target = catalog(&[(7, "A")], &[(10, 7, "X"), (11, 7, "X"), (12, 7, "X")]);

    let err = reconcile(&source, &target, &BTreeMap::new()).unwrap_err();
    assert!(matches!(
        err,
        ReconcileError::DuplicateGroupMismatch {
            source_count: 2,
            target_count: 3,
            ..
        }
    ));
}

#[test]
fn repeated_target_key_does_not_block_other_matches() {
    let source = catalog(&[(1, "A")], &[(1, 1, "X"), (2, 1, "Y")]);
    let target = catalog(&[(7, "A")], &[(10, 7, "X"), (11, 7, "X"), (12, 7, "Y")]);

    let map = reconcile(&source, &target, &BTreeMap::new()).expect("reconcile");

    assert_eq!(map.iter().collect::<Vec<_>>(), ids(&[(1, 11), (2, 12)]));
}

#[test]
fn three_against_two_fails() {
    let source = catalog(&[(1, "A")], &[(1, 1, "X"), (2, 1, "X"), (3, 1, "X")]);
    let target = catalog(&[(7, "A")], &[(10, 7, "X"), (11, 7, "X")]);

    assert!(reconcile(&source, &target, &BTreeMap::new()).is_err());
}

#[test]
fn unknown_section_in_source_fails() {
    let source = catalog(&[(1, "A")], &[(1, 2, "X")]);
    let target = catalog(&[(7, "A")], &[]);

    let err = reconcile(&source, &target, &BTreeMap::new()).unwrap_err();
    assert!(matches!(err, ReconcileError::UnknownSection { .. }));
}

#[test]
fn overrides_win_over_automatic_matches() {
    let source = catalog(&[(1, "A")], &[(1, 1, "X"), (61947, 1, "Old title")]);
    let target = catalog(&[(7, "A")], &[(10, 7, "X"), (4875610, 7, "New title")]);
    let overrides = BTreeMap::from([
        (CaseId::new(1), CaseId::new(11)),
        (CaseId::new(61947), CaseId::new(4875610)),
    ]);

    let result = Reconciler::new()
        .with_overrides(overrides)
        .reconcile(&source, &target)
        .expect("reconcile");

    assert_eq!(result.map.get(CaseId::new(1)), Some(CaseId::new(11)));
    assert_eq!(result.map.get(CaseId::new(61947)), Some(CaseId::new(4875610)));
    assert_eq!(result.report.overrides_replaced, 1);
}

proptest! {
    #[test]
    fn unique_keys_map_to_identical_keys(
        titles in prop::collection::btree_set("[a-z]{1,6}", 1..20),
        offset in 1u64..10_000,
    ) {
        let titles: Vec<String> = titles.into_iter().collect();
        let sections = vec![Section::new(1, "S")];
        let source_cases: Vec<CaseRecord> = titles
            .iter()
            .enumerate()
            .map(|(i, title)| CaseRecord::new(i as u64 + 1, 1, title.clone()))
            .collect();
        // Reverse the target so ids are not aligned with the source order.
        let target_cases: Vec<CaseRecord> = titles
            .iter()
            .rev()
            .enumerate()
            .map(|(i, title)| CaseRecord::new(i as u64 + offset, 1, title.clone()))
            .collect();
        let source = Catalog::new(sections.clone(), source_cases.clone());
        let target = Catalog::new(sections, target_cases.clone());

        let map = reconcile(&source, &target, &BTreeMap::new()).unwrap();

        prop_assert_eq!(map.len(), titles.len());
        let mut seen_targets = std::collections::BTreeSet::new();
        for (source_id, target_id) in map.iter() {
            prop_assert!(seen_targets.insert(target_id));
            let s = source_cases.iter().find(|c| c.id == source_id).unwrap();
            let t = target_cases.iter().find(|c| c.id == target_id).unwrap();
            prop_assert_eq!(&s.title, &t.title);
        }
    }

    #[test]
    fn duplicate_resolution_ignores_input_order(
        s1 in 1u64..1000,
        s_gap in 1u64..1000,
        t1 in 1u64..1000,
        t_gap in 1u64..1000,
        swap_source: bool,
        swap_target: bool,
    ) {
        let s2 = s1 + s_gap;
        let t2 = t1 + t_gap;
        let source_ids = if swap_source { [s2, s1] } else { [s1, s2] };
        let target_ids = if swap_target { [t2, t1] } else { [t1, t2] };
        let source = catalog(
            &[(1, "A")],
            &[(source_ids[0], 1, "dup"), (source_ids[1], 1, "dup")],
        );
        let target = catalog(
            &[(2, "A")],
            &[(target_ids[0], 2, "dup"), (target_ids[1], 2, "dup")],
        );

        let map = reconcile(&source, &target, &BTreeMap::new()).unwrap();

        prop_assert_eq!(map.get(CaseId::new(s1)), Some(CaseId::new(t1)));
        prop_assert_eq!(map.get(CaseId::new(s2)), Some(CaseId::new(t2)));
        prop_assert_eq!(map.len(), 2);
    }
}
