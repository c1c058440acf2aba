//! Translation of source result rows into a run payload for the target.

use tracing::{debug, warn};
use trailer_model::{CaseId, CorrespondenceMap, ResultRow, RunPayload, StatusTable, TranslatedResult, is_untested};

use crate::error::{Result, TransferError};

/// A run payload plus the source cases that had no counterpart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translation {
    pub payload: RunPayload,
    pub unmapped: Vec<CaseId>,
}

/// Rewrites rows against the target account.
///
/// The run name is taken from the first row. Rows without a mapped case are
/// skipped; `Untested` rows add the case to the run without a result. A status
/// missing from `statuses` aborts the translation.
pub fn translate(
    rows: &[ResultRow],
    map: &CorrespondenceMap,
    statuses: &StatusTable,
) -> Result<Translation> {
    let name = rows.first().map(|row| row.run_label.as_str()).unwrap_or_default();
    let mut translation = Translation {
        payload: RunPayload::new(name),
        unmapped: Vec::new(),
    };

    for row in rows {
        let Some(target) = map.get(row.source_case_id) else {
            warn!("Could not find {} in case ID lookup", row.source_case_id);
            translation.unmapped.push(row.source_case_id);
            continue;
        };

        translation.payload.member_case_ids.push(target);
        if is_untested(&row.status) {
            continue;
        }

        let status_id = statuses
            .get(&row.status)
            .ok_or_else(|| TransferError::UnknownStatus {
                status: row.status.clone(),
                case_id: row.source_case_id,
            })?;
        translation
            .payload
            .results
            .push(TranslatedResult::new(target, status_id, row.comment.clone()));
    }

    debug!(
        run = %translation.payload.name,
        members = translation.payload.member_case_ids.len(),
        results = translation.payload.results.len(),
        unmapped = translation.unmapped.len(),
        "translated result rows"
    );
    Ok(translation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(case: u64, status: &str, comment: &str) -> ResultRow {
        ResultRow {
            source_case_id: CaseId::new(case),
            status: status.to_string(),
            comment: comment.to_string(),
            run_label: "Regression".to_string(),
        }
    }

    fn map() -> CorrespondenceMap {
        [(1, 10), (2, 11)]
            .into_iter()
            .map(|(s, t)| (CaseId::new(s), CaseId::new(t)))
            .collect()
    }

    #[test]
    fn untested_rows_only_add_members() {
        let rows = vec![row(1, "Passed", "ok"), row(2, "Untested", "")];

        let translation = translate(&rows, &map(), &StatusTable::default()).unwrap();

        assert_eq!(translation.payload.name, "Regression");
        assert_eq!(
            translation.payload.member_case_ids,
            vec![CaseId::new(10), CaseId::new(11)]
        );
        assert_eq!(
            translation.payload.results,
            vec![TranslatedResult::new(CaseId::new(10), 1, "ok")]
        );
    }

    #[test]
    fn unmapped_rows_are_skipped() {
        let rows = vec![row(3, "Passed", ""), row(2, "Failed", "boom")];

        let translation = translate(&rows, &map(), &StatusTable::default()).unwrap();

        assert_eq!(translation.unmapped, vec![CaseId::new(3)]);
        assert_eq!(translation.payload.member_case_ids, vec![CaseId::new(11)]);
        assert_eq!(translation.payload.results[0].status_id, 5);
    }

    #[test]
    fn unknown_status_is_fatal() {
        let rows = vec![row(1, "Flaky", "")];
        let err = translate(&rows, &map(), &StatusTable::default()).unwrap_err();
        assert!(matches!(err, TransferError::UnknownStatus { ref status, .. } if status == "Flaky"));
    }

    #[test]
    fn unknown_status_on_unmapped_row_is_ignored() {
        let rows = vec![row(9, "Flaky", "")];
        let translation = translate(&rows, &map(), &StatusTable::default()).unwrap();
        assert!(translation.payload.results.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_payload() {
        let translation = translate(&[], &map(), &StatusTable::default()).unwrap();
        assert_eq!(translation, Translation::default());
    }
}
