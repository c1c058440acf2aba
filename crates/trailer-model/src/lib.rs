pub mod catalog;
pub mod correspondence;
pub mod error;
pub mod ids;
pub mod result;
pub mod status;

pub use catalog::{Catalog, CaseRecord, Section};
pub use correspondence::CorrespondenceMap;
pub use error::{ModelError, Result};
pub use ids::{CaseId, RunId, SectionId, SuiteScope};
pub use result::{ResultRow, RunPayload, TranslatedResult};
pub use status::{StatusTable, UNTESTED, is_untested};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_record_deserializes_remote_shape() {
        let json = r#"{"id": 61947, "section_id": 12, "title": "Login", "updated_on": 1546300800, "priority_id": 2}"#;
        let record: CaseRecord = serde_json::from_str(json).expect("deserialize case");
        assert_eq!(record.id, CaseId::new(61947));
        assert_eq!(record.section_id, SectionId::new(12));
        assert_eq!(record.updated_on, Some(1_546_300_800));
    }

    #[test]
    fn translated_result_serializes_wire_shape() {
        let result = TranslatedResult::new(CaseId::new(10), 1, "ok");
        let json = serde_json::to_value(&result).expect("serialize result");
        assert_eq!(
            json,
            serde_json::json!({"case_id": 10, "status_id": 1, "comment": "ok"})
        );
    }
}
