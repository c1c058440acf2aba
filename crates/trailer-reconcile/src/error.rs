//! Error types for reconciliation.

use std::fmt;

use thiserror::Error;
use trailer_model::{CaseId, SectionId};

use crate::key::NaturalKey;

/// Which catalog a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    Source,
    Target,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Integrity violations in the fetched catalogs.
///
/// None of these are recoverable at this layer; callers are expected to stop.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// A case points at a section its own catalog does not contain.
    #[error("{side} case {case_id} references unknown section {section_id}")]
    UnknownSection {
        side: Side,
        case_id: CaseId,
        section_id: SectionId,
    },

    /// The same section id was listed twice.
    #[error("{side} catalog lists section {section_id} more than once")]
    DuplicateSection { side: Side, section_id: SectionId },

    /// The source duplicates a key that the target does not duplicate at all.
    #[error("ambiguous or missing duplicate correspondence for '{key}': no target duplicates")]
    MissingTargetDuplicates { key: NaturalKey },

    /// Duplicate groups can only be paired two against two.
    #[error(
        "ambiguous or missing duplicate correspondence for '{key}': \
         {source_count} source case(s) against {target_count} target case(s)"
    )]
    DuplicateGroupMismatch {
        key: NaturalKey,
        source_count: usize,
        target_count: usize,
    },
}

pub type Result<T> = std::result::Result<T, ReconcileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReconcileError::UnknownSection {
            side: Side::Target,
            case_id: CaseId::new(7),
            section_id: SectionId::new(3),
        };
        assert_eq!(err.to_string(), "target case 7 references unknown section 3");

        let err = ReconcileError::DuplicateGroupMismatch {
            key: NaturalKey::new("Login", "works"),
            source_count: 2,
            target_count: 3,
        };
        assert!(err.to_string().contains("'Login_works'"));
        assert!(err.to_string().contains("2 source case(s) against 3 target case(s)"));
    }
}
