//! Identity reconciliation between two TestRail catalogs.
//!
//! The accounts share no case identifiers, so cases are correlated through a
//! natural key: the name of the enclosing section joined with the case title.
//! The result is a partial [`CorrespondenceMap`](trailer_model::CorrespondenceMap)
//! from source case ids to target case ids.
//!
//! # Duplicates
//!
//! A key that occurs twice in the source must occur exactly twice in the
//! target. Such pairs are resolved by id order (smaller to smaller, larger to
//! larger), which is a heuristic and not a semantic match. Any other shape of
//! source duplication is rejected with a [`ReconcileError`]. A key unique in
//! the source but repeated in the target maps to the last target case listed.

#![deny(unsafe_code)]

pub mod duplicates;
pub mod engine;
pub mod error;
pub mod key;
pub mod sections;

pub use duplicates::DuplicateGroups;
pub use engine::{ReconcileReport, Reconciler, Reconciliation, reconcile};
pub use error::{ReconcileError, Result, Side};
pub use key::NaturalKey;
pub use sections::SectionIndex;
