//! Section id to name lookup for one catalog.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use trailer_model::{CaseRecord, Section, SectionId};

use crate::error::{ReconcileError, Result, Side};
use crate::key::NaturalKey;

#[derive(Debug, Clone)]
pub struct SectionIndex<'a> {
    side: Side,
    names: BTreeMap<SectionId, &'a str>,
}

impl<'a> SectionIndex<'a> {
    pub fn build(side: Side, sections: &'a [Section]) -> Result<Self> {
        let mut names = BTreeMap::new();
        for section in sections {
            match names.entry(section.id) {
                Entry::Vacant(slot) => {
                    slot.insert(section.name.as_str());
                }
                Entry::Occupied(_) => {
                    return Err(ReconcileError::DuplicateSection {
                        side,
                        section_id: section.id,
                    });
                }
            }
        }
        Ok(Self { side, names })
    }

    pub fn name(&self, section_id: SectionId) -> Option<&'a str> {
        self.names.get(&section_id).copied()
    }

    pub fn natural_key(&self, case: &CaseRecord) -> Result<NaturalKey> {
        let section_name =
            self.name(case.section_id)
                .ok_or(ReconcileError::UnknownSection {
                    side: self.side,
                    case_id: case.id,
                    section_id: case.section_id,
                })?;
        Ok(NaturalKey::new(section_name, &case.title))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
