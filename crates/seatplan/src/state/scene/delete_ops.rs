//! Deletion with ownership cascades and seat renumbering

use std::collections::{BTreeSet, HashSet};

use shared::{boundary_id, ChairParent, ElementId, ElementKind, SectionId};

use super::SceneState;

impl SceneState {
    /// Delete the given elements.
    ///
    /// A boundary takes its whole section with it and a table takes its
    /// chairs. Individually deleted chairs leave the remaining seats of each
    /// affected parent renumbered from 1. Returns the number of elements
    /// removed; nothing is scheduled when that is zero.
    pub fn delete_elements(&mut self, ids: &[ElementId]) -> usize {
        let mut doomed: HashSet<ElementId> = HashSet::new();
        let mut sections: HashSet<SectionId> = HashSet::new();
        let mut touched_sections: BTreeSet<SectionId> = BTreeSet::new();
        let mut touched_tables: BTreeSet<ElementId> = BTreeSet::new();

        for id in ids {
            let Some(element) = self.scene.element(id) else {
                tracing::warn!("Cannot delete element {id}: not found");
                continue;
            };
            doomed.insert(id.clone());
            match &element.kind {
                ElementKind::SectionBoundary { section_id, .. } => {
                    sections.insert(section_id.clone());
                    doomed.extend(self.scene.section_chairs(section_id).map(|c| c.id.clone()));
                }
                ElementKind::Table { .. } => {
                    doomed.extend(self.scene.table_chairs(id).map(|c| c.id.clone()));
                }
                ElementKind::Chair { parent, .. } => match parent {
                    ChairParent::Section { section_id, .. } => {
                        touched_sections.insert(section_id.clone());
                    }
                    ChairParent::Table { table_id } => {
                        touched_tables.insert(table_id.clone());
                    }
                },
                _ => {}
            }
        }
        if doomed.is_empty() {
            return 0;
        }

        let before = self.scene.elements.len();
        self.scene.elements.retain(|e| !doomed.contains(&e.id));
        self.scene.sections.retain(|s| !sections.contains(&s.id));
        let removed = before - self.scene.elements.len();

        for section_id in touched_sections.iter().filter(|s| !sections.contains(*s)) {
            self.renumber_section_chairs(section_id);
        }
        for table_id in touched_tables.iter().filter(|t| !doomed.contains(*t)) {
            self.renumber_table_chairs(table_id);
        }

        self.notify_mutated();
        tracing::info!(
            "Deleted {removed} element(s), {} section(s)",
            sections.len()
        );
        removed
    }

    /// Delete a section with its boundary and chairs
    pub fn delete_section(&mut self, section_id: &str) -> usize {
        if self.scene.section(section_id).is_none() {
            tracing::warn!("Cannot delete section {section_id}: not found");
            return 0;
        }
        self.delete_elements(&[boundary_id(section_id)])
    }
}
