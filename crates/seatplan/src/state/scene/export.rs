//! Hierarchical export of the flat scene

use shared::{boundary_id, ElementKind, ExportedLayout, ExportedSection, ExportedTable};

use super::SceneState;

impl SceneState {
    /// Group the scene into tables with their chairs, sections with their
    /// boundary and chairs, and every other element flat.
    pub fn prepare_export(&self) -> ExportedLayout {
        let scene = &self.scene;
        let mut layout = ExportedLayout::default();

        for element in &scene.elements {
            match &element.kind {
                ElementKind::Table { .. } => layout.tables.push(ExportedTable {
                    table: element.clone(),
                    chairs: scene.table_chairs(&element.id).cloned().collect(),
                }),
                ElementKind::Chair { parent, .. } => {
                    let live = match parent.table_id() {
                        Some(table_id) => scene.element(table_id).is_some_and(|t| t.is_table()),
                        None => parent.section_id().is_some_and(|s| scene.section(s).is_some()),
                    };
                    if !live {
                        tracing::warn!("Skipping orphan chair {} in export", element.id);
                    }
                }
                ElementKind::SectionBoundary { .. } => {}
                _ => layout.elements.push(element.clone()),
            }
        }

        for section in &scene.sections {
            layout.sections.push(ExportedSection {
                section: section.clone(),
                boundary: scene.element(&boundary_id(&section.id)).cloned(),
                chairs: scene.section_chairs(&section.id).cloned().collect(),
            });
        }
        layout
    }
}
