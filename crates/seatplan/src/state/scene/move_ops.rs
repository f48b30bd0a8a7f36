//! Translation of elements and sections

use std::collections::HashSet;

use shared::{boundary_id, ElementId, ElementKind, SectionId};

use super::SceneState;

impl SceneState {
    /// Translate the listed elements by a pixel delta.
    ///
    /// Tables bring their chairs and boundaries bring their section. A delta
    /// that rounds to zero on both axes is a no-op.
    pub fn move_elements(&mut self, ids: &[ElementId], dx: f64, dy: f64) -> bool {
        if dx.round() == 0.0 && dy.round() == 0.0 {
            tracing::debug!("Ignoring sub-pixel move ({dx:.2}, {dy:.2})");
            return false;
        }

        let mut moving: HashSet<ElementId> = HashSet::new();
        let mut sections: HashSet<SectionId> = HashSet::new();
        for id in ids {
            let Some(element) = self.scene.element(id) else {
                tracing::warn!("Cannot move element {id}: not found");
                continue;
            };
            moving.insert(id.clone());
            match &element.kind {
                ElementKind::SectionBoundary { section_id, .. } => {
                    sections.insert(section_id.clone());
                    moving.extend(self.scene.section_chairs(section_id).map(|c| c.id.clone()));
                }
                ElementKind::Table { .. } => {
                    moving.extend(self.scene.table_chairs(id).map(|c| c.id.clone()));
                }
                _ => {}
            }
        }
        if moving.is_empty() {
            return false;
        }

        for element in &mut self.scene.elements {
            if moving.contains(&element.id) {
                element.translate(dx, dy);
            }
        }
        for section in &mut self.scene.sections {
            if sections.contains(&section.id) {
                section.position = section.position.offset(dx, dy);
            }
        }
        self.notify_mutated();
        true
    }

    /// Translate a section's boundary and all of its chairs
    pub fn move_section(&mut self, section_id: &str, dx: f64, dy: f64) -> bool {
        self.move_elements(&[boundary_id(section_id)], dx, dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::scene::SectionDraft;
    use shared::Point2D;

    #[test]
    fn test_move_section_moves_boundary_and_chairs() {
        let mut s = SceneState::default();
        let id = s
            .add_section(SectionDraft {
                position: Point2D::new(0.0, 0.0),
                width: 100.0,
                height: 60.0,
            })
            .unwrap();
        let before: Vec<Point2D> = s.scene.section_chairs(&id).map(|c| c.position).collect();

        assert!(s.move_section(&id, 10.0, -5.0));
        assert_eq!(s.get_section(&id).unwrap().position, Point2D::new(10.0, -5.0));
        assert_eq!(
            s.get_element(&boundary_id(&id)).unwrap().position,
            Point2D::new(10.0, -5.0)
        );
        for (chair, old) in s.scene.section_chairs(&id).zip(before) {
            assert_eq!(chair.position, old.offset(10.0, -5.0));
        }
    }

    #[test]
    fn test_sub_pixel_move_is_noop() {
        let mut s = SceneState::default();
        let id = s
            .add_section(SectionDraft {
                position: Point2D::new(0.0, 0.0),
                width: 100.0,
                height: 60.0,
            })
            .unwrap();
        s.flush_snapshot();
        assert!(!s.move_section(&id, 0.3, -0.4));
        assert!(!s.has_pending_snapshot());
    }
}
