//! Resize/rotate gestures applied to the scene

use shared::{ElementId, ElementKind, Point2D};

use super::SceneState;
use crate::geometry::{section_bounding_size, validate_shape};
use crate::transform::{map_transform, SemanticPatch, TransformPatch, TransformRecord};

impl SceneState {
    /// Apply the records of one finished transform gesture.
    ///
    /// Returns how many elements were updated.
    pub fn apply_transform(&mut self, records: &[TransformRecord]) -> usize {
        let mut applied = 0;
        for record in records {
            let Some(element) = self.scene.element(&record.id) else {
                tracing::warn!("Cannot transform element {}: not found", record.id);
                continue;
            };
            let patch = map_transform(element, record, &self.settings);
            if self.apply_patch(patch) {
                applied += 1;
            }
        }
        if applied > 0 {
            self.notify_mutated();
        }
        applied
    }

    fn apply_patch(&mut self, patch: TransformPatch) -> bool {
        let TransformPatch {
            id,
            position,
            rotation,
            patch,
        } = patch;
        if let SemanticPatch::Boundary { height, .. } = patch {
            return self.resize_section(&id, position, rotation, height);
        }

        let Some(element) = self.scene.element_mut(&id) else {
            return false;
        };
        element.position = position;
        element.rotation = rotation;
        match (&mut element.kind, patch) {
            (
                ElementKind::Table { shape, .. } | ElementKind::Stage { shape, .. },
                SemanticPatch::Shape(scaled),
            ) => match validate_shape(&scaled) {
                Ok(()) => *shape = scaled,
                Err(e) => tracing::warn!("Keeping previous shape of {id}: {e}"),
            },
            (ElementKind::Floor { start, end, .. }, SemanticPatch::Floor { start: s, end: e }) => {
                *start = s;
                *end = e;
            }
            (
                ElementKind::Entrance { scale_x, scale_y } | ElementKind::Exit { scale_x, scale_y },
                SemanticPatch::MarkerScale {
                    scale_x: sx,
                    scale_y: sy,
                },
            ) => {
                *scale_x = sx;
                *scale_y = sy;
            }
            (ElementKind::Text { font_size, .. }, SemanticPatch::Text { font_size: size }) => {
                *font_size = size;
            }
            (_, SemanticPatch::PoseOnly) => {}
            (kind, other) => {
                tracing::warn!("Patch {other:?} does not apply to {kind:?}");
            }
        }

        if element.is_table() {
            self.regenerate_table_chairs(&id);
        }
        true
    }

    /// Boundary transform: the section keeps its width and gains or loses
    /// rows to match the new height, then its chairs are regenerated with
    /// per-seat overrides kept.
    fn resize_section(
        &mut self,
        boundary: &ElementId,
        position: Point2D,
        rotation: f64,
        height: f64,
    ) -> bool {
        let Some(section_id) = self
            .scene
            .element(boundary)
            .and_then(|e| e.boundary_section())
            .cloned()
        else {
            return false;
        };
        let overrides = self.section_chair_overrides(&section_id);

        let chair_height = self.settings.chair.height;
        let padding = self.settings.section.padding;
        let max_rows = self.settings.section.max_rows;
        let Some(section) = self.scene.section_mut(&section_id) else {
            tracing::warn!("Boundary {boundary} points at missing section {section_id}");
            return false;
        };
        section.position = position;
        section.rotation = rotation;
        if section.row_spacing > 0.0 {
            let content = height - chair_height - 2.0 * padding;
            let extra = (content / section.row_spacing).round().max(0.0) as u32;
            section.rows = extra.saturating_add(1).min(max_rows);
        }
        let (width, height) = section_bounding_size(section, &self.settings);
        section.width = width;
        section.height = height;

        self.sync_boundary(&section_id);
        self.regenerate_section_chairs(&section_id, &overrides);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::scene::{PlacementConfig, SectionDraft, SectionUpdate};
    use shared::{boundary_id, ElementType, ShapeGeometry};

    fn record(id: &str, position: Point2D, sx: f64, sy: f64) -> TransformRecord {
        TransformRecord {
            id: id.to_string(),
            position,
            rotation: 0.0,
            scale_x: sx,
            scale_y: sy,
        }
    }

    #[test]
    fn test_table_resize_regenerates_chairs() {
        let mut s = SceneState::default();
        let config = PlacementConfig {
            shape: ShapeGeometry::Circle { radius: 50.0 },
            chair_count: 4,
            chair_spacing: 20.0,
            ..PlacementConfig::default()
        };
        let id = s.add_element(ElementType::Table, Point2D::new(0.0, 0.0), &config).unwrap();
        assert_eq!(s.apply_transform(&[record(&id, Point2D::new(0.0, 0.0), 2.0, 2.0)]), 1);

        for chair in s.scene.table_chairs(&id) {
            let d = chair.position.x.hypot(chair.position.y);
            assert!((d - 145.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_boundary_resize_adds_rows_keeps_width() {
        let mut s = SceneState::default();
        let id = s
            .add_section(SectionDraft {
                position: Point2D::new(0.0, 0.0),
                width: 150.0,
                height: 120.0,
            })
            .unwrap();
        let before = s.get_section(&id).unwrap().clone();
        let boundary = boundary_id(&id);

        // Twice as deep: 125 -> 250 fits three more rows at 60
        let n = s.apply_transform(&[record(&boundary, Point2D::new(0.0, 0.0), 3.0, 2.0)]);
        assert_eq!(n, 1);
        let after = s.get_section(&id).unwrap();
        assert_eq!(after.cols, before.cols);
        assert_eq!(after.width, before.width);
        assert_eq!(after.rows, 4);
        assert_eq!(s.scene.section_chairs(&id).count(), 12);
        match s.get_element(&boundary).unwrap().kind {
            ElementKind::SectionBoundary { height, .. } => assert_eq!(height, after.height),
            _ => panic!("expected boundary"),
        }
    }

    #[test]
    fn test_boundary_resize_keeps_seat_overrides() {
        let mut s = SceneState::default();
        let id = s
            .add_section(SectionDraft {
                position: Point2D::new(0.0, 0.0),
                width: 150.0,
                height: 120.0,
            })
            .unwrap();
        let target = s.scene.section_chairs(&id).nth(2).unwrap().id.clone();
        if let Some(chair) = s.scene.element_mut(&target) {
            chair.fill = "#abcdef".to_string();
            if let ElementKind::Chair {
                is_reserved, icon, ..
            } = &mut chair.kind
            {
                *is_reserved = true;
                *icon = Some("vip".to_string());
            }
        }

        s.apply_transform(&[record(&boundary_id(&id), Point2D::new(0.0, 0.0), 1.0, 2.0)]);
        let chair = s.get_element(&target).unwrap();
        assert_eq!(chair.fill, "#abcdef");
        match &chair.kind {
            ElementKind::Chair {
                is_reserved, icon, ..
            } => {
                assert!(*is_reserved);
                assert_eq!(icon.as_deref(), Some("vip"));
            }
            other => panic!("unexpected kind {other:?}"),
        }
        let plain = s.scene.section_chairs(&id).filter(|c| c.fill == "#abcdef").count();
        assert_eq!(plain, 1);
    }

    #[test]
    fn test_boundary_resize_with_tiny_spacing_stays_bounded() {
        let mut s = SceneState::default();
        let id = s
            .add_section(SectionDraft {
                position: Point2D::new(0.0, 0.0),
                width: 150.0,
                height: 120.0,
            })
            .unwrap();
        let update = SectionUpdate {
            row_spacing: Some(1e-12),
            ..SectionUpdate::default()
        };
        assert!(s.update_section_properties(&id, &update));

        let n = s.apply_transform(&[record(&boundary_id(&id), Point2D::new(0.0, 0.0), 1.0, 2.0)]);
        assert_eq!(n, 1);
        let section = s.get_section(&id).unwrap();
        assert!(section.rows <= s.settings.section.max_rows);
        let expected = (section.rows * section.cols) as usize;
        assert_eq!(s.scene.section_chairs(&id).count(), expected);
    }

    #[test]
    fn test_missing_record_is_skipped() {
        let mut s = SceneState::default();
        assert_eq!(s.apply_transform(&[record("ghost", Point2D::new(0.0, 0.0), 1.0, 1.0)]), 0);
        assert!(!s.has_pending_snapshot());
    }
}
