//! Section creation and property updates

use serde::{Deserialize, Serialize};
use shared::{Point2D, Section, SectionId};

use super::chairs::{boundary_element, ChairOverrides};
use super::SceneState;
use crate::geometry::{section_bounding_size, validate_section_grid, validate_section_layout};
use crate::state::settings::SectionSettings;

/// Rectangle drawn with the section tool
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionDraft {
    /// Top-left corner
    pub position: Point2D,
    pub width: f64,
    pub height: f64,
}

impl SectionDraft {
    /// Normalized rectangle spanned by two drag corners
    pub fn from_corners(a: Point2D, b: Point2D) -> Self {
        Self {
            position: Point2D::new(a.x.min(b.x), a.y.min(b.y)),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    /// (rows, cols) the draft would produce, at least one of each and
    /// capped at the configured maximum
    pub fn grid(&self, settings: &SectionSettings) -> (u32, u32) {
        let max_rows = f64::from(settings.max_rows.max(1));
        let max_cols = f64::from(settings.max_cols.max(1));
        let rows = (self.height / settings.cell_height).floor().max(1.0).min(max_rows) as u32;
        let cols = (self.width / settings.cell_width).floor().max(1.0).min(max_cols) as u32;
        (rows, cols)
    }
}

/// Partial section attributes from the properties panel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionUpdate {
    pub label: Option<String>,
    pub position: Option<Point2D>,
    pub rotation: Option<f64>,
    pub rows: Option<u32>,
    pub cols: Option<u32>,
    pub row_spacing: Option<f64>,
    pub col_spacing: Option<f64>,
    pub curve: Option<f64>,
    pub fill: Option<String>,
    pub stroke: Option<String>,
}

impl SectionUpdate {
    fn apply_to(&self, section: &mut Section) {
        if let Some(label) = &self.label {
            section.label.clone_from(label);
        }
        if let Some(position) = self.position {
            section.position = position;
        }
        if let Some(rotation) = self.rotation {
            section.rotation = rotation;
        }
        if let Some(rows) = self.rows {
            section.rows = rows;
        }
        if let Some(cols) = self.cols {
            section.cols = cols;
        }
        if let Some(spacing) = self.row_spacing {
            section.row_spacing = spacing;
        }
        if let Some(spacing) = self.col_spacing {
            section.col_spacing = spacing;
        }
        if let Some(curve) = self.curve {
            section.curve = curve;
        }
        if let Some(fill) = &self.fill {
            section.fill.clone_from(fill);
        }
        if let Some(stroke) = &self.stroke {
            section.stroke.clone_from(stroke);
        }
    }
}

fn layout_changed(a: &Section, b: &Section) -> bool {
    a.rows != b.rows
        || a.cols != b.cols
        || a.curve != b.curve
        || a.row_spacing != b.row_spacing
        || a.col_spacing != b.col_spacing
}

impl SceneState {
    /// Create a section with its boundary and chairs from a drawn rectangle.
    ///
    /// Returns None for drafts below the minimum drawable size.
    pub fn add_section(&mut self, draft: SectionDraft) -> Option<SectionId> {
        let min = self.settings.section.min_draw_size;
        if draft.width < min || draft.height < min {
            tracing::debug!(
                "Discarding section draft {:.0}x{:.0} below minimum {min}",
                draft.width,
                draft.height
            );
            return None;
        }

        let (rows, cols) = draft.grid(&self.settings.section);
        let palette = &self.settings.palette.section;
        let id = format!("section-{}", uuid::Uuid::new_v4());
        let mut section = Section {
            id: id.clone(),
            label: format!("Section {}", self.scene.sections.len() + 1),
            position: draft.position,
            rows,
            cols,
            row_spacing: self.settings.section.default_row_spacing,
            col_spacing: self.settings.section.default_col_spacing,
            curve: 0.0,
            rotation: 0.0,
            fill: palette.fill.clone(),
            stroke: palette.stroke.clone(),
            width: 0.0,
            height: 0.0,
        };
        let (width, height) = section_bounding_size(&section, &self.settings);
        section.width = width;
        section.height = height;

        self.scene.elements.push(boundary_element(&section));
        self.scene.sections.push(section);
        self.regenerate_section_chairs(&id, &ChairOverrides::new());

        self.notify_mutated();
        tracing::info!("Added section {id} ({rows}x{cols})");
        Some(id)
    }

    /// Patch a section and keep its boundary and chairs consistent.
    ///
    /// Grid changes regenerate the chairs (reserved/icon/custom colour kept
    /// per seat); pose changes move the surviving chairs; colour changes
    /// recolor chairs that were following the section colours.
    pub fn update_section_properties(&mut self, id: &str, update: &SectionUpdate) -> bool {
        let Some(current) = self.scene.section(id).cloned() else {
            tracing::warn!("Cannot update section {id}: not found");
            return false;
        };
        let mut next = current.clone();
        update.apply_to(&mut next);
        let limits = &self.settings.section;
        let valid = validate_section_layout(next.row_spacing, next.col_spacing, next.curve)
            .and_then(|()| {
                validate_section_grid(next.rows, next.cols, limits.max_rows, limits.max_cols)
            });
        if let Err(e) = valid {
            tracing::warn!("Rejected update for section {id}: {e}");
            return false;
        }
        let (width, height) = section_bounding_size(&next, &self.settings);
        next.width = width;
        next.height = height;
        if next == current {
            return false;
        }

        let overrides = self.section_chair_overrides(id);
        let relayout = layout_changed(&current, &next);
        let moved = next.position != current.position || next.rotation != current.rotation;
        let recolor = next.fill != current.fill || next.stroke != current.stroke;

        if let Some(slot) = self.scene.section_mut(id) {
            *slot = next;
        }
        self.sync_boundary(id);
        if relayout {
            self.regenerate_section_chairs(id, &overrides);
        } else {
            if moved {
                self.reposition_section_chairs(id);
            }
            if recolor {
                self.recolor_section_chairs(id, &current.fill, &current.stroke);
            }
        }
        self.notify_mutated();
        true
    }
}
