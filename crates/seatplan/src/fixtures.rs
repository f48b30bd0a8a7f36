//! Factory functions for creating test data.
//!
//! Builds sections, tables and scenes with fixed IDs so tests and replay
//! scripts can refer to them directly.

use shared::*;

use crate::geometry::section_bounding_size;
use crate::state::scene::chairs::{boundary_element, build_section_chairs, build_table_chairs};
use crate::state::scene::{PlacementConfig, SectionDraft};
use crate::state::settings::LayoutSettings;
use crate::transform::TransformRecord;

pub const DEMO_SECTION: &str = "section-demo";
pub const DEMO_TABLE: &str = "table-demo";
pub const DEMO_STAGE: &str = "stage-demo";

// ── Sections ────────────────────────────────────────────────────

/// A section sized by the default layout settings
pub fn section(id: &str, x: f64, y: f64, rows: u32, cols: u32, spacing: f64) -> Section {
    let settings = LayoutSettings::default();
    let mut section = Section {
        id: id.to_string(),
        label: id.to_string(),
        position: Point2D::new(x, y),
        rows,
        cols,
        row_spacing: spacing,
        col_spacing: spacing,
        curve: 0.0,
        rotation: 0.0,
        fill: settings.palette.section.fill.clone(),
        stroke: settings.palette.section.stroke.clone(),
        width: 0.0,
        height: 0.0,
    };
    let (width, height) = section_bounding_size(&section, &settings);
    section.width = width;
    section.height = height;
    section
}

/// Boundary followed by the section's chairs
pub fn section_elements(section: &Section) -> Vec<Element> {
    let mut elements = vec![boundary_element(section)];
    elements.extend(build_section_chairs(section, &Default::default()));
    elements
}

/// Rectangle dragged out with the section tool
pub fn draft(x: f64, y: f64, width: f64, height: f64) -> SectionDraft {
    SectionDraft {
        position: Point2D::new(x, y),
        width,
        height,
    }
}

// ── Tables and other elements ───────────────────────────────────

/// A table element without chairs attached
pub fn table(
    id: &str,
    x: f64,
    y: f64,
    shape: ShapeGeometry,
    chair_count: u32,
    chair_spacing: f64,
) -> Element {
    let palette = LayoutSettings::default().palette.table;
    Element {
        id: id.to_string(),
        position: Point2D::new(x, y),
        rotation: 0.0,
        fill: palette.fill,
        stroke: palette.stroke,
        kind: ElementKind::Table {
            shape,
            chair_count,
            chair_spacing,
            chair_ids: vec![],
            label: String::new(),
        },
    }
}

/// Table followed by its placed chairs
pub fn table_with_chairs(mut table: Element) -> Vec<Element> {
    let chairs = build_table_chairs(&table, &LayoutSettings::default().chair);
    if let ElementKind::Table { chair_ids, .. } = &mut table.kind {
        *chair_ids = chairs.iter().map(|c| c.id.clone()).collect();
    }
    let mut elements = vec![table];
    elements.extend(chairs);
    elements
}

pub fn stage(id: &str, x: f64, y: f64, width: f64, height: f64) -> Element {
    let palette = LayoutSettings::default().palette.stage;
    Element {
        id: id.to_string(),
        position: Point2D::new(x, y),
        rotation: 0.0,
        fill: palette.fill,
        stroke: palette.stroke,
        kind: ElementKind::Stage {
            shape: ShapeGeometry::Rect { width, height },
            label: "Stage".to_string(),
        },
    }
}

/// Placement config for a circle table
pub fn circle_table_config(radius: f64, chair_count: u32, chair_spacing: f64) -> PlacementConfig {
    PlacementConfig {
        shape: ShapeGeometry::Circle { radius },
        chair_count,
        chair_spacing,
        ..PlacementConfig::default()
    }
}

/// Transform record without rotation
pub fn scale_record(id: &str, position: Point2D, scale_x: f64, scale_y: f64) -> TransformRecord {
    TransformRecord {
        id: id.to_string(),
        position,
        rotation: 0.0,
        scale_x,
        scale_y,
    }
}

// ── Scenes ──────────────────────────────────────────────────────

/// A 2×3 section at the origin, a four-seat round table at (400, 400)
/// and a 200×100 stage at (600, 400)
pub fn demo_scene() -> Scene {
    let section = section(DEMO_SECTION, 0.0, 0.0, 2, 3, 60.0);
    let mut elements = section_elements(&section);
    elements.extend(table_with_chairs(table(
        DEMO_TABLE,
        400.0,
        400.0,
        ShapeGeometry::Circle { radius: 50.0 },
        4,
        20.0,
    )));
    elements.push(stage(DEMO_STAGE, 600.0, 400.0, 200.0, 100.0));
    Scene {
        elements,
        sections: vec![section],
    }
}
