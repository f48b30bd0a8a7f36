//! Axis-aligned bounds of scene elements

use kurbo::{Affine, Rect};
use shared::{Element, ElementKind, ShapeGeometry};

use crate::state::settings::LayoutSettings;

/// Approximate glyph advance relative to font size
const TEXT_ADVANCE: f64 = 0.6;
const TEXT_LINE_HEIGHT: f64 = 1.2;

fn centered(width: f64, height: f64) -> Rect {
    Rect::new(-width / 2.0, -height / 2.0, width / 2.0, height / 2.0)
}

fn shape_extent(shape: &ShapeGeometry) -> Rect {
    match shape {
        ShapeGeometry::Rect { width, height } => centered(*width, *height),
        ShapeGeometry::Circle { radius }
        | ShapeGeometry::Polygon { radius, .. }
        | ShapeGeometry::Star { radius, .. }
        | ShapeGeometry::Wedge { radius, .. } => centered(2.0 * radius, 2.0 * radius),
        ShapeGeometry::Ring { outer_radius, .. } | ShapeGeometry::Arc { outer_radius, .. } => {
            centered(2.0 * outer_radius, 2.0 * outer_radius)
        }
    }
}

/// Local (unrotated) extent relative to the element's rotation center
fn local_extent(element: &Element, settings: &LayoutSettings) -> Rect {
    match &element.kind {
        ElementKind::Chair { .. } => centered(settings.chair.width, settings.chair.height),
        ElementKind::Table { shape, .. } | ElementKind::Stage { shape, .. } => shape_extent(shape),
        ElementKind::Floor { start, end, .. } => {
            Rect::from_points((start.x, start.y), (end.x, end.y))
        }
        ElementKind::Entrance { scale_x, scale_y } | ElementKind::Exit { scale_x, scale_y } => {
            centered(
                settings.marker_size * scale_x.abs(),
                settings.marker_size * scale_y.abs(),
            )
        }
        // Boundaries and text are anchored at their top-left corner
        ElementKind::SectionBoundary { width, height, .. } => Rect::new(0.0, 0.0, *width, *height),
        ElementKind::Text { text, font_size } => Rect::new(
            0.0,
            0.0,
            text.chars().count() as f64 * font_size * TEXT_ADVANCE,
            font_size * TEXT_LINE_HEIGHT,
        ),
    }
}

/// Bounding box of the element on the canvas, accounting for rotation
pub fn element_bounds(element: &Element, settings: &LayoutSettings) -> Rect {
    let transform = Affine::translate((element.position.x, element.position.y))
        * Affine::rotate(element.rotation.to_radians());
    transform.transform_rect_bbox(local_extent(element, settings))
}

/// True if `inner` lies fully inside `outer`
pub fn rect_contains(outer: Rect, inner: Rect) -> bool {
    let outer = outer.abs();
    let inner = inner.abs();
    inner.x0 >= outer.x0 && inner.x1 <= outer.x1 && inner.y0 >= outer.y0 && inner.y1 <= outer.y1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::approx_eq;
    use shared::Point2D;

    fn element(kind: ElementKind, x: f64, y: f64, rotation: f64) -> Element {
        Element {
            id: "e".to_string(),
            position: Point2D::new(x, y),
            rotation,
            fill: "#fff".to_string(),
            stroke: "#000".to_string(),
            kind,
        }
    }

    #[test]
    fn test_rect_table_bounds_centered() {
        let table = element(
            ElementKind::Table {
                shape: ShapeGeometry::Rect {
                    width: 100.0,
                    height: 40.0,
                },
                chair_count: 0,
                chair_spacing: 10.0,
                chair_ids: vec![],
                label: String::new(),
            },
            200.0,
            100.0,
            0.0,
        );
        let b = element_bounds(&table, &LayoutSettings::default());
        assert!(approx_eq(b.x0, 150.0));
        assert!(approx_eq(b.x1, 250.0));
        assert!(approx_eq(b.y0, 80.0));
        assert!(approx_eq(b.y1, 120.0));
    }

    #[test]
    fn test_rotated_rect_bounds_swap_axes() {
        let stage = element(
            ElementKind::Stage {
                shape: ShapeGeometry::Rect {
                    width: 100.0,
                    height: 40.0,
                },
                label: String::new(),
            },
            0.0,
            0.0,
            90.0,
        );
        let b = element_bounds(&stage, &LayoutSettings::default());
        assert!(approx_eq(b.width(), 40.0));
        assert!(approx_eq(b.height(), 100.0));
    }

    #[test]
    fn test_boundary_anchored_top_left() {
        let boundary = element(
            ElementKind::SectionBoundary {
                section_id: "s".to_string(),
                width: 120.0,
                height: 80.0,
            },
            10.0,
            20.0,
            0.0,
        );
        let b = element_bounds(&boundary, &LayoutSettings::default());
        assert!(approx_eq(b.x0, 10.0));
        assert!(approx_eq(b.y0, 20.0));
        assert!(approx_eq(b.x1, 130.0));
        assert!(approx_eq(b.y1, 100.0));
    }

    #[test]
    fn test_marker_bounds_follow_scale() {
        let exit = element(
            ElementKind::Exit {
                scale_x: 2.0,
                scale_y: 0.5,
            },
            0.0,
            0.0,
            0.0,
        );
        let b = element_bounds(&exit, &LayoutSettings::default());
        assert!(approx_eq(b.width(), 80.0));
        assert!(approx_eq(b.height(), 20.0));
    }

    #[test]
    fn test_rect_contains() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(rect_contains(outer, Rect::new(10.0, 10.0, 90.0, 90.0)));
        assert!(!rect_contains(outer, Rect::new(10.0, 10.0, 110.0, 90.0)));
        // Drag direction does not matter
        assert!(rect_contains(
            Rect::new(100.0, 100.0, 0.0, 0.0),
            Rect::new(10.0, 10.0, 20.0, 20.0)
        ));
    }
}
