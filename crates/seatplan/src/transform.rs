//! Resize/rotate gesture → semantic attribute mapping.
//!
//! The canvas reports a generic transform per node (new position/rotation and
//! the scale factors of this one gesture). Shapes never keep a free-floating
//! scale; the factors are folded into each shape's own dimensions here.

use serde::{Deserialize, Serialize};
use shared::{Element, ElementId, ElementKind, Point2D, ShapeGeometry};

use crate::state::settings::LayoutSettings;

/// Star/ring inner radius never exceeds this share of the outer radius
pub const INNER_RADIUS_MAX_RATIO: f64 = 0.95;
/// Ring/arc outer radius never drops below this multiple of the inner radius
pub const OUTER_RADIUS_MIN_RATIO: f64 = 1.02;
pub const MIN_FONT_SIZE: f64 = 6.0;

fn unit_scale() -> f64 {
    1.0
}

/// One transformed node as reported at the end of a resize/rotate gesture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformRecord {
    pub id: ElementId,
    pub position: Point2D,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "unit_scale")]
    pub scale_x: f64,
    #[serde(default = "unit_scale")]
    pub scale_y: f64,
}

impl TransformRecord {
    /// Average of the absolute scale factors
    pub fn average_scale(&self) -> f64 {
        (self.scale_x.abs() + self.scale_y.abs()) / 2.0
    }
}

/// Shape-specific outcome of a transform
#[derive(Debug, Clone, PartialEq)]
pub enum SemanticPatch {
    /// New table/stage dimensions
    Shape(ShapeGeometry),
    /// New floor segment offsets
    Floor { start: Point2D, end: Point2D },
    /// Accumulated entrance/exit scale
    MarkerScale { scale_x: f64, scale_y: f64 },
    /// Section boundary size; width is carried over unchanged
    Boundary { width: f64, height: f64 },
    Text { font_size: f64 },
    /// Chairs move and rotate only
    PoseOnly,
}

/// Position/rotation plus the semantic patch for one element
#[derive(Debug, Clone, PartialEq)]
pub struct TransformPatch {
    pub id: ElementId,
    pub position: Point2D,
    pub rotation: f64,
    pub patch: SemanticPatch,
}

fn scale_shape(shape: &ShapeGeometry, record: &TransformRecord, min: f64) -> ShapeGeometry {
    let avg = record.average_scale();
    match shape {
        ShapeGeometry::Rect { width, height } => ShapeGeometry::Rect {
            width: (width * record.scale_x.abs()).max(min),
            height: (height * record.scale_y.abs()).max(min),
        },
        ShapeGeometry::Circle { radius } => ShapeGeometry::Circle {
            radius: (radius * avg).max(min),
        },
        ShapeGeometry::Polygon { radius, sides } => ShapeGeometry::Polygon {
            radius: (radius * avg).max(min),
            sides: *sides,
        },
        ShapeGeometry::Star {
            radius,
            inner_radius,
            points,
        } => {
            let radius = (radius * avg).max(min);
            ShapeGeometry::Star {
                radius,
                inner_radius: (inner_radius * avg).min(radius * INNER_RADIUS_MAX_RATIO),
                points: *points,
            }
        }
        ShapeGeometry::Wedge { radius, angle } => ShapeGeometry::Wedge {
            radius: (radius * avg).max(min),
            angle: *angle,
        },
        ShapeGeometry::Ring {
            outer_radius,
            inner_radius,
        } => {
            let (outer_radius, inner_radius) =
                scale_annulus(*outer_radius, *inner_radius, avg, min);
            ShapeGeometry::Ring {
                outer_radius,
                inner_radius,
            }
        }
        ShapeGeometry::Arc {
            outer_radius,
            inner_radius,
            angle,
        } => {
            let (outer_radius, inner_radius) =
                scale_annulus(*outer_radius, *inner_radius, avg, min);
            ShapeGeometry::Arc {
                outer_radius,
                inner_radius,
                angle: *angle,
            }
        }
    }
}

/// Scale both radii; inner and outer never cross
fn scale_annulus(outer: f64, inner: f64, factor: f64, min: f64) -> (f64, f64) {
    let outer = (outer * factor).max(min);
    let inner = (inner * factor).max(min).min(outer * INNER_RADIUS_MAX_RATIO);
    let outer = outer.max(inner * OUTER_RADIUS_MIN_RATIO);
    (outer, inner)
}

fn scale_floor(start: Point2D, end: Point2D, factor: f64, min_length: f64) -> (Point2D, Point2D) {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length = (dx * dx + dy * dy).sqrt();
    let (ux, uy) = if length > 0.0 {
        (dx / length, dy / length)
    } else {
        (1.0, 0.0)
    };
    let half = (length * factor).max(min_length) / 2.0;
    let mid = Point2D::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0);
    (
        Point2D::new(mid.x - ux * half, mid.y - uy * half),
        Point2D::new(mid.x + ux * half, mid.y + uy * half),
    )
}

/// Map one transform record onto `element`'s pre-transform dimensions
pub fn map_transform(
    element: &Element,
    record: &TransformRecord,
    settings: &LayoutSettings,
) -> TransformPatch {
    let min = settings.min_shape_size;
    let patch = match &element.kind {
        ElementKind::Table { shape, .. } | ElementKind::Stage { shape, .. } => {
            SemanticPatch::Shape(scale_shape(shape, record, min))
        }
        ElementKind::Floor { start, end, .. } => {
            let (start, end) = scale_floor(*start, *end, record.average_scale(), 2.0 * min);
            SemanticPatch::Floor { start, end }
        }
        ElementKind::Entrance { scale_x, scale_y } | ElementKind::Exit { scale_x, scale_y } => {
            SemanticPatch::MarkerScale {
                scale_x: scale_x * record.scale_x,
                scale_y: scale_y * record.scale_y,
            }
        }
        ElementKind::SectionBoundary { width, height, .. } => SemanticPatch::Boundary {
            width: *width,
            height: (height * record.scale_y.abs()).max(min),
        },
        ElementKind::Text { font_size, .. } => SemanticPatch::Text {
            font_size: (font_size * record.average_scale()).max(MIN_FONT_SIZE),
        },
        ElementKind::Chair { .. } => SemanticPatch::PoseOnly,
    };

    TransformPatch {
        id: element.id.clone(),
        position: record.position,
        rotation: record.rotation,
        patch,
    }
}
