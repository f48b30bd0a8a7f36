//! Chair, section and table geometry.
//!
//! Pure functions: layout parameters in, chair placements and sizes out.
//! Nothing here touches the scene; the scene store calls these to regenerate
//! the chairs owned by a section or table.

mod bounds;
mod section;
mod table;

pub use bounds::{element_bounds, rect_contains};
pub use section::{section_bounding_size, section_chair_positions, MAX_CURVE_ANGLE};
pub use table::{table_capacity, table_chair_positions, TableLayout};

use kurbo::{Affine, Point, Vec2};
use shared::{Point2D, ShapeGeometry};
use thiserror::Error;

/// A geometry parameter the library refuses to lay out
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("{name} must be positive, got {value}")]
    NonPositiveDimension { name: &'static str, value: f64 },
    #[error("{name} must be positive, got {value}")]
    NonPositiveRadius { name: &'static str, value: f64 },
    #[error("a {shape} needs at least 3 {what}, got {count}")]
    TooFewSides {
        shape: &'static str,
        what: &'static str,
        count: u32,
    },
    #[error("inner radius {inner} must be smaller than outer radius {outer}")]
    InnerRadiusNotSmaller { inner: f64, outer: f64 },
    #[error("angle must be within (0, 360], got {0}")]
    InvalidAngle(f64),
    #[error("curve must be within [0, 100], got {0}")]
    InvalidCurve(f64),
    #[error("{name} must not be negative, got {value}")]
    NegativeSpacing { name: &'static str, value: f64 },
    #[error("{shape} tables cannot seat chairs")]
    ChairCountUnsupported { shape: &'static str },
    #[error("a {rows}x{cols} grid exceeds the {max_rows}x{max_cols} limit")]
    GridTooLarge {
        rows: u32,
        cols: u32,
        max_rows: u32,
        max_cols: u32,
    },
}

/// One computed chair slot
#[derive(Debug, Clone, PartialEq)]
pub struct ChairPlacement {
    /// 1-based, sequential within the parent
    pub seat_number: u32,
    /// (row, col) for section chairs
    pub grid: Option<(u32, u32)>,
    /// Absolute canvas position of the chair center
    pub position: Point2D,
    /// Absolute rotation in degrees
    pub rotation: f64,
}

fn positive(name: &'static str, value: f64) -> Result<(), GeometryError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::NonPositiveDimension { name, value })
    }
}

fn positive_radius(name: &'static str, value: f64) -> Result<(), GeometryError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::NonPositiveRadius { name, value })
    }
}

fn valid_angle(angle: f64) -> Result<(), GeometryError> {
    if angle > 0.0 && angle <= 360.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidAngle(angle))
    }
}

fn inner_smaller(inner: f64, outer: f64) -> Result<(), GeometryError> {
    if inner < outer {
        Ok(())
    } else {
        Err(GeometryError::InnerRadiusNotSmaller { inner, outer })
    }
}

/// Reject shapes that cannot be drawn
pub fn validate_shape(shape: &ShapeGeometry) -> Result<(), GeometryError> {
    match shape {
        ShapeGeometry::Rect { width, height } => {
            positive("width", *width)?;
            positive("height", *height)
        }
        ShapeGeometry::Circle { radius } => positive_radius("radius", *radius),
        ShapeGeometry::Polygon { radius, sides } => {
            positive_radius("radius", *radius)?;
            if *sides < 3 {
                return Err(GeometryError::TooFewSides {
                    shape: "polygon",
                    what: "sides",
                    count: *sides,
                });
            }
            Ok(())
        }
        ShapeGeometry::Star {
            radius,
            inner_radius,
            points,
        } => {
            positive_radius("radius", *radius)?;
            positive_radius("inner_radius", *inner_radius)?;
            inner_smaller(*inner_radius, *radius)?;
            if *points < 3 {
                return Err(GeometryError::TooFewSides {
                    shape: "star",
                    what: "points",
                    count: *points,
                });
            }
            Ok(())
        }
        ShapeGeometry::Ring {
            outer_radius,
            inner_radius,
        } => {
            positive_radius("outer_radius", *outer_radius)?;
            positive_radius("inner_radius", *inner_radius)?;
            inner_smaller(*inner_radius, *outer_radius)
        }
        ShapeGeometry::Wedge { radius, angle } => {
            positive_radius("radius", *radius)?;
            valid_angle(*angle)
        }
        ShapeGeometry::Arc {
            outer_radius,
            inner_radius,
            angle,
        } => {
            positive_radius("outer_radius", *outer_radius)?;
            positive_radius("inner_radius", *inner_radius)?;
            inner_smaller(*inner_radius, *outer_radius)?;
            valid_angle(*angle)
        }
    }
}

/// Reject section layout parameters that cannot produce a grid
pub fn validate_section_layout(
    row_spacing: f64,
    col_spacing: f64,
    curve: f64,
) -> Result<(), GeometryError> {
    if row_spacing < 0.0 || !row_spacing.is_finite() {
        return Err(GeometryError::NegativeSpacing {
            name: "row_spacing",
            value: row_spacing,
        });
    }
    if col_spacing < 0.0 || !col_spacing.is_finite() {
        return Err(GeometryError::NegativeSpacing {
            name: "col_spacing",
            value: col_spacing,
        });
    }
    if !(0.0..=100.0).contains(&curve) {
        return Err(GeometryError::InvalidCurve(curve));
    }
    Ok(())
}

/// Reject section grids larger than the configured limit
pub fn validate_section_grid(
    rows: u32,
    cols: u32,
    max_rows: u32,
    max_cols: u32,
) -> Result<(), GeometryError> {
    if rows > max_rows || cols > max_cols {
        return Err(GeometryError::GridTooLarge {
            rows,
            cols,
            max_rows,
            max_cols,
        });
    }
    Ok(())
}

/// Reject table chair parameters
pub fn validate_table_chairs(
    shape: &ShapeGeometry,
    chair_count: u32,
    chair_spacing: f64,
) -> Result<(), GeometryError> {
    if chair_spacing < 0.0 || !chair_spacing.is_finite() {
        return Err(GeometryError::NegativeSpacing {
            name: "chair_spacing",
            value: chair_spacing,
        });
    }
    if chair_count > 0 && !table::seats_chairs(shape) {
        return Err(GeometryError::ChairCountUnsupported {
            shape: shape.name(),
        });
    }
    Ok(())
}

/// Normalize degrees to (-180, 180]
pub fn normalize_degrees(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d <= -180.0 {
        d += 360.0;
    } else if d > 180.0 {
        d -= 360.0;
    }
    d
}

/// Rotate a local offset by `rotation_deg` and translate it to `origin`
pub(crate) fn place(origin: Point2D, rotation_deg: f64, local: Vec2) -> Point2D {
    let p = Affine::rotate(rotation_deg.to_radians()) * Point::new(local.x, local.y);
    Point2D::new(origin.x + p.x, origin.y + p.y)
}

#[cfg(test)]
pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[cfg(test)]
pub(crate) fn approx_angle(a: f64, b: f64) -> bool {
    normalize_degrees(a - b).abs() < 1e-6
}
