//! Section grid and curved-row chair placement

use std::f64::consts::PI;

use kurbo::Vec2;
use shared::Section;

use super::{normalize_degrees, place, ChairPlacement};
use crate::state::settings::LayoutSettings;

/// Arc angle subtended by a row at `curve == 100`
pub const MAX_CURVE_ANGLE: f64 = 0.8 * PI;

/// Boundary size for a section: the chair grid plus padding, never below the minimum
pub fn section_bounding_size(section: &Section, settings: &LayoutSettings) -> (f64, f64) {
    let padding = settings.section.padding;
    let min = settings.section.min_size;
    let width = f64::from(section.cols.saturating_sub(1)) * section.col_spacing
        + settings.chair.width
        + 2.0 * padding;
    let height = f64::from(section.rows.saturating_sub(1)) * section.row_spacing
        + settings.chair.height
        + 2.0 * padding;
    (width.max(min), height.max(min))
}

/// One placement per (row, col), numbered row-major from 1.
///
/// Offsets are computed relative to the section's top-left corner, rotated
/// by the section rotation about that corner, then translated.
pub fn section_chair_positions(section: &Section) -> Vec<ChairPlacement> {
    let rows = section.rows;
    let cols = section.cols;
    if rows == 0 || cols == 0 {
        return Vec::new();
    }

    // Center the rows×cols cells inside the derived boundary
    let grid_x = (section.width - f64::from(cols) * section.col_spacing) / 2.0;
    let grid_y = (section.height - f64::from(rows) * section.row_spacing) / 2.0;

    let curve = section.curve.clamp(0.0, 100.0);
    let arc_angle = curve / 100.0 * MAX_CURVE_ANGLE;
    let row_width = f64::from(cols - 1) * section.col_spacing;
    let curved = arc_angle > 0.0 && cols > 1 && row_width > 0.0;

    let mut placements = Vec::with_capacity((rows as usize).saturating_mul(cols as usize));
    let mut seat_number = 1;
    for r in 0..rows {
        let baseline_y = grid_y + f64::from(r) * section.row_spacing + section.row_spacing / 2.0;
        let first_x = grid_x + section.col_spacing / 2.0;

        for c in 0..cols {
            let (local, local_rotation) = if curved {
                // Focal point sits above the row; both row ends stay on the baseline
                let half = arc_angle / 2.0;
                let radius = (row_width / 2.0) / half.sin();
                let t = f64::from(c) / f64::from(cols - 1);
                let theta = -half + arc_angle * t;
                let center_x = first_x + row_width / 2.0;
                let focal_y = baseline_y - radius * half.cos();
                (
                    Vec2::new(center_x + radius * theta.sin(), focal_y + radius * theta.cos()),
                    -theta.to_degrees(),
                )
            } else {
                (
                    Vec2::new(first_x + f64::from(c) * section.col_spacing, baseline_y),
                    0.0,
                )
            };

            placements.push(ChairPlacement {
                seat_number,
                grid: Some((r, c)),
                position: place(section.position, section.rotation, local),
                rotation: normalize_degrees(section.rotation + local_rotation),
            });
            seat_number += 1;
        }
    }
    placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::approx_eq;
    use shared::Point2D;

    fn section(rows: u32, cols: u32, spacing: f64, curve: f64) -> Section {
        let settings = LayoutSettings::default();
        let mut s = Section {
            id: "s1".to_string(),
            label: String::new(),
            position: Point2D::new(0.0, 0.0),
            rows,
            cols,
            row_spacing: spacing,
            col_spacing: spacing,
            curve,
            rotation: 0.0,
            fill: "#fff".to_string(),
            stroke: "#000".to_string(),
            width: 0.0,
            height: 0.0,
        };
        let (w, h) = section_bounding_size(&s, &settings);
        s.width = w;
        s.height = h;
        s
    }

    #[test]
    fn test_bounding_size_formula() {
        let s = section(2, 3, 60.0, 0.0);
        // (3-1)*60 + 25 + 2*20, (2-1)*60 + 25 + 2*20
        assert!(approx_eq(s.width, 185.0));
        assert!(approx_eq(s.height, 125.0));
    }

    #[test]
    fn test_bounding_size_minimum_for_empty() {
        let mut settings = LayoutSettings::default();
        settings.section.min_size = 100.0;
        let s = section(0, 0, 60.0, 0.0);
        let (w, h) = section_bounding_size(&s, &settings);
        assert!(approx_eq(w, 100.0));
        assert!(approx_eq(h, 100.0));
    }

    #[test]
    fn test_flat_grid_two_by_three() {
        let s = section(2, 3, 60.0, 0.0);
        let chairs = section_chair_positions(&s);
        assert_eq!(chairs.len(), 6);

        // Grid offsets relative to the first chair
        let expected = [
            (30.0, 30.0),
            (90.0, 30.0),
            (150.0, 30.0),
            (30.0, 90.0),
            (90.0, 90.0),
            (150.0, 90.0),
        ];
        let origin = chairs[0].position;
        // First chair sits padding + half a chair in from the corner
        assert!(approx_eq(origin.x, 32.5));
        assert!(approx_eq(origin.y, 32.5));
        for (chair, (ex, ey)) in chairs.iter().zip(expected) {
            assert!(approx_eq(chair.position.x - origin.x, ex - 30.0));
            assert!(approx_eq(chair.position.y - origin.y, ey - 30.0));
            assert!(approx_eq(chair.rotation, 0.0));
        }
        let seats: Vec<u32> = chairs.iter().map(|c| c.seat_number).collect();
        assert_eq!(seats, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(chairs[4].grid, Some((1, 1)));
    }

    #[test]
    fn test_curve_keeps_row_baseline() {
        let flat = section_chair_positions(&section(3, 5, 50.0, 0.0));
        for curve in [10.0, 50.0, 100.0] {
            let curved = section_chair_positions(&section(3, 5, 50.0, curve));
            for r in 0..3 {
                let first = r * 5;
                let last = first + 4;
                assert!(approx_eq(curved[first].position.y, flat[first].position.y));
                assert!(approx_eq(curved[first].position.x, flat[first].position.x));
                assert!(approx_eq(curved[last].position.y, flat[last].position.y));
                // Middle chair bows away from the focal point
                assert!(curved[first + 2].position.y > flat[first + 2].position.y);
            }
        }
    }

    #[test]
    fn test_curve_rotates_chairs_symmetrically() {
        let chairs = section_chair_positions(&section(1, 5, 50.0, 100.0));
        assert!(chairs[0].rotation > 0.0);
        assert!(chairs[4].rotation < 0.0);
        assert!(approx_eq(chairs[0].rotation, -chairs[4].rotation));
        assert!(approx_eq(chairs[2].rotation, 0.0));
        assert!(approx_eq(chairs[0].rotation, MAX_CURVE_ANGLE.to_degrees() / 2.0));
    }

    #[test]
    fn test_single_column_ignores_curve() {
        let flat = section_chair_positions(&section(2, 1, 50.0, 0.0));
        let curved = section_chair_positions(&section(2, 1, 50.0, 80.0));
        assert_eq!(flat, curved);
    }

    #[test]
    fn test_section_rotation_about_corner() {
        let mut s = section(1, 2, 60.0, 0.0);
        s.position = Point2D::new(100.0, 100.0);
        s.rotation = 90.0;
        let chairs = section_chair_positions(&s);
        // Unrotated first chair offset (32.5, 32.5) rotated 90° clockwise
        assert!(approx_eq(chairs[0].position.x, 100.0 - 32.5));
        assert!(approx_eq(chairs[0].position.y, 100.0 + 32.5));
        assert!(approx_eq(chairs[0].rotation, 90.0));
        // Second chair one spacing further along the rotated x axis
        assert!(approx_eq(chairs[1].position.y - chairs[0].position.y, 60.0));
    }

    #[test]
    fn test_empty_section_has_no_chairs() {
        assert!(section_chair_positions(&section(0, 4, 50.0, 0.0)).is_empty());
        assert!(section_chair_positions(&section(4, 0, 50.0, 0.0)).is_empty());
    }
}
