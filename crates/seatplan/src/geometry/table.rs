//! Chair placement around tables.
//!
//! Capacity follows one rule for every seating shape: a straight run of
//! length `L` holds `floor(L / pitch)` chairs, where pitch is chair width plus
//! gap. Rect edges and polygon sides are runs along the table outline; a
//! circle or ring is a single run along the circle the chair centers sit on.

use std::f64::consts::{PI, TAU};

use kurbo::Vec2;
use shared::{Element, ElementKind, Point2D, ShapeGeometry};

use super::{normalize_degrees, place, ChairPlacement};
use crate::state::settings::ChairSettings;

/// The inputs `table_chair_positions` needs from a table element
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout<'a> {
    pub position: Point2D,
    pub rotation: f64,
    pub shape: &'a ShapeGeometry,
    pub chair_count: u32,
    pub chair_spacing: f64,
}

impl<'a> TableLayout<'a> {
    /// None if the element is not a table
    pub fn from_element(element: &'a Element) -> Option<Self> {
        match &element.kind {
            ElementKind::Table {
                shape,
                chair_count,
                chair_spacing,
                ..
            } => Some(Self {
                position: element.position,
                rotation: element.rotation,
                shape,
                chair_count: *chair_count,
                chair_spacing: *chair_spacing,
            }),
            _ => None,
        }
    }
}

pub(super) fn seats_chairs(shape: &ShapeGeometry) -> bool {
    matches!(
        shape,
        ShapeGeometry::Rect { .. }
            | ShapeGeometry::Circle { .. }
            | ShapeGeometry::Ring { .. }
            | ShapeGeometry::Polygon { .. }
    )
}

fn run_capacity(length: f64, pitch: f64) -> u32 {
    if length <= 0.0 || pitch <= 0.0 {
        return 0;
    }
    (length / pitch).floor() as u32
}

/// Per-run capacities: `[top, right, bottom, left]` for rects, one per side for polygons
fn run_capacities(shape: &ShapeGeometry, chair: &ChairSettings, chair_spacing: f64) -> Vec<u32> {
    let pitch = chair.pitch();
    match shape {
        ShapeGeometry::Rect { width, height } => {
            let across = run_capacity(*width, pitch);
            let down = run_capacity(*height, pitch);
            vec![across, down, across, down]
        }
        ShapeGeometry::Circle { radius }
        | ShapeGeometry::Ring {
            outer_radius: radius,
            ..
        } => {
            let seat_radius = radius + chair.placement_radius_offset() + chair_spacing;
            vec![run_capacity(TAU * seat_radius, pitch)]
        }
        ShapeGeometry::Polygon { radius, sides } => {
            if *sides < 3 {
                return Vec::new();
            }
            let side_length = 2.0 * radius * (PI / f64::from(*sides)).sin();
            vec![run_capacity(side_length, pitch); *sides as usize]
        }
        ShapeGeometry::Star { .. } | ShapeGeometry::Wedge { .. } | ShapeGeometry::Arc { .. } => {
            Vec::new()
        }
    }
}

/// Maximum number of chairs a table shape can seat
pub fn table_capacity(shape: &ShapeGeometry, chair: &ChairSettings, chair_spacing: f64) -> u32 {
    run_capacities(shape, chair, chair_spacing).iter().sum()
}

/// Largest-remainder split of `count` across runs, proportional to capacity
fn distribute_proportional(count: u32, caps: &[u32]) -> Vec<u32> {
    let total: u32 = caps.iter().sum();
    if total == 0 {
        return vec![0; caps.len()];
    }
    let count = count.min(total);

    let mut assigned: Vec<u32> = caps
        .iter()
        .map(|&cap| (u64::from(count) * u64::from(cap) / u64::from(total)) as u32)
        .collect();
    let mut remaining = count - assigned.iter().sum::<u32>();

    let mut order: Vec<usize> = (0..caps.len()).collect();
    let fraction = |i: usize| (u64::from(count) * u64::from(caps[i])) % u64::from(total);
    order.sort_by(|&a, &b| {
        fraction(b)
            .cmp(&fraction(a))
            .then(caps[b].cmp(&caps[a]))
            .then(a.cmp(&b))
    });

    while remaining > 0 {
        let before = remaining;
        for &i in &order {
            if remaining == 0 {
                break;
            }
            if assigned[i] < caps[i] {
                assigned[i] += 1;
                remaining -= 1;
            }
        }
        if before == remaining {
            break;
        }
    }
    assigned
}

/// Even split of `count` across runs; the first runs take the remainder
fn distribute_even(count: u32, caps: &[u32]) -> Vec<u32> {
    if caps.is_empty() {
        return Vec::new();
    }
    let total: u32 = caps.iter().sum();
    let count = count.min(total);
    let n = caps.len() as u32;
    let base = count / n;
    let extra = count % n;

    let mut assigned: Vec<u32> = caps
        .iter()
        .enumerate()
        .map(|(i, &cap)| (base + u32::from((i as u32) < extra)).min(cap))
        .collect();

    // Runs that hit their capacity spill into the next runs with room
    let mut leftover = count - assigned.iter().sum::<u32>();
    while leftover > 0 {
        let before = leftover;
        for (i, slot) in assigned.iter_mut().enumerate() {
            if leftover == 0 {
                break;
            }
            if *slot < caps[i] {
                *slot += 1;
                leftover -= 1;
            }
        }
        if before == leftover {
            break;
        }
    }
    assigned
}

/// Offsets of `n` chairs centered on a run, at chair pitch
fn run_offsets(n: u32, pitch: f64) -> impl Iterator<Item = f64> {
    let mid = f64::from(n.saturating_sub(1)) / 2.0;
    (0..n).map(move |k| (f64::from(k) - mid) * pitch)
}

/// Chairs placed around a table, each facing its center.
///
/// Only rect, circle, ring and polygon tables seat chairs; every other shape
/// and a zero count give an empty list. The requested count is clamped to
/// `table_capacity`.
pub fn table_chair_positions(
    table: &TableLayout<'_>,
    chair: &ChairSettings,
) -> Vec<ChairPlacement> {
    if table.chair_count == 0 || !seats_chairs(table.shape) {
        return Vec::new();
    }

    let caps = run_capacities(table.shape, chair, table.chair_spacing);
    let reach = chair.placement_radius_offset() + table.chair_spacing;
    let pitch = chair.pitch();

    // (local offset, local rotation) in clockwise seat order
    let mut local: Vec<(Vec2, f64)> = Vec::new();
    match table.shape {
        ShapeGeometry::Rect { width, height } => {
            let per_edge = distribute_proportional(table.chair_count, &caps);
            let out_y = height / 2.0 + reach;
            let out_x = width / 2.0 + reach;

            for x in run_offsets(per_edge[0], pitch) {
                local.push((Vec2::new(x, -out_y), 180.0));
            }
            for y in run_offsets(per_edge[1], pitch) {
                local.push((Vec2::new(out_x, y), -90.0));
            }
            let bottom: Vec<f64> = run_offsets(per_edge[2], pitch).collect();
            for x in bottom.into_iter().rev() {
                local.push((Vec2::new(x, out_y), 0.0));
            }
            let left: Vec<f64> = run_offsets(per_edge[3], pitch).collect();
            for y in left.into_iter().rev() {
                local.push((Vec2::new(-out_x, y), 90.0));
            }
        }
        ShapeGeometry::Circle { radius }
        | ShapeGeometry::Ring {
            outer_radius: radius,
            ..
        } => {
            let count = table.chair_count.min(caps.iter().sum());
            let seat_radius = radius + reach;
            for i in 0..count {
                let alpha = -PI / 2.0 + TAU * f64::from(i) / f64::from(count);
                local.push((
                    Vec2::new(seat_radius * alpha.cos(), seat_radius * alpha.sin()),
                    alpha.to_degrees() - 90.0,
                ));
            }
        }
        ShapeGeometry::Polygon { radius, sides } => {
            let per_side = distribute_even(table.chair_count, &caps);
            let n = f64::from(*sides);
            let apothem = radius * (PI / n).cos();
            for (i, &m) in per_side.iter().enumerate() {
                // First vertex points up; side i faces outward at alpha
                let alpha = -PI / 2.0 + TAU * (i as f64 + 0.5) / n;
                let normal = Vec2::new(alpha.cos(), alpha.sin());
                let tangent = Vec2::new(-alpha.sin(), alpha.cos());
                for along in run_offsets(m, pitch) {
                    local.push((
                        normal * (apothem + reach) + tangent * along,
                        alpha.to_degrees() - 90.0,
                    ));
                }
            }
        }
        ShapeGeometry::Star { .. } | ShapeGeometry::Wedge { .. } | ShapeGeometry::Arc { .. } => {}
    }

    local
        .into_iter()
        .enumerate()
        .map(|(i, (offset, rotation))| ChairPlacement {
            seat_number: i as u32 + 1,
            grid: None,
            position: place(table.position, table.rotation, offset),
            rotation: normalize_degrees(table.rotation + rotation),
        })
        .collect()
}
