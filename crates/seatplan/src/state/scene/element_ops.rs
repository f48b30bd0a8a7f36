//! Element creation and property updates

use serde::{Deserialize, Serialize};
use shared::{Element, ElementId, ElementKind, ElementType, Point2D, ShapeGeometry};

use super::{SceneState, SectionUpdate};
use crate::geometry::{table_capacity, validate_shape, validate_table_chairs, GeometryError};
use crate::state::settings::LayoutSettings;

/// Pending attributes stamped onto the next element a placement tool creates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Table/stage outline
    pub shape: ShapeGeometry,
    pub chair_count: u32,
    pub chair_spacing: f64,
    pub rotation: f64,
    pub label: String,
    /// Palette colour for the element type when unset
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub floor_length: f64,
    pub text: String,
    pub font_size: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            shape: ShapeGeometry::Rect {
                width: 120.0,
                height: 60.0,
            },
            chair_count: 6,
            chair_spacing: 10.0,
            rotation: 0.0,
            label: String::new(),
            fill: None,
            stroke: None,
            floor_length: 200.0,
            text: "Text".to_string(),
            font_size: 16.0,
        }
    }
}

/// Partial element attributes from the properties panel.
///
/// Fields that do not apply to the element's type are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementUpdate {
    pub position: Option<Point2D>,
    pub rotation: Option<f64>,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub label: Option<String>,
    pub shape: Option<ShapeGeometry>,
    pub chair_count: Option<u32>,
    pub chair_spacing: Option<f64>,
    pub seat_number: Option<u32>,
    pub is_reserved: Option<bool>,
    /// Chair pictogram; an empty string removes it
    pub icon: Option<String>,
    pub start: Option<Point2D>,
    pub end: Option<Point2D>,
    pub scale_x: Option<f64>,
    pub scale_y: Option<f64>,
    pub text: Option<String>,
    pub font_size: Option<f64>,
}

fn non_zero(name: &'static str, value: f64) -> Result<(), GeometryError> {
    if value != 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::NonPositiveDimension { name, value })
    }
}

fn table_params(kind: &ElementKind) -> Option<(&ShapeGeometry, u32, f64)> {
    match kind {
        ElementKind::Table {
            shape,
            chair_count,
            chair_spacing,
            ..
        } => Some((shape, *chair_count, *chair_spacing)),
        _ => None,
    }
}

impl ElementUpdate {
    /// The subset a section boundary forwards to its section
    pub fn as_section_update(&self) -> SectionUpdate {
        SectionUpdate {
            label: self.label.clone(),
            position: self.position,
            rotation: self.rotation,
            fill: self.fill.clone(),
            stroke: self.stroke.clone(),
            ..SectionUpdate::default()
        }
    }

    fn apply_to(
        &self,
        element: &mut Element,
        settings: &LayoutSettings,
    ) -> Result<(), GeometryError> {
        if let Some(position) = self.position {
            element.position = position;
        }
        if let Some(rotation) = self.rotation {
            element.rotation = rotation;
        }
        if let Some(fill) = &self.fill {
            element.fill.clone_from(fill);
        }
        if let Some(stroke) = &self.stroke {
            element.stroke.clone_from(stroke);
        }

        match &mut element.kind {
            ElementKind::Table {
                shape,
                chair_count,
                chair_spacing,
                label,
                ..
            } => {
                if let Some(new_shape) = &self.shape {
                    validate_shape(new_shape)?;
                    *shape = new_shape.clone();
                }
                if let Some(spacing) = self.chair_spacing {
                    *chair_spacing = spacing;
                }
                if let Some(count) = self.chair_count {
                    *chair_count = count;
                }
                validate_table_chairs(shape, *chair_count, *chair_spacing)?;
                if self.shape.is_some()
                    || self.chair_count.is_some()
                    || self.chair_spacing.is_some()
                {
                    let capacity = table_capacity(shape, &settings.chair, *chair_spacing);
                    *chair_count = (*chair_count).min(capacity);
                }
                if let Some(l) = &self.label {
                    label.clone_from(l);
                }
            }
            ElementKind::Stage { shape, label } => {
                if let Some(new_shape) = &self.shape {
                    validate_shape(new_shape)?;
                    *shape = new_shape.clone();
                }
                if let Some(l) = &self.label {
                    label.clone_from(l);
                }
            }
            ElementKind::Floor { start, end, label } => {
                if let Some(s) = self.start {
                    *start = s;
                }
                if let Some(e) = self.end {
                    *end = e;
                }
                if let Some(l) = &self.label {
                    label.clone_from(l);
                }
            }
            ElementKind::Entrance { scale_x, scale_y } | ElementKind::Exit { scale_x, scale_y } => {
                if let Some(sx) = self.scale_x {
                    non_zero("scale_x", sx)?;
                    *scale_x = sx;
                }
                if let Some(sy) = self.scale_y {
                    non_zero("scale_y", sy)?;
                    *scale_y = sy;
                }
            }
            ElementKind::Chair {
                seat_number,
                is_reserved,
                icon,
                ..
            } => {
                if let Some(n) = self.seat_number {
                    *seat_number = n;
                }
                if let Some(r) = self.is_reserved {
                    *is_reserved = r;
                }
                if let Some(i) = &self.icon {
                    *icon = (!i.is_empty()).then(|| i.clone());
                }
            }
            ElementKind::Text { text, font_size } => {
                if let Some(t) = &self.text {
                    text.clone_from(t);
                }
                if let Some(size) = self.font_size {
                    if size <= 0.0 || !size.is_finite() {
                        return Err(GeometryError::NonPositiveDimension {
                            name: "font_size",
                            value: size,
                        });
                    }
                    *font_size = size;
                }
            }
            ElementKind::SectionBoundary { .. } => {}
        }
        Ok(())
    }
}

impl SceneState {
    /// Create one element of `element_type` centred at `position`.
    ///
    /// Tables with a chair count get their chairs immediately. Chairs and
    /// section boundaries are never placed on their own.
    pub fn add_element(
        &mut self,
        element_type: ElementType,
        position: Point2D,
        config: &PlacementConfig,
    ) -> Option<ElementId> {
        let kind = match element_type {
            ElementType::Table => {
                if let Err(e) = validate_shape(&config.shape) {
                    tracing::warn!("Cannot place table: {e}");
                    return None;
                }
                let mut chair_count = config.chair_count;
                match validate_table_chairs(&config.shape, chair_count, config.chair_spacing) {
                    Ok(()) => {}
                    Err(GeometryError::ChairCountUnsupported { shape }) => {
                        tracing::debug!("Placing {shape} table without chairs");
                        chair_count = 0;
                    }
                    Err(e) => {
                        tracing::warn!("Cannot place table: {e}");
                        return None;
                    }
                }
                let capacity =
                    table_capacity(&config.shape, &self.settings.chair, config.chair_spacing);
                if chair_count > capacity {
                    tracing::debug!("Clamping chair count {chair_count} to capacity {capacity}");
                }
                ElementKind::Table {
                    shape: config.shape.clone(),
                    chair_count: chair_count.min(capacity),
                    chair_spacing: config.chair_spacing,
                    chair_ids: Vec::new(),
                    label: config.label.clone(),
                }
            }
            ElementType::Stage => {
                if let Err(e) = validate_shape(&config.shape) {
                    tracing::warn!("Cannot place stage: {e}");
                    return None;
                }
                ElementKind::Stage {
                    shape: config.shape.clone(),
                    label: config.label.clone(),
                }
            }
            ElementType::Floor => {
                let half = config.floor_length.max(2.0 * self.settings.min_shape_size) / 2.0;
                ElementKind::Floor {
                    start: Point2D::new(-half, 0.0),
                    end: Point2D::new(half, 0.0),
                    label: config.label.clone(),
                }
            }
            ElementType::Entrance => ElementKind::Entrance {
                scale_x: 1.0,
                scale_y: 1.0,
            },
            ElementType::Exit => ElementKind::Exit {
                scale_x: 1.0,
                scale_y: 1.0,
            },
            ElementType::Text => ElementKind::Text {
                text: config.text.clone(),
                font_size: if config.font_size > 0.0 {
                    config.font_size
                } else {
                    PlacementConfig::default().font_size
                },
            },
            ElementType::Chair | ElementType::SectionBoundary => {
                tracing::warn!("{element_type:?} elements cannot be placed directly");
                return None;
            }
        };

        let palette = self.settings.palette.for_type(element_type);
        let id = format!("{}-{}", element_type.id_prefix(), uuid::Uuid::new_v4());
        self.scene.elements.push(Element {
            id: id.clone(),
            position,
            rotation: config.rotation,
            fill: config.fill.clone().unwrap_or_else(|| palette.fill.clone()),
            stroke: config.stroke.clone().unwrap_or_else(|| palette.stroke.clone()),
            kind,
        });
        if element_type == ElementType::Table {
            self.regenerate_table_chairs(&id);
        }

        self.notify_mutated();
        tracing::info!("Added {element_type:?} {id}");
        Some(id)
    }

    /// Patch one element.
    ///
    /// Boundaries forward to their section. A table relayout regenerates its
    /// chairs; a table colour change cascades to them. Invalid values reject
    /// the whole update.
    pub fn update_element_properties(&mut self, id: &str, update: &ElementUpdate) -> bool {
        let Some(current) = self.scene.element(id).cloned() else {
            tracing::warn!("Cannot update element {id}: not found");
            return false;
        };
        if let Some(section_id) = current.boundary_section() {
            return self.update_section_properties(section_id, &update.as_section_update());
        }

        let mut next = current.clone();
        if let Err(e) = update.apply_to(&mut next, &self.settings) {
            tracing::warn!("Rejected update for {id}: {e}");
            return false;
        }
        if next == current {
            return false;
        }

        let relayout = next.is_table()
            && (next.position != current.position
                || next.rotation != current.rotation
                || table_params(&next.kind) != table_params(&current.kind));
        let recolor =
            next.is_table() && (next.fill != current.fill || next.stroke != current.stroke);

        if let Some(slot) = self.scene.element_mut(id) {
            *slot = next;
        }
        if relayout {
            self.regenerate_table_chairs(id);
        } else if recolor {
            self.recolor_table_chairs(id);
        }
        self.notify_mutated();
        true
    }

    /// Insert elements carried over from the clipboard, in order
    pub(crate) fn insert_elements(&mut self, elements: Vec<Element>) {
        if elements.is_empty() {
            return;
        }
        self.scene.elements.extend(elements);
        self.notify_mutated();
    }
}
