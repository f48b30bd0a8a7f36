//! Derived chairs and boundaries.
//!
//! Chairs are never edited independently of their parent's layout: every
//! mutation that touches a section or table layout ends in one of the
//! regenerate/reposition/recolor calls below, scoped to that one parent.

use std::collections::HashMap;

use shared::{boundary_id, ChairParent, Element, ElementKind, Section};

use super::SceneState;
use crate::geometry::{section_chair_positions, table_chair_positions, ChairPlacement, TableLayout};
use crate::state::settings::ChairSettings;

/// Per-seat customizations that survive a section regeneration
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ChairOverride {
    pub is_reserved: bool,
    pub icon: Option<String>,
    /// Custom (fill, stroke) differing from the section colours
    pub colors: Option<(String, String)>,
}

pub(crate) type ChairOverrides = HashMap<(u32, u32), ChairOverride>;

pub(crate) fn section_chair_id(section_id: &str, row: u32, col: u32) -> String {
    format!("{section_id}-chair-{row}-{col}")
}

pub(crate) fn table_chair_id(table_id: &str, seat_number: u32) -> String {
    format!("{table_id}-chair-{seat_number}")
}

/// The selectable rectangle standing in for a section on the canvas
pub(crate) fn boundary_element(section: &Section) -> Element {
    Element {
        id: boundary_id(&section.id),
        position: section.position,
        rotation: section.rotation,
        fill: section.fill.clone(),
        stroke: section.stroke.clone(),
        kind: ElementKind::SectionBoundary {
            section_id: section.id.clone(),
            width: section.width,
            height: section.height,
        },
    }
}

fn chair_from_placement(
    id: String,
    parent: ChairParent,
    placement: ChairPlacement,
    fill: &str,
    stroke: &str,
) -> Element {
    Element {
        id,
        position: placement.position,
        rotation: placement.rotation,
        fill: fill.to_string(),
        stroke: stroke.to_string(),
        kind: ElementKind::Chair {
            parent,
            seat_number: placement.seat_number,
            is_reserved: false,
            icon: None,
        },
    }
}

/// Fresh chairs for a section, with overrides re-applied by grid index
pub(crate) fn build_section_chairs(section: &Section, overrides: &ChairOverrides) -> Vec<Element> {
    section_chair_positions(section)
        .into_iter()
        .filter_map(|placement| {
            let (row, col) = placement.grid?;
            let mut chair = chair_from_placement(
                section_chair_id(&section.id, row, col),
                ChairParent::Section {
                    section_id: section.id.clone(),
                    row,
                    col,
                },
                placement,
                &section.fill,
                &section.stroke,
            );
            if let Some(ov) = overrides.get(&(row, col)) {
                if let ElementKind::Chair {
                    is_reserved, icon, ..
                } = &mut chair.kind
                {
                    *is_reserved = ov.is_reserved;
                    icon.clone_from(&ov.icon);
                }
                if let Some((fill, stroke)) = &ov.colors {
                    chair.fill.clone_from(fill);
                    chair.stroke.clone_from(stroke);
                }
            }
            Some(chair)
        })
        .collect()
}

/// Fresh chairs around a table, inheriting its colours
pub(crate) fn build_table_chairs(table: &Element, chair: &ChairSettings) -> Vec<Element> {
    let Some(layout) = TableLayout::from_element(table) else {
        return Vec::new();
    };
    table_chair_positions(&layout, chair)
        .into_iter()
        .map(|placement| {
            chair_from_placement(
                table_chair_id(&table.id, placement.seat_number),
                ChairParent::Table {
                    table_id: table.id.clone(),
                },
                placement,
                &table.fill,
                &table.stroke,
            )
        })
        .collect()
}

impl SceneState {
    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.scene.elements.iter().position(|e| e.id == id)
    }

    /// Drop every chair whose parent is `parent_id` (section or table)
    pub(crate) fn remove_chairs_of(&mut self, parent_id: &str) -> usize {
        let before = self.scene.elements.len();
        self.scene
            .elements
            .retain(|e| e.chair_parent().map_or(true, |p| p.parent_id() != parent_id));
        before - self.scene.elements.len()
    }

    /// Reserved/icon/custom-colour state of the current section chairs
    pub(crate) fn section_chair_overrides(&self, section_id: &str) -> ChairOverrides {
        let Some(section) = self.scene.section(section_id) else {
            return ChairOverrides::new();
        };
        let mut overrides = ChairOverrides::new();
        for chair in self.scene.section_chairs(section_id) {
            let Some(grid) = chair.chair_parent().and_then(|p| p.grid_index()) else {
                continue;
            };
            let ElementKind::Chair {
                is_reserved, icon, ..
            } = &chair.kind
            else {
                continue;
            };
            let custom = chair.fill != section.fill || chair.stroke != section.stroke;
            if *is_reserved || icon.is_some() || custom {
                overrides.insert(
                    grid,
                    ChairOverride {
                        is_reserved: *is_reserved,
                        icon: icon.clone(),
                        colors: custom.then(|| (chair.fill.clone(), chair.stroke.clone())),
                    },
                );
            }
        }
        overrides
    }

    /// Replace a section's chairs with a fresh grid placed right after its boundary
    pub(crate) fn regenerate_section_chairs(
        &mut self,
        section_id: &str,
        overrides: &ChairOverrides,
    ) -> bool {
        let Some(section) = self.scene.section(section_id) else {
            tracing::warn!("Cannot regenerate chairs: section {section_id} not found");
            return false;
        };
        let chairs = build_section_chairs(section, overrides);
        self.remove_chairs_of(section_id);
        let at = self
            .index_of(&boundary_id(section_id))
            .map_or(self.scene.elements.len(), |i| i + 1);
        self.scene.elements.splice(at..at, chairs);
        true
    }

    /// Recompute pose of the surviving chairs without recreating deleted ones
    pub(crate) fn reposition_section_chairs(&mut self, section_id: &str) {
        let Some(section) = self.scene.section(section_id) else {
            return;
        };
        let poses: HashMap<(u32, u32), ChairPlacement> = section_chair_positions(section)
            .into_iter()
            .filter_map(|p| Some((p.grid?, p)))
            .collect();
        for chair in &mut self.scene.elements {
            let Some(ChairParent::Section {
                section_id: owner,
                row,
                col,
            }) = chair.chair_parent()
            else {
                continue;
            };
            if owner != section_id {
                continue;
            }
            if let Some(pose) = poses.get(&(*row, *col)) {
                chair.position = pose.position;
                chair.rotation = pose.rotation;
            }
        }
    }

    /// Chairs still wearing the previous section colours follow the new ones
    pub(crate) fn recolor_section_chairs(
        &mut self,
        section_id: &str,
        prior_fill: &str,
        prior_stroke: &str,
    ) {
        let Some(section) = self.scene.section(section_id) else {
            return;
        };
        let (fill, stroke) = (section.fill.clone(), section.stroke.clone());
        for chair in &mut self.scene.elements {
            let owned = chair
                .chair_parent()
                .and_then(|p| p.section_id())
                .is_some_and(|s| s == section_id);
            if !owned {
                continue;
            }
            if chair.fill == prior_fill {
                chair.fill.clone_from(&fill);
            }
            if chair.stroke == prior_stroke {
                chair.stroke.clone_from(&stroke);
            }
        }
    }

    /// Copy section pose, size and colours onto its boundary element
    pub(crate) fn sync_boundary(&mut self, section_id: &str) {
        let Some(section) = self.scene.section(section_id) else {
            return;
        };
        let synced = boundary_element(section);
        match self.index_of(&synced.id) {
            Some(i) => self.scene.elements[i] = synced,
            None => {
                tracing::warn!("Section {section_id} had no boundary, recreating it");
                self.scene.elements.push(synced);
            }
        }
    }

    /// Replace a table's chairs with freshly placed ones inheriting its colours
    pub(crate) fn regenerate_table_chairs(&mut self, table_id: &str) -> bool {
        let Some(table) = self.scene.element(table_id) else {
            tracing::warn!("Cannot regenerate chairs: table {table_id} not found");
            return false;
        };
        if !table.is_table() {
            return false;
        }
        let chairs = build_table_chairs(table, &self.settings.chair);
        let ids: Vec<String> = chairs.iter().map(|c| c.id.clone()).collect();

        self.remove_chairs_of(table_id);
        let Some(at) = self.index_of(table_id) else {
            return false;
        };
        self.scene.elements.splice(at + 1..at + 1, chairs);
        if let ElementKind::Table { chair_ids, .. } = &mut self.scene.elements[at].kind {
            *chair_ids = ids;
        }
        true
    }

    /// Cascade the table colours onto every owned chair
    pub(crate) fn recolor_table_chairs(&mut self, table_id: &str) {
        let Some(table) = self.scene.element(table_id) else {
            return;
        };
        let (fill, stroke) = (table.fill.clone(), table.stroke.clone());
        for chair in &mut self.scene.elements {
            let owned = chair
                .chair_parent()
                .and_then(|p| p.table_id())
                .is_some_and(|t| t == table_id);
            if owned {
                chair.fill.clone_from(&fill);
                chair.stroke.clone_from(&stroke);
            }
        }
    }

    /// Make section seat numbers contiguous again, row-major
    pub(crate) fn renumber_section_chairs(&mut self, section_id: &str) {
        let mut chairs: Vec<&mut Element> = self
            .scene
            .elements
            .iter_mut()
            .filter(|e| {
                e.chair_parent()
                    .and_then(|p| p.section_id())
                    .is_some_and(|s| s == section_id)
            })
            .collect();
        chairs.sort_by_key(|e| e.chair_parent().and_then(|p| p.grid_index()));
        renumber(chairs);
    }

    /// Make table seat numbers contiguous again and resync its chair list
    pub(crate) fn renumber_table_chairs(&mut self, table_id: &str) {
        let mut chairs: Vec<&mut Element> = self
            .scene
            .elements
            .iter_mut()
            .filter(|e| {
                e.chair_parent()
                    .and_then(|p| p.table_id())
                    .is_some_and(|t| t == table_id)
            })
            .collect();
        chairs.sort_by_key(|e| e.seat_number());
        let ids: Vec<String> = chairs.iter().map(|c| c.id.clone()).collect();
        renumber(chairs);

        if let Some(ElementKind::Table {
            chair_ids,
            chair_count,
            ..
        }) = self.scene.element_mut(table_id).map(|t| &mut t.kind)
        {
            *chair_count = ids.len() as u32;
            *chair_ids = ids;
        }
    }
}

fn renumber(chairs: Vec<&mut Element>) {
    for (i, chair) in chairs.into_iter().enumerate() {
        if let ElementKind::Chair { seat_number, .. } = &mut chair.kind {
            *seat_number = i as u32 + 1;
        }
    }
}
