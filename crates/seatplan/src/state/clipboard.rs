//! Copy/cut/paste of selection bundles.
//!
//! A bundle keeps a parent together with the chairs it owns so pasting can
//! hand out fresh ids and remap every chair to its new parent.

use shared::{boundary_id, ChairParent, Element, ElementId, ElementKind, Point2D, Scene, Section};

use crate::state::scene::chairs::{section_chair_id, table_chair_id};
use crate::state::scene::SceneState;

/// One clipboard unit
#[derive(Debug, Clone, PartialEq)]
pub enum ClipboardBundle {
    /// Independent element; `chairs` is non-empty only for tables
    Element { element: Element, chairs: Vec<Element> },
    /// A whole section
    Section {
        boundary: Element,
        section: Section,
        chairs: Vec<Element>,
    },
}

impl ClipboardBundle {
    /// Point that an explicit paste position lands on
    fn anchor(&self) -> Point2D {
        match self {
            Self::Element { element, .. } => element.position,
            Self::Section { section, .. } => section.position,
        }
    }
}

/// Clipboard contents; replaced on every copy, read on every paste
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    bundles: Vec<ClipboardBundle>,
    /// Pastes since the last copy, for cascading default offsets
    paste_count: u32,
}

fn fresh_id(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4())
}

impl Clipboard {
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    pub fn bundles(&self) -> &[ClipboardBundle] {
        &self.bundles
    }

    /// Replace the contents with bundles for `ids`. Chairs are only copied
    /// along with their parent; a selection with nothing else leaves the
    /// clipboard as it was.
    pub fn copy(&mut self, scene: &Scene, ids: &[ElementId]) -> usize {
        let mut bundles = Vec::new();
        for id in ids {
            let Some(element) = scene.element(id) else {
                tracing::warn!("Cannot copy element {id}: not found");
                continue;
            };
            match &element.kind {
                ElementKind::SectionBoundary { section_id, .. } => {
                    let Some(section) = scene.section(section_id) else {
                        tracing::warn!("Cannot copy boundary {id}: section {section_id} not found");
                        continue;
                    };
                    bundles.push(ClipboardBundle::Section {
                        boundary: element.clone(),
                        section: section.clone(),
                        chairs: scene.section_chairs(section_id).cloned().collect(),
                    });
                }
                ElementKind::Chair { .. } => {
                    tracing::debug!("Skipping chair {id}: chairs are copied with their parent");
                }
                _ => bundles.push(ClipboardBundle::Element {
                    element: element.clone(),
                    chairs: scene.table_chairs(id).cloned().collect(),
                }),
            }
        }
        if bundles.is_empty() {
            tracing::debug!("Nothing copyable in selection, keeping clipboard");
            return 0;
        }
        let count = bundles.len();
        self.bundles = bundles;
        self.paste_count = 0;
        count
    }

    /// Insert a copy of every bundle with fresh ids.
    ///
    /// With a drop position the first bundle's anchor lands on it; otherwise
    /// each successive paste shifts by another `default_offset`. Returns the
    /// new top-level ids (elements and section boundaries).
    pub fn paste(
        &mut self,
        scene: &mut SceneState,
        position: Option<Point2D>,
        default_offset: [f64; 2],
    ) -> Vec<ElementId> {
        let Some(first) = self.bundles.first() else {
            return Vec::new();
        };
        let (dx, dy) = match position {
            Some(target) => {
                let anchor = first.anchor();
                (target.x - anchor.x, target.y - anchor.y)
            }
            None => {
                self.paste_count += 1;
                let n = f64::from(self.paste_count);
                (default_offset[0] * n, default_offset[1] * n)
            }
        };

        let mut created = Vec::new();
        let mut elements = Vec::new();
        for bundle in &self.bundles {
            match bundle {
                ClipboardBundle::Element { element, chairs } => {
                    let mut copy = element.clone();
                    copy.id = fresh_id(element.element_type().id_prefix());
                    copy.translate(dx, dy);

                    let new_chairs: Vec<Element> = chairs
                        .iter()
                        .filter_map(|chair| {
                            let mut chair = chair.clone();
                            let seat = chair.seat_number()?;
                            chair.id = table_chair_id(&copy.id, seat);
                            if let ElementKind::Chair { parent, .. } = &mut chair.kind {
                                *parent = ChairParent::Table {
                                    table_id: copy.id.clone(),
                                };
                            }
                            chair.translate(dx, dy);
                            Some(chair)
                        })
                        .collect();
                    if let ElementKind::Table { chair_ids, .. } = &mut copy.kind {
                        *chair_ids = new_chairs.iter().map(|c| c.id.clone()).collect();
                    }

                    created.push(copy.id.clone());
                    elements.push(copy);
                    elements.extend(new_chairs);
                }
                ClipboardBundle::Section {
                    boundary,
                    section,
                    chairs,
                } => {
                    let mut new_section = section.clone();
                    new_section.id = fresh_id("section");
                    new_section.position = new_section.position.offset(dx, dy);

                    let mut new_boundary = boundary.clone();
                    new_boundary.id = boundary_id(&new_section.id);
                    new_boundary.translate(dx, dy);
                    if let ElementKind::SectionBoundary { section_id, .. } =
                        &mut new_boundary.kind
                    {
                        section_id.clone_from(&new_section.id);
                    }

                    created.push(new_boundary.id.clone());
                    elements.push(new_boundary);
                    for chair in chairs {
                        let Some((row, col)) = chair.chair_parent().and_then(|p| p.grid_index())
                        else {
                            continue;
                        };
                        let mut chair = chair.clone();
                        chair.id = section_chair_id(&new_section.id, row, col);
                        if let ElementKind::Chair { parent, .. } = &mut chair.kind {
                            *parent = ChairParent::Section {
                                section_id: new_section.id.clone(),
                                row,
                                col,
                            };
                        }
                        chair.translate(dx, dy);
                        elements.push(chair);
                    }
                    scene.scene.sections.push(new_section);
                }
            }
        }

        scene.insert_elements(elements);
        tracing::info!("Pasted {} bundle(s) at offset ({dx:.0}, {dy:.0})", created.len());
        created
    }
}
