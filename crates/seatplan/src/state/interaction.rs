//! Pointer state machine.
//!
//! Interprets pointer down/move/up against the active tool and drives scene
//! mutations and selection changes. Each finished event settles at most one
//! history snapshot.

use kurbo::Rect;
use shared::{boundary_id, Point2D};

use super::scene::SectionDraft;
use super::tool::{Gesture, PointerEvent, ToolMode};
use super::AppState;
use crate::transform::TransformRecord;

fn distance(a: Point2D, b: Point2D) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

impl AppState {
    pub fn pointer_down(&mut self, event: &PointerEvent) {
        let position = event.position;
        self.tool.gesture = match self.tool.mode {
            ToolMode::Select => self.select_down(event),
            ToolMode::Hand => Gesture::Pan { last: position },
            ToolMode::DrawSection => Gesture::DrawSection {
                origin: position,
                current: position,
            },
            ToolMode::Place(kind) => {
                let config = self.tool.placement.clone();
                if let Some(id) = self.scene.add_element(kind.element_type(), position, &config) {
                    self.selection.select(&self.scene.scene, &id);
                    self.tool.set_mode(ToolMode::Select);
                }
                self.finish_event();
                Gesture::Idle
            }
        };
    }

    fn select_down(&mut self, event: &PointerEvent) -> Gesture {
        let additive = event.modifiers.toggles();
        let target = event
            .target
            .as_ref()
            .filter(|id| self.scene.scene.contains(id));

        let Some(id) = target else {
            if !additive {
                self.selection.clear();
            }
            return Gesture::BoxSelect {
                origin: event.position,
                current: event.position,
            };
        };

        if self.selection.is_selected(id) {
            return Gesture::DragMove {
                origin: event.position,
                current: event.position,
                deferred_click: Some((id.clone(), additive)),
            };
        }
        self.selection.click(&self.scene.scene, id, additive);
        if self.selection.is_selected(id) {
            Gesture::DragMove {
                origin: event.position,
                current: event.position,
                deferred_click: None,
            }
        } else {
            Gesture::Idle
        }
    }

    pub fn pointer_move(&mut self, event: &PointerEvent) {
        let position = event.position;
        match &mut self.tool.gesture {
            Gesture::Idle => {}
            Gesture::BoxSelect { current, .. }
            | Gesture::DragMove { current, .. }
            | Gesture::DrawSection { current, .. } => *current = position,
            Gesture::Pan { last } => {
                self.view_offset = self
                    .view_offset
                    .offset(position.x - last.x, position.y - last.y);
                *last = position;
            }
        }
    }

    pub fn pointer_up(&mut self, event: &PointerEvent) {
        let gesture = std::mem::take(&mut self.tool.gesture);
        if !event.in_canvas {
            if gesture != Gesture::Idle {
                tracing::debug!("Pointer released outside the canvas, discarding gesture");
            }
            return;
        }
        let position = event.position;
        let threshold = self.settings().interaction.drag_threshold;

        match gesture {
            Gesture::Idle | Gesture::Pan { .. } => {}
            Gesture::BoxSelect { origin, .. } => {
                if distance(origin, position) >= threshold {
                    let area = Rect::new(origin.x, origin.y, position.x, position.y).abs();
                    self.selection
                        .select_box(&self.scene.scene, area, &self.scene.settings);
                }
            }
            Gesture::DragMove {
                origin,
                deferred_click,
                ..
            } => {
                if distance(origin, position) < threshold {
                    tracing::debug!("Sub-threshold drag treated as a click");
                    if let Some((id, additive)) = deferred_click {
                        self.selection.click(&self.scene.scene, &id, additive);
                    }
                } else {
                    let ids = self.selection.all().to_vec();
                    self.scene
                        .move_elements(&ids, position.x - origin.x, position.y - origin.y);
                }
            }
            Gesture::DrawSection { origin, .. } => {
                let draft = SectionDraft::from_corners(origin, position);
                if let Some(section_id) = self.scene.add_section(draft) {
                    self.selection
                        .select(&self.scene.scene, &boundary_id(&section_id));
                    self.tool.set_mode(ToolMode::Select);
                }
            }
        }
        self.finish_event();
    }

    /// Abandon the gesture in progress without touching the scene
    pub fn pointer_cancel(&mut self) {
        self.tool.gesture = Gesture::Idle;
    }

    /// Release of a resize/rotate handle
    pub fn transform_end(&mut self, records: &[TransformRecord]) -> usize {
        if self.selection.is_empty() {
            tracing::debug!("Ignoring transform without a selection");
            return 0;
        }
        let applied = self.scene.apply_transform(records);
        self.finish_event();
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::state::tool::{Modifiers, PlaceableType};

    fn app() -> AppState {
        let mut app = AppState::default();
        app.scene.scene = fixtures::demo_scene();
        app
    }

    fn click(app: &mut AppState, x: f64, y: f64, target: Option<&str>) {
        let mut ev = PointerEvent::at(x, y);
        ev.target = target.map(str::to_string);
        app.pointer_down(&ev);
        app.pointer_up(&ev);
    }

    #[test]
    fn test_click_selects_and_empty_click_clears() {
        let mut app = app();
        click(&mut app, 400.0, 400.0, Some(fixtures::DEMO_TABLE));
        assert_eq!(app.selection.all(), &[fixtures::DEMO_TABLE.to_string()]);
        click(&mut app, 900.0, 900.0, None);
        assert!(app.selection.is_empty());
    }

    #[test]
    fn test_click_on_sole_selection_deselects_on_release() {
        let mut app = app();
        click(&mut app, 400.0, 400.0, Some(fixtures::DEMO_TABLE));
        click(&mut app, 400.0, 400.0, Some(fixtures::DEMO_TABLE));
        assert!(app.selection.is_empty());
    }

    #[test]
    fn test_drag_moves_whole_selection() {
        let mut app = app();
        let shift = Modifiers {
            shift: true,
            ..Modifiers::default()
        };
        click(&mut app, 400.0, 400.0, Some(fixtures::DEMO_TABLE));
        let ev = PointerEvent::at(600.0, 400.0)
            .on(fixtures::DEMO_STAGE)
            .with_modifiers(shift);
        app.pointer_down(&ev);
        app.pointer_up(&ev);
        assert_eq!(app.selection.count(), 2);

        app.pointer_down(&PointerEvent::at(400.0, 400.0).on(fixtures::DEMO_TABLE));
        app.pointer_move(&PointerEvent::at(420.0, 410.0));
        assert_eq!(app.tool.drag_offset(), Some((20.0, 10.0)));
        app.pointer_up(&PointerEvent::at(430.0, 430.0));

        assert_eq!(app.selection.count(), 2);
        let table = app.scene.get_element(fixtures::DEMO_TABLE).unwrap();
        assert_eq!(table.position, Point2D::new(430.0, 430.0));
        let stage = app.scene.get_element(fixtures::DEMO_STAGE).unwrap();
        assert_eq!(stage.position, Point2D::new(630.0, 430.0));
        assert!(app.can_undo());
    }

    #[test]
    fn test_release_outside_canvas_cancels() {
        let mut app = app();
        click(&mut app, 400.0, 400.0, Some(fixtures::DEMO_TABLE));
        let before = app.scene.scene.clone();
        app.pointer_down(&PointerEvent::at(400.0, 400.0).on(fixtures::DEMO_TABLE));
        app.pointer_up(&PointerEvent::at(500.0, 500.0).outside());
        assert_eq!(app.scene.scene, before);
        assert_eq!(app.tool.gesture, Gesture::Idle);
    }

    #[test]
    fn test_place_tool_reverts_to_select() {
        let mut app = AppState::default();
        app.select_tool(ToolMode::Place(PlaceableType::Exit));
        app.pointer_down(&PointerEvent::at(50.0, 50.0));
        assert_eq!(app.tool.mode, ToolMode::Select);
        assert_eq!(app.scene.scene.elements.len(), 1);
        assert_eq!(app.selection.count(), 1);
        assert!(app.can_undo());
    }

    #[test]
    fn test_hand_tool_pans_without_mutation() {
        let mut app = app();
        app.select_tool(ToolMode::Hand);
        app.pointer_down(&PointerEvent::at(0.0, 0.0));
        app.pointer_move(&PointerEvent::at(30.0, -10.0));
        app.pointer_up(&PointerEvent::at(30.0, -10.0));
        assert_eq!(app.view_offset, Point2D::new(30.0, -10.0));
        assert!(!app.can_undo());
    }

    #[test]
    fn test_transform_needs_selection() {
        let mut app = app();
        let stage = Point2D::new(600.0, 400.0);
        let record = fixtures::scale_record(fixtures::DEMO_STAGE, stage, 2.0, 2.0);
        assert_eq!(app.transform_end(&[record.clone()]), 0);
        click(&mut app, 600.0, 400.0, Some(fixtures::DEMO_STAGE));
        assert_eq!(app.transform_end(&[record]), 1);
    }
}
