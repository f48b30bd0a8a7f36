//! Headless test harness for programmatic layout editing.
//!
//! Drives the same `AppState` entry points a canvas would, so tests and the
//! replay binary exercise the real pointer/selection/history paths.

use shared::{ElementId, ExportedLayout, Point2D, Scene, SectionId};

use crate::state::tool::{Modifiers, PlaceableType, PointerEvent, ToolMode};
use crate::state::{AppState, LayoutSettings, PlacementConfig};

/// Headless test harness owning the editor state
pub struct TestHarness {
    pub app: AppState,
}

impl TestHarness {
    /// Create a new empty harness with default settings.
    pub fn new() -> Self {
        Self::with_settings(LayoutSettings::default())
    }

    pub fn with_settings(settings: LayoutSettings) -> Self {
        Self {
            app: AppState::new(settings),
        }
    }

    // ── Scene manipulation ────────────────────────────────────

    /// Place an element with the given placement attributes and return its ID
    pub fn place(
        &mut self,
        kind: PlaceableType,
        x: f64,
        y: f64,
        config: PlacementConfig,
    ) -> Option<ElementId> {
        self.app.set_placement_config(config);
        self.app.select_tool(ToolMode::Place(kind));
        self.app.pointer_down(&PointerEvent::at(x, y));
        self.app.selection.primary().cloned()
    }

    /// Place a table using the given attributes
    pub fn add_table(&mut self, x: f64, y: f64, config: PlacementConfig) -> Option<ElementId> {
        self.place(PlaceableType::Table, x, y, config)
    }

    /// Place a stage with default attributes
    pub fn add_stage(&mut self, x: f64, y: f64) -> Option<ElementId> {
        self.place(PlaceableType::Stage, x, y, PlacementConfig::default())
    }

    /// Drag out a section rectangle and return the new section ID
    pub fn draw_section(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> Option<SectionId> {
        self.app.select_tool(ToolMode::DrawSection);
        self.app.pointer_down(&PointerEvent::at(x0, y0));
        self.app.pointer_move(&PointerEvent::at(x1, y1));
        self.app.pointer_up(&PointerEvent::at(x1, y1));
        self.app.selection.selected_section().cloned()
    }

    /// Load a scene (replaces current and restarts history)
    pub fn load_scene(&mut self, scene: Scene) {
        self.app.scene.load_scene(scene);
        self.app.selection.clear();
    }

    /// Load a scene from JSON string
    pub fn load_scene_json(&mut self, json: &str) -> Result<(), String> {
        let scene: Scene =
            serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;
        self.load_scene(scene);
        Ok(())
    }

    /// Export the current flat scene as JSON
    pub fn export_scene_json(&self) -> String {
        serde_json::to_string_pretty(&self.app.scene.scene).unwrap_or_default()
    }

    /// Hierarchical export of the current scene
    pub fn export_layout(&self) -> ExportedLayout {
        self.app.scene.prepare_export()
    }

    pub fn undo(&mut self) -> bool {
        self.app.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.app.redo()
    }

    /// Clear the entire scene
    pub fn clear(&mut self) {
        self.app.clear_all();
    }

    // ── Pointer gestures ──────────────────────────────────────

    /// Click an element with the select tool
    pub fn click(&mut self, id: &str) {
        self.click_with(id, Modifiers::default());
    }

    /// Shift-click an element
    pub fn shift_click(&mut self, id: &str) {
        let shift = Modifiers {
            shift: true,
            ..Modifiers::default()
        };
        self.click_with(id, shift);
    }

    fn click_with(&mut self, id: &str, modifiers: Modifiers) {
        self.app.select_tool(ToolMode::Select);
        let position = self.position_of(id);
        let event = PointerEvent::at(position.x, position.y)
            .on(id)
            .with_modifiers(modifiers);
        self.app.pointer_down(&event);
        self.app.pointer_up(&event);
    }

    /// Click empty canvas
    pub fn click_empty(&mut self, x: f64, y: f64) {
        self.app.select_tool(ToolMode::Select);
        let event = PointerEvent::at(x, y);
        self.app.pointer_down(&event);
        self.app.pointer_up(&event);
    }

    /// Press on an element and release it `(dx, dy)` away
    pub fn drag(&mut self, id: &str, dx: f64, dy: f64) {
        self.app.select_tool(ToolMode::Select);
        let from = self.position_of(id);
        let to = from.offset(dx, dy);
        self.app.pointer_down(&PointerEvent::at(from.x, from.y).on(id));
        self.app.pointer_move(&PointerEvent::at(to.x, to.y));
        self.app.pointer_up(&PointerEvent::at(to.x, to.y));
    }

    /// Rubber-band select from empty canvas
    pub fn box_select(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        self.app.select_tool(ToolMode::Select);
        self.app.pointer_down(&PointerEvent::at(x0, y0));
        self.app.pointer_move(&PointerEvent::at(x1, y1));
        self.app.pointer_up(&PointerEvent::at(x1, y1));
    }

    fn position_of(&self, id: &str) -> Point2D {
        self.app
            .scene
            .get_element(id)
            .map(|e| e.position)
            .unwrap_or_default()
    }

    // ── Selection ─────────────────────────────────────────────

    /// Replace the selection
    pub fn select(&mut self, ids: &[ElementId]) {
        self.app.selection.set(&self.app.scene.scene, ids);
    }

    pub fn clear_selection(&mut self) {
        self.app.selection.clear();
    }

    pub fn selected(&self) -> &[ElementId] {
        self.app.selection.all()
    }

    // ── Inspection ────────────────────────────────────────────

    /// Number of elements including chairs and boundaries
    pub fn element_count(&self) -> usize {
        self.app.scene.scene.elements.len()
    }

    pub fn chair_count(&self) -> usize {
        self.app.scene.scene.elements.iter().filter(|e| e.is_chair()).count()
    }

    pub fn section_count(&self) -> usize {
        self.app.scene.scene.sections.len()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_new_harness_empty() {
        let h = TestHarness::new();
        assert_eq!(h.element_count(), 0);
        assert_eq!(h.section_count(), 0);
    }

    #[test]
    fn test_draw_section_selects_boundary() {
        let mut h = TestHarness::new();
        let id = h.draw_section(0.0, 0.0, 150.0, 120.0).unwrap();
        assert_eq!(h.section_count(), 1);
        assert_eq!(h.chair_count(), 6);
        assert_eq!(h.selected(), &[shared::boundary_id(&id)]);
        assert_eq!(h.app.tool.mode, ToolMode::Select);
    }

    #[test]
    fn test_add_table_places_chairs() {
        let mut h = TestHarness::new();
        let id = h
            .add_table(100.0, 100.0, fixtures::circle_table_config(50.0, 6, 20.0))
            .unwrap();
        assert_eq!(h.chair_count(), 6);
        assert_eq!(h.app.scene.scene.table_chairs(&id).count(), 6);
    }

    #[test]
    fn test_undo_redo_cycle() {
        let mut h = TestHarness::new();
        h.add_stage(0.0, 0.0);
        assert_eq!(h.element_count(), 1);
        assert!(h.undo());
        assert_eq!(h.element_count(), 0);
        assert!(h.redo());
        assert_eq!(h.element_count(), 1);
    }

    #[test]
    fn test_load_export_json() {
        let mut h = TestHarness::new();
        h.load_scene(fixtures::demo_scene());
        let json = h.export_scene_json();

        let mut h2 = TestHarness::new();
        h2.load_scene_json(&json).unwrap();
        assert_eq!(h2.element_count(), h.element_count());
        assert!(!h2.app.can_undo());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut h = TestHarness::new();
        h.load_scene(fixtures::demo_scene());
        h.click(fixtures::DEMO_STAGE);
        h.clear();
        assert_eq!(h.element_count(), 0);
        assert!(h.selected().is_empty());
        assert!(!h.app.can_undo());
    }
}
