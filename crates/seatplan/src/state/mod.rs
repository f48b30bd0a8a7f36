pub mod clipboard;
pub mod interaction;
pub mod scene;
pub mod selection;
pub mod settings;
pub mod tool;

use shared::{ElementId, Point2D};

use clipboard::Clipboard;
pub use scene::{
    ColorUpdate, ElementUpdate, PlacementConfig, SceneState, SectionDraft, SectionUpdate,
};
use selection::SelectionState;
pub use settings::LayoutSettings;
pub use tool::{Gesture, Modifiers, PlaceableType, PointerEvent, ToolMode, ToolState};

/// Combined editor state
pub struct AppState {
    pub scene: SceneState,
    pub selection: SelectionState,
    pub tool: ToolState,
    pub clipboard: Clipboard,
    /// Canvas pan offset driven by the hand tool
    pub view_offset: Point2D,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(LayoutSettings::default())
    }
}

impl AppState {
    pub fn new(settings: LayoutSettings) -> Self {
        Self {
            scene: SceneState::new(settings),
            selection: SelectionState::default(),
            tool: ToolState::default(),
            clipboard: Clipboard::default(),
            view_offset: Point2D::default(),
        }
    }

    pub fn settings(&self) -> &LayoutSettings {
        self.scene.settings()
    }

    /// Close the current event: settle the deferred snapshot and drop
    /// selected ids the event removed
    pub(crate) fn finish_event(&mut self) {
        self.scene.flush_snapshot();
        self.selection.prune(&self.scene.scene);
    }

    /// Switch tool from the toolbar
    pub fn select_tool(&mut self, mode: ToolMode) {
        self.tool.set_mode(mode);
    }

    pub fn set_placement_config(&mut self, config: PlacementConfig) {
        self.tool.placement = config;
    }

    /// Properties panel edit of an element. With `commit_now == false` the
    /// snapshot stays pending until the next committed event.
    pub fn update_element(&mut self, id: &str, update: &ElementUpdate, commit_now: bool) -> bool {
        let changed = self.scene.update_element_properties(id, update);
        if commit_now {
            self.finish_event();
        }
        changed
    }

    /// Properties panel edit of a section
    pub fn update_section(&mut self, id: &str, update: &SectionUpdate, commit_now: bool) -> bool {
        let changed = self.scene.update_section_properties(id, update);
        if commit_now {
            self.finish_event();
        }
        changed
    }

    /// Recolor the selection, or the selected section when nothing else is
    pub fn set_color(&mut self, colors: &ColorUpdate) -> usize {
        let ids = self.selection.all().to_vec();
        let changed = if ids.is_empty() {
            match self.selection.selected_section().cloned() {
                Some(section_id) => usize::from(self.scene.set_section_color(&section_id, colors)),
                None => 0,
            }
        } else {
            self.scene.set_element_color(&ids, colors)
        };
        self.finish_event();
        changed
    }

    pub fn delete_selected(&mut self) -> usize {
        let ids = self.selection.all().to_vec();
        let removed = self.scene.delete_elements(&ids);
        self.finish_event();
        removed
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.scene.undo();
        if undone {
            self.selection.clear();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.scene.redo();
        if redone {
            self.selection.clear();
        }
        redone
    }

    pub fn can_undo(&self) -> bool {
        self.scene.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.scene.can_redo()
    }

    pub fn copy(&mut self) -> usize {
        let ids = self.selection.all().to_vec();
        self.clipboard.copy(&self.scene.scene, &ids)
    }

    /// Copy then delete the selection; nothing is deleted when nothing
    /// could be copied
    pub fn cut(&mut self) -> usize {
        let copied = self.copy();
        if copied > 0 {
            self.delete_selected();
        }
        copied
    }

    /// Paste the clipboard and select what was created
    pub fn paste(&mut self, position: Option<Point2D>) -> Vec<ElementId> {
        let offset = self.settings().interaction.paste_offset;
        let created = self.clipboard.paste(&mut self.scene, position, offset);
        self.finish_event();
        if !created.is_empty() {
            self.selection.set(&self.scene.scene, &created);
        }
        created
    }

    /// Empty the scene and its history
    pub fn clear_all(&mut self) {
        self.scene.clear_all();
        self.selection.clear();
        self.tool.gesture = Gesture::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use shared::ElementType;

    #[test]
    fn test_uncommitted_edits_share_one_entry() {
        let mut app = AppState::default();
        let id = app.scene.add_section(fixtures::draft(0.0, 0.0, 150.0, 120.0)).unwrap();
        app.finish_event();

        for curve in [10.0, 20.0, 30.0] {
            let update = SectionUpdate {
                curve: Some(curve),
                ..SectionUpdate::default()
            };
            app.update_section(&id, &update, false);
        }
        let done = SectionUpdate {
            curve: Some(40.0),
            ..SectionUpdate::default()
        };
        app.update_section(&id, &done, true);

        assert!(app.undo());
        assert_eq!(app.scene.get_section(&id).unwrap().curve, 0.0);
        assert!(app.undo());
        assert!(app.scene.scene.is_empty());
    }

    #[test]
    fn test_undo_clears_selection() {
        let mut app = AppState::default();
        let config = fixtures::circle_table_config(50.0, 4, 20.0);
        let id = app
            .scene
            .add_element(ElementType::Table, Point2D::new(0.0, 0.0), &config)
            .unwrap();
        app.finish_event();
        app.selection.select(&app.scene.scene, &id);
        assert!(app.undo());
        assert!(app.selection.is_empty());
    }

    #[test]
    fn test_cut_then_paste_restores_count() {
        let mut app = AppState::default();
        app.scene.scene = fixtures::demo_scene();
        app.selection.select(&app.scene.scene, fixtures::DEMO_TABLE);
        assert_eq!(app.cut(), 1);
        assert!(app.scene.get_element(fixtures::DEMO_TABLE).is_none());
        assert!(app.selection.is_empty());

        let created = app.paste(None);
        assert_eq!(created.len(), 1);
        assert_eq!(app.selection.all(), created.as_slice());
        assert_eq!(app.scene.scene.table_chairs(&created[0]).count(), 4);
    }

    #[test]
    fn test_cut_of_chairs_keeps_chairs_and_clipboard() {
        let mut app = AppState::default();
        app.scene.scene = fixtures::demo_scene();
        app.selection.select(&app.scene.scene, fixtures::DEMO_STAGE);
        assert_eq!(app.copy(), 1);

        let chairs: Vec<_> = app
            .scene
            .scene
            .table_chairs(fixtures::DEMO_TABLE)
            .map(|c| c.id.clone())
            .collect();
        app.selection.set(&app.scene.scene, &chairs);
        assert_eq!(app.cut(), 0);
        assert_eq!(app.scene.scene.table_chairs(fixtures::DEMO_TABLE).count(), 4);
        assert_eq!(app.selection.count(), 4);

        let created = app.paste(None);
        assert_eq!(created.len(), 1);
        assert_eq!(
            app.scene.get_element(&created[0]).unwrap().element_type(),
            ElementType::Stage
        );
    }

    #[test]
    fn test_set_color_targets_selected_section() {
        let mut app = AppState::default();
        app.scene.scene = fixtures::demo_scene();
        let boundary = shared::boundary_id(fixtures::DEMO_SECTION);
        app.selection.select(&app.scene.scene, &boundary);
        let colors = ColorUpdate {
            fill: Some("#222222".to_string()),
            ..ColorUpdate::default()
        };
        assert_eq!(app.set_color(&colors), 1);
        assert_eq!(app.scene.get_section(fixtures::DEMO_SECTION).unwrap().fill, "#222222");
    }
}
