//! Undo/redo functionality

use shared::Scene;

use super::SceneState;

impl SceneState {
    /// Push the current scene unless it equals the last snapshot.
    ///
    /// A pushed snapshot is a fresh user mutation, so it discards the redo list.
    pub fn save(&mut self) -> bool {
        if self.undo_stack.last() == Some(&self.scene) {
            return false;
        }
        self.undo_stack.push(self.scene.clone());
        self.redo_stack.clear();
        let limit = self.settings.interaction.history_limit.max(1);
        if self.undo_stack.len() > limit {
            let excess = self.undo_stack.len() - limit;
            self.undo_stack.drain(..excess);
        }
        true
    }

    /// Undo last change
    pub fn undo(&mut self) -> bool {
        self.flush_snapshot();
        if self.undo_stack.len() < 2 {
            tracing::debug!("Nothing to undo");
            return false;
        }
        if let Some(current) = self.undo_stack.pop() {
            self.redo_stack.push(current);
        }
        if let Some(prev) = self.undo_stack.last() {
            self.scene = prev.clone();
        }
        self.version += 1;
        true
    }

    /// Redo last undone change
    pub fn redo(&mut self) -> bool {
        self.flush_snapshot();
        let Some(next) = self.redo_stack.pop() else {
            tracing::debug!("Nothing to redo");
            return false;
        };
        self.scene = next.clone();
        self.undo_stack.push(next);
        self.version += 1;
        true
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1 || self.snapshot_pending
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Replace the scene and restart history from it
    pub fn load_scene(&mut self, scene: Scene) {
        self.undo_stack = vec![scene.clone()];
        self.scene = scene;
        self.redo_stack.clear();
        self.snapshot_pending = false;
        self.version += 1;
    }

    /// Empty scene and history
    pub fn clear_all(&mut self) {
        self.scene = Scene::default();
        self.undo_stack = vec![Scene::default()];
        self.redo_stack.clear();
        self.snapshot_pending = false;
        self.version += 1;
        tracing::info!("Scene cleared");
    }
}
