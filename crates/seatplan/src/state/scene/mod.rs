//! Scene state management
//!
//! The authoritative model of elements and sections plus snapshot undo/redo.
//! Mutations live in the `*_ops` modules as `impl SceneState` blocks; each one
//! regenerates only the chairs whose parent changed and then schedules a
//! history snapshot that the caller settles at the end of the user event.

pub(crate) mod chairs;
mod color_ops;
mod delete_ops;
mod element_ops;
mod export;
mod history;
mod move_ops;
mod section_ops;
mod transform_ops;

pub use color_ops::ColorUpdate;
pub use element_ops::{ElementUpdate, PlacementConfig};
pub use section_ops::{SectionDraft, SectionUpdate};

use shared::{Element, Scene, Section};

use crate::state::settings::LayoutSettings;

/// Scene with undo/redo history
pub struct SceneState {
    /// Current scene
    pub scene: Scene,
    /// Snapshots up to and including the last settled state
    pub(crate) undo_stack: Vec<Scene>,
    /// Undone snapshots, most recently undone last
    pub(crate) redo_stack: Vec<Scene>,
    /// Monotonically increasing version counter for cache invalidation
    pub(crate) version: u64,
    /// A mutation happened since the last snapshot
    pub(crate) snapshot_pending: bool,
    pub(crate) settings: LayoutSettings,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(LayoutSettings::default())
    }
}

impl SceneState {
    pub fn new(settings: LayoutSettings) -> Self {
        Self {
            scene: Scene::default(),
            undo_stack: vec![Scene::default()],
            redo_stack: Vec::new(),
            version: 0,
            snapshot_pending: false,
            settings,
        }
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Current scene version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Get an element by ID
    pub fn get_element(&self, id: &str) -> Option<&Element> {
        self.scene.element(id)
    }

    /// Get a section by ID
    pub fn get_section(&self, id: &str) -> Option<&Section> {
        self.scene.section(id)
    }

    /// True while a mutation is waiting for its snapshot
    pub fn has_pending_snapshot(&self) -> bool {
        self.snapshot_pending
    }

    /// Bump version and defer the history snapshot to the end of the event
    pub fn notify_mutated(&mut self) {
        self.version += 1;
        self.snapshot_pending = true;
    }

    /// Settle a deferred snapshot, if any
    pub fn flush_snapshot(&mut self) -> bool {
        if !self.snapshot_pending {
            return false;
        }
        self.snapshot_pending = false;
        self.save()
    }
}
