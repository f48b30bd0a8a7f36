use kurbo::Rect;
use shared::{ElementId, Scene, SectionId};

use crate::geometry::{element_bounds, rect_contains};
use crate::state::settings::LayoutSettings;

/// Element selection (supports multi-select).
///
/// The selected set is either all chairs or all non-chairs. The selected
/// section is the one owned by the first selected boundary, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    /// Selected element IDs (in order of selection)
    selected: Vec<ElementId>,
    selected_section: Option<SectionId>,
}

impl SelectionState {
    /// Primary (first) selected element
    pub fn primary(&self) -> Option<&ElementId> {
        self.selected.first()
    }

    /// All selected elements
    pub fn all(&self) -> &[ElementId] {
        &self.selected
    }

    /// Section shown in the properties panel
    pub fn selected_section(&self) -> Option<&SectionId> {
        self.selected_section.as_ref()
    }

    /// Check if an element is selected
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Number of selected elements
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Clear all selection
    pub fn clear(&mut self) {
        self.selected.clear();
        self.selected_section = None;
    }

    /// Select a single element (clears previous selection)
    pub fn select(&mut self, scene: &Scene, id: &str) {
        self.selected.clear();
        if scene.contains(id) {
            self.selected.push(id.to_string());
        } else {
            tracing::warn!("Cannot select element {id}: not found");
        }
        self.sync_section(scene);
    }

    /// Replace the selection, keeping only elements of the first one's kind
    pub fn set(&mut self, scene: &Scene, ids: &[ElementId]) {
        self.selected.clear();
        let mut chairs = None;
        for id in ids {
            let Some(element) = scene.element(id) else {
                tracing::warn!("Cannot select element {id}: not found");
                continue;
            };
            let is_chair = *chairs.get_or_insert(element.is_chair());
            if element.is_chair() == is_chair && !self.is_selected(id) {
                self.selected.push(id.clone());
            }
        }
        self.sync_section(scene);
    }

    /// Toggle membership (modified click), dropping elements of the other kind
    pub fn toggle(&mut self, scene: &Scene, id: &str) {
        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
        } else if let Some(element) = scene.element(id) {
            let is_chair = element.is_chair();
            self.selected
                .retain(|s| scene.element(s).is_some_and(|e| e.is_chair() == is_chair));
            self.selected.push(id.to_string());
        } else {
            tracing::warn!("Cannot select element {id}: not found");
        }
        self.sync_section(scene);
    }

    /// Pointer click on an element.
    ///
    /// A plain click replaces the selection with the target, or empties it
    /// when the target already was the only selected element. Section
    /// boundaries always behave like a plain click.
    pub fn click(&mut self, scene: &Scene, id: &str, additive: bool) {
        let boundary = scene
            .element(id)
            .is_some_and(|e| e.boundary_section().is_some());
        if additive && !boundary {
            self.toggle(scene, id);
        } else if self.selected.len() == 1 && self.selected[0] == id {
            self.clear();
        } else {
            self.select(scene, id);
        }
    }

    /// Select every non-chair element whose bounds lie fully inside `area`
    pub fn select_box(&mut self, scene: &Scene, area: Rect, settings: &LayoutSettings) {
        self.selected = scene
            .elements
            .iter()
            .filter(|e| !e.is_chair() && rect_contains(area, element_bounds(e, settings)))
            .map(|e| e.id.clone())
            .collect();
        self.sync_section(scene);
    }

    /// Drop ids that no longer exist in the scene
    pub fn prune(&mut self, scene: &Scene) {
        self.selected.retain(|id| scene.contains(id));
        self.sync_section(scene);
    }

    /// True if the selection holds chairs
    pub fn has_chairs(&self, scene: &Scene) -> bool {
        self.selected
            .iter()
            .any(|id| scene.element(id).is_some_and(|e| e.is_chair()))
    }

    fn sync_section(&mut self, scene: &Scene) {
        self.selected_section = self
            .selected
            .iter()
            .find_map(|id| scene.element(id).and_then(|e| e.boundary_section()))
            .filter(|s| scene.section(s).is_some())
            .cloned();
    }
}
