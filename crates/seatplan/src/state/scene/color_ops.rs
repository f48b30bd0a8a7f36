//! Colour changes

use serde::{Deserialize, Serialize};
use shared::ElementId;

use super::{ElementUpdate, SceneState, SectionUpdate};

/// Fill and/or stroke to apply
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorUpdate {
    pub fill: Option<String>,
    pub stroke: Option<String>,
}

impl SceneState {
    /// Recolor elements; tables cascade to their chairs, boundaries to their section
    pub fn set_element_color(&mut self, ids: &[ElementId], colors: &ColorUpdate) -> usize {
        let update = ElementUpdate {
            fill: colors.fill.clone(),
            stroke: colors.stroke.clone(),
            ..ElementUpdate::default()
        };
        ids.iter()
            .filter(|id| self.update_element_properties(id, &update))
            .count()
    }

    /// Recolor a section, its boundary and the chairs following its colours
    pub fn set_section_color(&mut self, section_id: &str, colors: &ColorUpdate) -> bool {
        let update = SectionUpdate {
            fill: colors.fill.clone(),
            stroke: colors.stroke.clone(),
            ..SectionUpdate::default()
        };
        self.update_section_properties(section_id, &update)
    }
}
