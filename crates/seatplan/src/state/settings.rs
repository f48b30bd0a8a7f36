//! Layout settings

use std::path::Path;

use serde::{Deserialize, Serialize};
use shared::ElementType;

/// Chair footprint and spacing used by the placement geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChairSettings {
    /// Chair width in pixels
    pub width: f64,
    /// Chair height in pixels
    pub height: f64,
    /// Gap between neighbouring chairs along a table edge
    pub gap: f64,
    /// Extra clearance between a table edge and the chair's inner side
    pub table_clearance: f64,
}

impl Default for ChairSettings {
    fn default() -> Self {
        Self {
            width: 25.0,
            height: 25.0,
            gap: 5.0,
            table_clearance: 12.5,
        }
    }
}

impl ChairSettings {
    /// Center-to-center distance of chairs packed along an edge
    pub fn pitch(&self) -> f64 {
        self.width + self.gap
    }

    /// Distance from a table's outline to the chair center, excluding `chair_spacing`
    pub fn placement_radius_offset(&self) -> f64 {
        self.height / 2.0 + self.table_clearance
    }
}

/// Section sizing and drawing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionSettings {
    /// Padding between the outermost chairs and the boundary
    pub padding: f64,
    /// Minimum boundary width/height
    pub min_size: f64,
    /// Drawn rectangles smaller than this (either side) are discarded
    pub min_draw_size: f64,
    /// Pixels per column when deriving cols from a drawn rectangle
    pub cell_width: f64,
    /// Pixels per row when deriving rows from a drawn rectangle
    pub cell_height: f64,
    pub default_row_spacing: f64,
    pub default_col_spacing: f64,
    /// Largest row count a section may hold
    pub max_rows: u32,
    /// Largest column count a section may hold
    pub max_cols: u32,
}

impl Default for SectionSettings {
    fn default() -> Self {
        Self {
            padding: 20.0,
            min_size: 60.0,
            min_draw_size: 20.0,
            cell_width: 50.0,
            cell_height: 60.0,
            default_row_spacing: 60.0,
            default_col_spacing: 50.0,
            max_rows: 500,
            max_cols: 500,
        }
    }
}

/// Interaction thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Drags shorter than this are treated as clicks
    pub drag_threshold: f64,
    /// Offset applied to a paste without an explicit drop position
    pub paste_offset: [f64; 2],
    /// Maximum number of stored history snapshots
    pub history_limit: usize,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            drag_threshold: 1.0,
            paste_offset: [20.0, 20.0],
            history_limit: 100,
        }
    }
}

/// Fill/stroke pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPair {
    pub fill: String,
    pub stroke: String,
}

impl ColorPair {
    fn new(fill: &str, stroke: &str) -> Self {
        Self {
            fill: fill.to_string(),
            stroke: stroke.to_string(),
        }
    }
}

/// Default colors per element type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteSettings {
    pub chair: ColorPair,
    pub table: ColorPair,
    pub stage: ColorPair,
    pub floor: ColorPair,
    pub entrance: ColorPair,
    pub exit: ColorPair,
    pub section: ColorPair,
    pub text: ColorPair,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            chair: ColorPair::new("#ffffff", "#4b5563"),
            table: ColorPair::new("#fde68a", "#92400e"),
            stage: ColorPair::new("#1f2937", "#111827"),
            floor: ColorPair::new("#9ca3af", "#6b7280"),
            entrance: ColorPair::new("#22c55e", "#15803d"),
            exit: ColorPair::new("#ef4444", "#b91c1c"),
            section: ColorPair::new("#e0e7ff", "#4f46e5"),
            text: ColorPair::new("#111827", "#111827"),
        }
    }
}

impl PaletteSettings {
    /// Colors for a newly created element of `element_type`
    pub fn for_type(&self, element_type: ElementType) -> &ColorPair {
        match element_type {
            ElementType::Chair => &self.chair,
            ElementType::Table => &self.table,
            ElementType::Stage => &self.stage,
            ElementType::Floor => &self.floor,
            ElementType::Entrance => &self.entrance,
            ElementType::Exit => &self.exit,
            ElementType::SectionBoundary => &self.section,
            ElementType::Text => &self.text,
        }
    }
}

/// All layout settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub chair: ChairSettings,
    pub section: SectionSettings,
    pub interaction: InteractionSettings,
    pub palette: PaletteSettings,
    /// Floor for any transformed width/height/radius
    pub min_shape_size: f64,
    /// Unscaled size of the entrance/exit pictogram
    pub marker_size: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            chair: ChairSettings::default(),
            section: SectionSettings::default(),
            interaction: InteractionSettings::default(),
            palette: PaletteSettings::default(),
            min_shape_size: 10.0,
            marker_size: 40.0,
        }
    }
}

impl LayoutSettings {
    /// Load settings from the platform config directory, or return default if not found
    pub fn load() -> Self {
        if let Some(dirs) = directories::ProjectDirs::from("com", "seatplan", "seatplan") {
            let config_path = dirs.config_dir().join("settings.json");
            if config_path.exists() {
                return Self::load_from(&config_path);
            }
        }
        Self::default()
    }

    /// Load settings from an explicit file, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("Invalid settings file {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Cannot read settings file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Save settings to the platform config directory
    pub fn save(&self) {
        if let Some(dirs) = directories::ProjectDirs::from("com", "seatplan", "seatplan") {
            let config_dir = dirs.config_dir();
            if std::fs::create_dir_all(config_dir).is_ok() {
                let config_path = config_dir.join("settings.json");
                if let Ok(json) = serde_json::to_string_pretty(self) {
                    let _ = std::fs::write(config_path, json);
                }
            }
        }
    }
}
