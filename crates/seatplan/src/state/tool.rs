use kurbo::Rect;
use serde::{Deserialize, Serialize};
use shared::{ElementId, ElementType, Point2D};

use crate::state::scene::{PlacementConfig, SectionDraft};

// ============================================================================
// Tool modes
// ============================================================================

/// Element types a placement tool can stamp out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceableType {
    Table,
    Stage,
    Floor,
    Entrance,
    Exit,
    Text,
}

impl PlaceableType {
    pub fn element_type(self) -> ElementType {
        match self {
            Self::Table => ElementType::Table,
            Self::Stage => ElementType::Stage,
            Self::Floor => ElementType::Floor,
            Self::Entrance => ElementType::Entrance,
            Self::Exit => ElementType::Exit,
            Self::Text => ElementType::Text,
        }
    }
}

/// Currently active canvas tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolMode {
    #[default]
    Select,
    Hand,
    DrawSection,
    Place(PlaceableType),
}

impl ToolMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Select => "Select",
            Self::Hand => "Hand",
            Self::DrawSection => "Section",
            Self::Place(PlaceableType::Table) => "Table",
            Self::Place(PlaceableType::Stage) => "Stage",
            Self::Place(PlaceableType::Floor) => "Floor",
            Self::Place(PlaceableType::Entrance) => "Entrance",
            Self::Place(PlaceableType::Exit) => "Exit",
            Self::Place(PlaceableType::Text) => "Text",
        }
    }
}

// ============================================================================
// Pointer input
// ============================================================================

/// Modifier keys held during a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Any modifier turns a click into a toggle
    pub fn toggles(&self) -> bool {
        self.shift || self.ctrl || self.meta
    }
}

fn in_canvas_default() -> bool {
    true
}

/// Pointer event in canvas coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub position: Point2D,
    /// Element under the pointer
    #[serde(default)]
    pub target: Option<ElementId>,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// False when released outside the canvas
    #[serde(default = "in_canvas_default")]
    pub in_canvas: bool,
}

impl PointerEvent {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Point2D::new(x, y),
            target: None,
            modifiers: Modifiers::default(),
            in_canvas: true,
        }
    }

    pub fn on(mut self, target: impl Into<ElementId>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn outside(mut self) -> Self {
        self.in_canvas = false;
        self
    }
}

// ============================================================================
// Gestures
// ============================================================================

/// Pointer gesture in progress between down and up
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Rubber-band selection anchored at `origin`
    BoxSelect { origin: Point2D, current: Point2D },
    /// Drag of the current selection; a press on an already-selected element
    /// defers its click until release so the whole selection can move
    DragMove {
        origin: Point2D,
        current: Point2D,
        deferred_click: Option<(ElementId, bool)>,
    },
    /// Section rectangle being drawn
    DrawSection { origin: Point2D, current: Point2D },
    Pan { last: Point2D },
}

/// Tool mode, gesture and pending placement attributes
#[derive(Debug, Clone, Default)]
pub struct ToolState {
    pub mode: ToolMode,
    pub gesture: Gesture,
    /// Attributes for the next placed element
    pub placement: PlacementConfig,
}

impl ToolState {
    /// Switch tool, abandoning any gesture in progress
    pub fn set_mode(&mut self, mode: ToolMode) {
        self.mode = mode;
        self.gesture = Gesture::Idle;
    }

    /// Pending section rectangle while drawing
    pub fn section_preview(&self) -> Option<SectionDraft> {
        match self.gesture {
            Gesture::DrawSection { origin, current } => {
                Some(SectionDraft::from_corners(origin, current))
            }
            _ => None,
        }
    }

    /// Rubber band while box-selecting
    pub fn selection_box(&self) -> Option<Rect> {
        match self.gesture {
            Gesture::BoxSelect { origin, current } => {
                Some(Rect::new(origin.x, origin.y, current.x, current.y).abs())
            }
            _ => None,
        }
    }

    /// Live offset of the selection being dragged
    pub fn drag_offset(&self) -> Option<(f64, f64)> {
        match self.gesture {
            Gesture::DragMove {
                origin, current, ..
            } => Some((current.x - origin.x, current.y - origin.y)),
            _ => None,
        }
    }
}
