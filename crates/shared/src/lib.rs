use serde::{Deserialize, Serialize};

mod export;

pub use export::{ExportedLayout, ExportedSection, ExportedTable};

/// Уникальный идентификатор элемента сцены
pub type ElementId = String;

/// Уникальный идентификатор секции
pub type SectionId = String;

/// ID элемента-границы, принадлежащего секции
pub fn boundary_id(section_id: &str) -> ElementId {
    format!("boundary-{section_id}")
}

/// 2D-точка на холсте (пиксели)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Сдвинуть точку на вектор
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Тип элемента (тег варианта)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Chair,
    Table,
    Stage,
    Floor,
    Entrance,
    Exit,
    SectionBoundary,
    Text,
}

impl ElementType {
    /// Префикс для генерации ID
    pub fn id_prefix(&self) -> &'static str {
        match self {
            ElementType::Chair => "chair",
            ElementType::Table => "table",
            ElementType::Stage => "stage",
            ElementType::Floor => "floor",
            ElementType::Entrance => "entrance",
            ElementType::Exit => "exit",
            ElementType::SectionBoundary => "boundary",
            ElementType::Text => "text",
        }
    }
}

/// Форма стола или сцены вместе с размерами, которые ей нужны
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ShapeGeometry {
    Rect {
        width: f64,
        height: f64,
    },
    Circle {
        radius: f64,
    },
    Polygon {
        radius: f64,
        sides: u32,
    },
    Star {
        radius: f64,
        inner_radius: f64,
        points: u32,
    },
    Ring {
        outer_radius: f64,
        inner_radius: f64,
    },
    Wedge {
        radius: f64,
        /// Угол сектора в градусах
        angle: f64,
    },
    Arc {
        outer_radius: f64,
        inner_radius: f64,
        /// Угол дуги в градусах
        angle: f64,
    },
}

impl ShapeGeometry {
    /// Название формы (для логов и панели свойств)
    pub fn name(&self) -> &'static str {
        match self {
            ShapeGeometry::Rect { .. } => "rect",
            ShapeGeometry::Circle { .. } => "circle",
            ShapeGeometry::Polygon { .. } => "polygon",
            ShapeGeometry::Star { .. } => "star",
            ShapeGeometry::Ring { .. } => "ring",
            ShapeGeometry::Wedge { .. } => "wedge",
            ShapeGeometry::Arc { .. } => "arc",
        }
    }
}

/// Владелец стула: ровно один, секция или стол
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "parent", rename_all = "snake_case")]
pub enum ChairParent {
    Section {
        section_id: SectionId,
        /// Индекс ряда
        row: u32,
        /// Индекс колонки
        col: u32,
    },
    Table {
        table_id: ElementId,
    },
}

impl ChairParent {
    /// ID владельца (секции или стола)
    pub fn parent_id(&self) -> &str {
        match self {
            ChairParent::Section { section_id, .. } => section_id,
            ChairParent::Table { table_id } => table_id,
        }
    }

    pub fn section_id(&self) -> Option<&SectionId> {
        match self {
            ChairParent::Section { section_id, .. } => Some(section_id),
            ChairParent::Table { .. } => None,
        }
    }

    pub fn table_id(&self) -> Option<&ElementId> {
        match self {
            ChairParent::Section { .. } => None,
            ChairParent::Table { table_id } => Some(table_id),
        }
    }

    /// Позиция (ряд, колонка) для стульев секции
    pub fn grid_index(&self) -> Option<(u32, u32)> {
        match self {
            ChairParent::Section { row, col, .. } => Some((*row, *col)),
            ChairParent::Table { .. } => None,
        }
    }
}

fn default_scale() -> f64 {
    1.0
}

fn default_font_size() -> f64 {
    16.0
}

/// Атрибуты, специфичные для типа элемента
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    /// Стул, атомарное место
    Chair {
        #[serde(flatten)]
        parent: ChairParent,
        /// Номер места (последовательный внутри владельца)
        seat_number: u32,
        #[serde(default)]
        is_reserved: bool,
        /// Пользовательская пиктограмма
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
    },
    /// Стол, который может владеть стульями по периметру
    Table {
        #[serde(flatten)]
        shape: ShapeGeometry,
        chair_count: u32,
        chair_spacing: f64,
        /// ID стульев стола
        #[serde(default)]
        chair_ids: Vec<ElementId>,
        #[serde(default)]
        label: String,
    },
    Stage {
        #[serde(flatten)]
        shape: ShapeGeometry,
        #[serde(default)]
        label: String,
    },
    /// Отрезок пола (смещения концов от центра)
    Floor {
        start: Point2D,
        end: Point2D,
        #[serde(default)]
        label: String,
    },
    /// Вход: пиктограмма с накопленным масштабом
    Entrance {
        #[serde(default = "default_scale")]
        scale_x: f64,
        #[serde(default = "default_scale")]
        scale_y: f64,
    },
    /// Выход: пиктограмма с накопленным масштабом
    Exit {
        #[serde(default = "default_scale")]
        scale_x: f64,
        #[serde(default = "default_scale")]
        scale_y: f64,
    },
    /// Граница секции: прямоугольник-представитель секции на холсте
    SectionBoundary {
        section_id: SectionId,
        width: f64,
        height: f64,
    },
    Text {
        text: String,
        #[serde(default = "default_font_size")]
        font_size: f64,
    },
}

/// Элемент сцены
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    /// Центр вращения фигуры
    pub position: Point2D,
    /// Поворот в градусах
    #[serde(default)]
    pub rotation: f64,
    pub fill: String,
    pub stroke: String,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    /// Тег варианта
    pub fn element_type(&self) -> ElementType {
        match &self.kind {
            ElementKind::Chair { .. } => ElementType::Chair,
            ElementKind::Table { .. } => ElementType::Table,
            ElementKind::Stage { .. } => ElementType::Stage,
            ElementKind::Floor { .. } => ElementType::Floor,
            ElementKind::Entrance { .. } => ElementType::Entrance,
            ElementKind::Exit { .. } => ElementType::Exit,
            ElementKind::SectionBoundary { .. } => ElementType::SectionBoundary,
            ElementKind::Text { .. } => ElementType::Text,
        }
    }

    pub fn is_chair(&self) -> bool {
        matches!(self.kind, ElementKind::Chair { .. })
    }

    pub fn is_table(&self) -> bool {
        matches!(self.kind, ElementKind::Table { .. })
    }

    /// Владелец стула (None для остальных типов)
    pub fn chair_parent(&self) -> Option<&ChairParent> {
        match &self.kind {
            ElementKind::Chair { parent, .. } => Some(parent),
            _ => None,
        }
    }

    /// Секция, которую представляет граница
    pub fn boundary_section(&self) -> Option<&SectionId> {
        match &self.kind {
            ElementKind::SectionBoundary { section_id, .. } => Some(section_id),
            _ => None,
        }
    }

    /// Стулья, принадлежащие столу (пусто для остальных типов)
    pub fn table_chair_ids(&self) -> &[ElementId] {
        match &self.kind {
            ElementKind::Table { chair_ids, .. } => chair_ids,
            _ => &[],
        }
    }

    /// Номер места стула
    pub fn seat_number(&self) -> Option<u32> {
        match &self.kind {
            ElementKind::Chair { seat_number, .. } => Some(*seat_number),
            _ => None,
        }
    }

    /// Сдвинуть элемент
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.position = self.position.offset(dx, dy);
    }
}

fn default_section_fill() -> String {
    "#e0e7ff".to_string()
}

fn default_section_stroke() -> String {
    "#4f46e5".to_string()
}

/// Секция: логический блок мест рядами и колонками
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    #[serde(default)]
    pub label: String,
    /// Левый верхний угол
    pub position: Point2D,
    pub rows: u32,
    pub cols: u32,
    pub row_spacing: f64,
    pub col_spacing: f64,
    /// Изгиб рядов, 0–100
    #[serde(default)]
    pub curve: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_section_fill")]
    pub fill: String,
    #[serde(default = "default_section_stroke")]
    pub stroke: String,
    /// Производная ширина (см. section_bounding_size)
    pub width: f64,
    /// Производная высота
    pub height: f64,
}

/// Сцена: упорядоченный список элементов (порядок = z-order) и секции
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scene {
    pub elements: Vec<Element>,
    pub sections: Vec<Section>,
}

impl Scene {
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn section_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.iter().any(|e| e.id == id)
    }

    /// Стулья секции в порядке z-order
    pub fn section_chairs<'a>(&'a self, section_id: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements.iter().filter(move |e| {
            e.chair_parent()
                .and_then(|p| p.section_id())
                .is_some_and(|s| s == section_id)
        })
    }

    /// Стулья стола в порядке z-order
    pub fn table_chairs<'a>(&'a self, table_id: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements.iter().filter(move |e| {
            e.chair_parent()
                .and_then(|p| p.table_id())
                .is_some_and(|t| t == table_id)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chair(id: &str, parent: ChairParent, seat: u32) -> Element {
        Element {
            id: id.to_string(),
            position: Point2D::new(0.0, 0.0),
            rotation: 0.0,
            fill: "#fff".to_string(),
            stroke: "#000".to_string(),
            kind: ElementKind::Chair {
                parent,
                seat_number: seat,
                is_reserved: false,
                icon: None,
            },
        }
    }

    #[test]
    fn test_boundary_id_format() {
        assert_eq!(boundary_id("section-1"), "boundary-section-1");
    }

    #[test]
    fn test_element_type_tag_serde() {
        let table = Element {
            id: "t1".to_string(),
            position: Point2D::new(10.0, 20.0),
            rotation: 0.0,
            fill: "#fff".to_string(),
            stroke: "#000".to_string(),
            kind: ElementKind::Table {
                shape: ShapeGeometry::Circle { radius: 40.0 },
                chair_count: 4,
                chair_spacing: 10.0,
                chair_ids: vec![],
                label: String::new(),
            },
        };
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["type"], "table");
        assert_eq!(json["shape"], "circle");
        assert_eq!(json["radius"], 40.0);

        let back: Element = serde_json::from_value(json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_chair_parent_flattened() {
        let c = chair(
            "c1",
            ChairParent::Section {
                section_id: "s1".to_string(),
                row: 1,
                col: 2,
            },
            6,
        );
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["parent"], "section");
        assert_eq!(json["section_id"], "s1");
        assert_eq!(json["row"], 1);
        let back: Element = serde_json::from_value(json).unwrap();
        assert_eq!(back.chair_parent().unwrap().grid_index(), Some((1, 2)));
    }

    #[test]
    fn test_deserialize_entrance_defaults_scale() {
        let json = r##"{"id": "e1", "position": {"x": 0, "y": 0},
            "fill": "#0f0", "stroke": "#000", "type": "entrance"}"##;
        let e: Element = serde_json::from_str(json).unwrap();
        assert_eq!(
            e.kind,
            ElementKind::Entrance {
                scale_x: 1.0,
                scale_y: 1.0
            }
        );
    }

    #[test]
    fn test_scene_chair_lookups() {
        let scene = Scene {
            elements: vec![
                chair(
                    "a",
                    ChairParent::Section {
                        section_id: "s1".to_string(),
                        row: 0,
                        col: 0,
                    },
                    1,
                ),
                chair(
                    "b",
                    ChairParent::Table {
                        table_id: "t1".to_string(),
                    },
                    1,
                ),
            ],
            sections: vec![],
        };
        assert_eq!(scene.section_chairs("s1").count(), 1);
        assert_eq!(scene.table_chairs("t1").count(), 1);
        assert_eq!(scene.table_chairs("s1").count(), 0);
        assert!(scene.contains("b"));
        assert!(scene.element("zzz").is_none());
    }
}
