//! Иерархическое представление сцены для передачи во внешнее хранилище/печать

use serde::{Deserialize, Serialize};

use crate::{Element, Section};

/// Стол вместе со своими стульями
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedTable {
    pub table: Element,
    pub chairs: Vec<Element>,
}

/// Секция вместе с границей и стульями
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedSection {
    pub section: Section,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary: Option<Element>,
    pub chairs: Vec<Element>,
}

/// Сгруппированная сцена: столы и секции с вложенными стульями, остальное плоско
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExportedLayout {
    pub tables: Vec<ExportedTable>,
    pub sections: Vec<ExportedSection>,
    pub elements: Vec<Element>,
}

impl ExportedLayout {
    /// Общее количество мест
    pub fn seat_count(&self) -> usize {
        self.tables.iter().map(|t| t.chairs.len()).sum::<usize>()
            + self.sections.iter().map(|s| s.chairs.len()).sum::<usize>()
    }
}
