//! Category domain model and seed set.

use serde::{Deserialize, Serialize};

/// Category identifier. Seeds use short numeric ids, new ones UUID text.
pub type CategoryId = String;

/// Named, colored tag a note may reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub color: String,
}

/// Creation input for a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Partial update addressed by category id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryUpdate {
    pub id: CategoryId,
    pub name: Option<String>,
    pub color: Option<String>,
}

impl CategoryUpdate {
    pub fn new(id: impl Into<CategoryId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

impl Category {
    pub fn create(id: CategoryId, input: NewCategory) -> Self {
        Self {
            id,
            name: input.name,
            color: input.color,
        }
    }

    pub fn apply(&mut self, update: &CategoryUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(color) = &update.color {
            self.color = color.clone();
        }
    }
}

const SEED_CATEGORIES: [(&str, &str, &str); 4] = [
    ("1", "Trabalho", "#fef3c7"),
    ("2", "Pessoal", "#dbeafe"),
    ("3", "Ideias", "#dcfce7"),
    ("4", "Importante", "#fee2e2"),
];

/// The four categories a fresh install starts with.
pub fn default_categories() -> Vec<Category> {
    SEED_CATEGORIES
        .iter()
        .map(|(id, name, color)| Category {
            id: (*id).to_string(),
            name: (*name).to_string(),
            color: (*color).to_string(),
        })
        .collect()
}
