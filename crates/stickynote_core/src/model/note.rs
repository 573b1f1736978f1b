//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note shape (camelCase wire names).
//! - Apply creation defaults and partial-update merge rules.
//!
//! # Invariants
//! - `id` never changes after creation.
//! - `updated_at >= created_at`.
//! - Style updates merge field-by-field; absent fields keep their value.

use crate::model::category::CategoryId;
use crate::model::timestamp::iso8601;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable note identifier (UUID v4 text for generated notes).
pub type NoteId = String;

/// Title given to notes created without one.
pub const UNTITLED: &str = "Untitled";

pub const DEFAULT_BACKGROUND_COLOR: &str = "#fef3c7";
pub const DEFAULT_TEXT_COLOR: &str = "#1f2937";
pub const DEFAULT_FONT_SIZE: &str = "1rem";

/// Canvas coordinate of a note's top-left corner. The canvas is unbounded,
/// but coordinates stay finite: JSON has no encoding for NaN or infinity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Replaces NaN/infinite coordinates with `0.0`.
    pub fn finite(self) -> Self {
        let clamp = |value: f64| if value.is_finite() { value } else { 0.0 };
        Self {
            x: clamp(self.x),
            y: clamp(self.y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Display attributes of a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoteStyle {
    pub background_color: String,
    pub text_color: String,
    pub font_size: String,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
}

impl Default for NoteStyle {
    fn default() -> Self {
        Self {
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            font_size: DEFAULT_FONT_SIZE.to_string(),
            font_weight: FontWeight::Normal,
            font_style: FontStyle::Normal,
        }
    }
}

impl NoteStyle {
    /// Overwrites only the fields present in `patch`.
    pub fn apply(&mut self, patch: &NoteStylePatch) {
        if let Some(value) = &patch.background_color {
            self.background_color = value.clone();
        }
        if let Some(value) = &patch.text_color {
            self.text_color = value.clone();
        }
        if let Some(value) = &patch.font_size {
            self.font_size = value.clone();
        }
        if let Some(value) = patch.font_weight {
            self.font_weight = value;
        }
        if let Some(value) = patch.font_style {
            self.font_style = value;
        }
    }

    /// Returns a copy of `self` with `patch` layered on top.
    pub fn merged(mut self, patch: &NoteStylePatch) -> Self {
        self.apply(patch);
        self
    }
}

/// Partial style used by create overrides and updates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteStylePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
}

impl NoteStylePatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A sticky note as stored and rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub position: Position,
    pub color: String,
    /// Soft reference; deleting the category leaves this dangling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub style: NoteStyle,
    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso8601")]
    pub updated_at: DateTime<Utc>,
}

/// Creation input: every note field except id and timestamps.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewNote {
    pub title: Option<String>,
    pub content: String,
    pub position: Option<Position>,
    pub color: Option<String>,
    pub category_id: Option<CategoryId>,
    pub style: NoteStylePatch,
}

impl NewNote {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }
}

/// Partial update addressed by note id.
///
/// `category_id: Some(None)` clears the reference; `None` leaves it as is.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NoteUpdate {
    pub id: NoteId,
    pub title: Option<String>,
    pub content: Option<String>,
    pub position: Option<Position>,
    pub color: Option<String>,
    pub category_id: Option<Option<CategoryId>>,
    pub style: Option<NoteStylePatch>,
}

impl NoteUpdate {
    pub fn new(id: impl Into<NoteId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

impl Note {
    /// Builds a note from creation input, applying per-field defaults.
    ///
    /// # Invariants
    /// - Blank or absent title becomes `"Untitled"`.
    /// - Blank or absent color falls back to the default background.
    /// - `created_at == updated_at == now`.
    pub fn create(id: NoteId, input: NewNote, now: DateTime<Utc>) -> Self {
        let default_style = NoteStyle::default();
        let color = non_blank(input.color)
            .unwrap_or_else(|| default_style.background_color.clone());
        let title = non_blank(input.title).unwrap_or_else(|| UNTITLED.to_string());

        Self {
            id,
            title: Some(title),
            content: input.content,
            position: input.position.unwrap_or_default().finite(),
            color,
            category_id: input.category_id,
            style: default_style.merged(&input.style),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges `update` into this note and refreshes `updated_at`.
    ///
    /// `update.id` is not consulted; callers match ids beforehand.
    pub fn apply(&mut self, update: &NoteUpdate, now: DateTime<Utc>) {
        if let Some(title) = &update.title {
            self.title = Some(title.clone());
        }
        if let Some(content) = &update.content {
            self.content = content.clone();
        }
        if let Some(position) = update.position {
            self.position = position.finite();
        }
        if let Some(color) = &update.color {
            self.color = color.clone();
        }
        if let Some(category_id) = &update.category_id {
            self.category_id = category_id.clone();
        }
        if let Some(style) = &update.style {
            self.style.apply(style);
        }
        self.updated_at = now.max(self.created_at);
    }

    /// Title for display, falling back to `"Untitled"`.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or(UNTITLED)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
