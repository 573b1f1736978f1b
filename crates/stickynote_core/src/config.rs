//! Storage key configuration.
//!
//! # Responsibility
//! - Name the storage keys each persisted document lives under.
//!
//! # Invariants
//! - Defaults match the keys written by earlier app versions, so existing
//!   snapshots keep loading.

/// Key holding the notes document.
pub const NOTES_STORAGE_KEY: &str = "notes-storage";
/// Key holding the categories document.
pub const CATEGORIES_STORAGE_KEY: &str = "categories-storage";
/// Key holding the raw `light|dark` theme preference.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Storage key set shared by stores and theme helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub notes: String,
    pub categories: String,
    pub theme: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            notes: NOTES_STORAGE_KEY.to_string(),
            categories: CATEGORIES_STORAGE_KEY.to_string(),
            theme: THEME_STORAGE_KEY.to_string(),
        }
    }
}

impl StorageKeys {
    /// Prefixes every key, letting several profiles share one storage.
    pub fn with_prefix(prefix: &str) -> Self {
        let base = Self::default();
        Self {
            notes: format!("{prefix}{}", base.notes),
            categories: format!("{prefix}{}", base.categories),
            theme: format!("{prefix}{}", base.theme),
        }
    }
}
