//! Core domain logic for StickyNote.
//! This crate is the single source of truth for note/category invariants.

pub mod app;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod storage;
pub mod store;
pub mod theme;

pub use app::NotesApp;
pub use config::StorageKeys;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{default_categories, Category, CategoryId, CategoryUpdate, NewCategory};
pub use model::note::{
    FontStyle, FontWeight, NewNote, Note, NoteId, NoteStyle, NoteStylePatch, NoteUpdate, Position,
};
pub use model::timestamp::{Clock, SystemClock};
pub use query::{filter_by_category, resolve_category, NoteCategory};
pub use storage::memory::MemoryStorage;
pub use storage::sqlite::SqliteStorage;
pub use storage::{KeyValueStorage, StorageError, StorageResult};
pub use store::category_store::CategoryStore;
pub use store::note_store::NoteStore;
pub use store::observer::SubscriptionId;
pub use store::{StoreError, StoreResult};
pub use theme::{load_theme, save_theme, Theme};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
