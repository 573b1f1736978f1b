//! Explicitly constructed application state container.
//!
//! # Responsibility
//! - Build both stores over one shared storage handle at launch.
//! - Resolve the startup theme and persist theme toggles.
//! - Host the few operations that read one store and write the other.
//!
//! # Invariants
//! - The container is the only owner of the stores; callers hold `&`/`&mut`
//!   borrows passed down from wherever the container lives.

use crate::config::StorageKeys;
use crate::model::note::Note;
use crate::model::timestamp::{Clock, SystemClock};
use crate::query::{filter_by_category, resolve_category, NoteCategory};
use crate::storage::{KeyValueStorage, StorageResult};
use crate::store::category_store::CategoryStore;
use crate::store::note_store::NoteStore;
use crate::store::StoreResult;
use crate::theme::{load_theme, save_theme, Theme};
use log::info;
use std::rc::Rc;

pub struct NotesApp<S: KeyValueStorage> {
    storage: Rc<S>,
    keys: StorageKeys,
    notes: NoteStore<Rc<S>>,
    categories: CategoryStore<Rc<S>>,
    theme: Theme,
}

impl<S: KeyValueStorage> NotesApp<S> {
    /// Loads both stores and the theme from `storage`.
    pub fn open(storage: S, keys: StorageKeys, system_prefers_dark: bool) -> Self {
        Self::open_with_clock(storage, keys, system_prefers_dark, Box::new(SystemClock))
    }

    pub fn open_with_clock(
        storage: S,
        keys: StorageKeys,
        system_prefers_dark: bool,
        clock: Box<dyn Clock>,
    ) -> Self {
        let storage = Rc::new(storage);
        let notes = NoteStore::load_with_clock(Rc::clone(&storage), &keys, clock);
        let categories = CategoryStore::load(Rc::clone(&storage), &keys);
        let theme = load_theme(storage.as_ref(), &keys.theme, system_prefers_dark);
        info!(
            "event=app_open module=app status=ok notes={} categories={} theme={}",
            notes.len(),
            categories.len(),
            theme.as_str()
        );

        Self {
            storage,
            keys,
            notes,
            categories,
            theme,
        }
    }

    pub fn notes(&self) -> &NoteStore<Rc<S>> {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut NoteStore<Rc<S>> {
        &mut self.notes
    }

    pub fn categories(&self) -> &CategoryStore<Rc<S>> {
        &self.categories
    }

    pub fn categories_mut(&mut self) -> &mut CategoryStore<Rc<S>> {
        &mut self.categories
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flips light/dark and persists the new preference.
    pub fn toggle_theme(&mut self) -> StorageResult<Theme> {
        let next = self.theme.toggled();
        save_theme(self.storage.as_ref(), &self.keys.theme, next)?;
        self.theme = next;
        Ok(next)
    }

    /// Assigns a note to a category by id, syncing the note color.
    ///
    /// Returns `Ok(None)` when either id is unknown; nothing is written then.
    pub fn assign_category(&mut self, note_id: &str, category_id: &str) -> StoreResult<Option<Note>> {
        let Some(category) = self.categories.get_by_id(category_id) else {
            return Ok(None);
        };
        self.notes.assign_category(note_id, category)
    }

    /// Resolves the soft category reference of one note.
    pub fn note_category<'a>(&'a self, note: &'a Note) -> NoteCategory<'a> {
        resolve_category(note, self.categories.categories())
    }

    /// Notes visible under the header's category filter.
    pub fn visible_notes(&self, category_filter: Option<&str>) -> Vec<&Note> {
        filter_by_category(self.notes.notes(), category_filter)
    }
}
