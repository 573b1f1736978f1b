//! Note store: authoritative note collection with persistence.
//!
//! # Responsibility
//! - Create, update, delete, and look up notes.
//! - Persist `{"state":{"notes":[...]}}` under the notes key, with
//!   `createdAt`/`updatedAt` as ISO-8601 text.
//!
//! # Invariants
//! - Note ids are unique within the store.
//! - Reads never write; every effective mutation writes exactly once.
//! - Unknown ids make `update`/`delete` silent no-ops.

use crate::config::StorageKeys;
use crate::model::category::Category;
use crate::model::note::{NewNote, Note, NoteUpdate, Position};
use crate::model::timestamp::{Clock, SystemClock};
use crate::storage::KeyValueStorage;
use crate::store::observer::{Observers, SubscriptionId};
use crate::store::{load_document, save_document, StoreResult};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

const MODULE: &str = "note_store";

#[derive(Deserialize)]
struct NotesState {
    #[serde(default)]
    notes: Vec<Note>,
}

#[derive(Serialize)]
struct NotesStateRef<'a> {
    notes: &'a [Note],
}

pub struct NoteStore<S: KeyValueStorage> {
    storage: S,
    key: String,
    clock: Box<dyn Clock>,
    notes: Vec<Note>,
    observers: Observers<Note>,
}

impl<S: KeyValueStorage> NoteStore<S> {
    /// Loads the persisted collection, or starts empty.
    pub fn load(storage: S, keys: &StorageKeys) -> Self {
        Self::load_with_clock(storage, keys, Box::new(SystemClock))
    }

    /// Same as [`NoteStore::load`] with a caller-provided time source.
    pub fn load_with_clock(storage: S, keys: &StorageKeys, clock: Box<dyn Clock>) -> Self {
        let key = keys.notes.clone();
        let notes = load_document::<_, NotesState>(&storage, &key, MODULE)
            .map(|state| dedupe_by_id(state.notes))
            .unwrap_or_default();
        info!(
            "event=store_load module={MODULE} status=ok key={key} count={}",
            notes.len()
        );

        Self {
            storage,
            key,
            clock,
            notes,
            observers: Observers::default(),
        }
    }

    /// Current collection in insertion order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Creates a note with a fresh id and creation defaults applied.
    pub fn create(&mut self, input: NewNote) -> StoreResult<Note> {
        let id = self.fresh_id();
        let note = Note::create(id, input, self.clock.now());

        self.notes.push(note.clone());
        if let Err(err) = self.persist() {
            self.notes.pop();
            error!("event=note_create module={MODULE} status=error error={err}");
            return Err(err);
        }

        info!(
            "event=note_create module={MODULE} status=ok note_id={} count={}",
            note.id,
            self.notes.len()
        );
        self.observers.notify(&self.notes);
        Ok(note)
    }

    /// Merges `update` into the matching note.
    ///
    /// Returns `Ok(None)` without writing when the id is unknown.
    pub fn update(&mut self, update: &NoteUpdate) -> StoreResult<Option<Note>> {
        let Some(index) = self.index_of(&update.id) else {
            debug!(
                "event=note_update module={MODULE} status=skipped reason=not_found note_id={}",
                update.id
            );
            return Ok(None);
        };

        let previous = self.notes[index].clone();
        let now = self.clock.now();
        self.notes[index].apply(update, now);
        if let Err(err) = self.persist() {
            self.notes[index] = previous;
            error!(
                "event=note_update module={MODULE} status=error note_id={} error={err}",
                update.id
            );
            return Err(err);
        }

        info!(
            "event=note_update module={MODULE} status=ok note_id={} style_patch={}",
            update.id,
            update.style.is_some()
        );
        let updated = self.notes[index].clone();
        self.observers.notify(&self.notes);
        Ok(Some(updated))
    }

    /// Drag-release: stores the final canvas position.
    pub fn move_to(&mut self, id: &str, position: Position) -> StoreResult<Option<Note>> {
        self.update(&NoteUpdate {
            position: Some(position),
            ..NoteUpdate::new(id)
        })
    }

    /// Points the note at `category` and syncs its color to the category's.
    pub fn assign_category(&mut self, id: &str, category: &Category) -> StoreResult<Option<Note>> {
        self.update(&NoteUpdate {
            category_id: Some(Some(category.id.clone())),
            color: Some(category.color.clone()),
            ..NoteUpdate::new(id)
        })
    }

    /// Removes the matching note. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> StoreResult<bool> {
        let Some(index) = self.index_of(id) else {
            debug!("event=note_delete module={MODULE} status=skipped reason=not_found note_id={id}");
            return Ok(false);
        };

        let removed = self.notes.remove(index);
        if let Err(err) = self.persist() {
            self.notes.insert(index, removed);
            error!("event=note_delete module={MODULE} status=error note_id={id} error={err}");
            return Err(err);
        }

        info!(
            "event=note_delete module={MODULE} status=ok note_id={id} count={}",
            self.notes.len()
        );
        self.observers.notify(&self.notes);
        Ok(true)
    }

    /// Registers a listener called with the collection after each mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&[Note]) + 'static,
    {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    fn fresh_id(&self) -> String {
        loop {
            let candidate = Uuid::new_v4().to_string();
            if self.index_of(&candidate).is_none() {
                return candidate;
            }
        }
    }

    fn persist(&self) -> StoreResult<()> {
        save_document(
            &self.storage,
            &self.key,
            NotesStateRef { notes: &self.notes },
            None,
        )
    }
}

fn dedupe_by_id(notes: Vec<Note>) -> Vec<Note> {
    let total = notes.len();
    let mut seen = HashSet::new();
    let unique: Vec<Note> = notes
        .into_iter()
        .filter(|note| seen.insert(note.id.clone()))
        .collect();
    if unique.len() != total {
        warn!(
            "event=store_load module={MODULE} status=repaired dropped_duplicates={}",
            total - unique.len()
        );
    }
    unique
}
