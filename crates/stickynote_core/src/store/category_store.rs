//! Category store: category list with seed defaults and persistence.
//!
//! # Invariants
//! - Category ids are unique within the store.
//! - Absent or unreadable document → the four seed categories.
//! - Deleting a category never touches notes referencing it.

use crate::config::StorageKeys;
use crate::model::category::{default_categories, Category, CategoryUpdate, NewCategory};
use crate::storage::KeyValueStorage;
use crate::store::observer::{Observers, SubscriptionId};
use crate::store::{load_document, save_document, StoreResult};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const MODULE: &str = "category_store";
const DOCUMENT_VERSION: u32 = 0;

#[derive(Deserialize)]
struct CategoriesState {
    #[serde(default)]
    categories: Vec<Category>,
}

#[derive(Serialize)]
struct CategoriesStateRef<'a> {
    categories: &'a [Category],
}

pub struct CategoryStore<S: KeyValueStorage> {
    storage: S,
    key: String,
    categories: Vec<Category>,
    observers: Observers<Category>,
}

impl<S: KeyValueStorage> CategoryStore<S> {
    /// Loads the persisted list, or seeds the default categories.
    pub fn load(storage: S, keys: &StorageKeys) -> Self {
        let key = keys.categories.clone();
        let (categories, source) = match load_document::<_, CategoriesState>(&storage, &key, MODULE)
        {
            Some(state) => (dedupe_by_id(state.categories), "persisted"),
            None => (default_categories(), "seed"),
        };
        info!(
            "event=store_load module={MODULE} status=ok key={key} source={source} count={}",
            categories.len()
        );

        Self {
            storage,
            key,
            categories,
            observers: Observers::default(),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn create(&mut self, input: NewCategory) -> StoreResult<Category> {
        let category = Category::create(self.fresh_id(), input);

        self.categories.push(category.clone());
        if let Err(err) = self.persist() {
            self.categories.pop();
            error!("event=category_create module={MODULE} status=error error={err}");
            return Err(err);
        }

        info!(
            "event=category_create module={MODULE} status=ok category_id={}",
            category.id
        );
        self.observers.notify(&self.categories);
        Ok(category)
    }

    /// Merges `update`; unknown ids return `Ok(None)` without writing.
    pub fn update(&mut self, update: &CategoryUpdate) -> StoreResult<Option<Category>> {
        let Some(index) = self.index_of(&update.id) else {
            debug!(
                "event=category_update module={MODULE} status=skipped reason=not_found category_id={}",
                update.id
            );
            return Ok(None);
        };

        let previous = self.categories[index].clone();
        self.categories[index].apply(update);
        if let Err(err) = self.persist() {
            self.categories[index] = previous;
            error!(
                "event=category_update module={MODULE} status=error category_id={} error={err}",
                update.id
            );
            return Err(err);
        }

        info!(
            "event=category_update module={MODULE} status=ok category_id={}",
            update.id
        );
        let updated = self.categories[index].clone();
        self.observers.notify(&self.categories);
        Ok(Some(updated))
    }

    /// Removes the category. Notes pointing at it keep a dangling id.
    pub fn delete(&mut self, id: &str) -> StoreResult<bool> {
        let Some(index) = self.index_of(id) else {
            debug!(
                "event=category_delete module={MODULE} status=skipped reason=not_found category_id={id}"
            );
            return Ok(false);
        };

        let removed = self.categories.remove(index);
        if let Err(err) = self.persist() {
            self.categories.insert(index, removed);
            error!("event=category_delete module={MODULE} status=error category_id={id} error={err}");
            return Err(err);
        }

        info!("event=category_delete module={MODULE} status=ok category_id={id}");
        self.observers.notify(&self.categories);
        Ok(true)
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&[Category]) + 'static,
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
        self.categories.iter().position(|category| category.id == id)
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
            CategoriesStateRef {
                categories: &self.categories,
            },
            Some(DOCUMENT_VERSION),
        )
    }
}

fn dedupe_by_id(categories: Vec<Category>) -> Vec<Category> {
    let mut unique: Vec<Category> = Vec::with_capacity(categories.len());
    for category in categories {
        if unique.iter().all(|existing| existing.id != category.id) {
            unique.push(category);
        }
    }
    unique
}
