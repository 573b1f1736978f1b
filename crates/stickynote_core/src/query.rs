//! Read-only queries over store snapshots.
//!
//! # Invariants
//! - Nothing here mutates a store.
//! - A dangling `category_id` is reported, never silently dropped.

use crate::model::category::Category;
use crate::model::note::Note;

/// Outcome of following a note's soft category reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteCategory<'a> {
    /// Reference resolves to an existing category.
    Assigned(&'a Category),
    /// Note carries no reference.
    Uncategorized,
    /// Reference names a category that no longer exists.
    Missing(&'a str),
}

impl<'a> NoteCategory<'a> {
    pub fn category(self) -> Option<&'a Category> {
        match self {
            Self::Assigned(category) => Some(category),
            Self::Uncategorized | Self::Missing(_) => None,
        }
    }
}

pub fn resolve_category<'a>(note: &'a Note, categories: &'a [Category]) -> NoteCategory<'a> {
    match note.category_id.as_deref() {
        None => NoteCategory::Uncategorized,
        Some(id) => categories
            .iter()
            .find(|category| category.id == id)
            .map_or(NoteCategory::Missing(id), NoteCategory::Assigned),
    }
}

/// `None` keeps every note; `Some(id)` keeps notes referencing `id`.
pub fn filter_by_category<'a>(notes: &'a [Note], category_id: Option<&str>) -> Vec<&'a Note> {
    match category_id {
        None => notes.iter().collect(),
        Some(id) => notes
            .iter()
            .filter(|note| note.category_id.as_deref() == Some(id))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::{filter_by_category, resolve_category, NoteCategory};
    use crate::model::category::default_categories;
    use crate::model::note::{NewNote, Note};
    use chrono::{TimeZone, Utc};

    fn note(id: &str, category_id: Option<&str>) -> Note {
        let input = NewNote {
            category_id: category_id.map(str::to_string),
            ..NewNote::new(id)
        };
        Note::create(
            id.to_string(),
            input,
            Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn resolve_reports_assigned_uncategorized_and_missing() {
        let categories = default_categories();
        let assigned = note("a", Some("3"));
        let loose = note("b", None);
        let dangling = note("c", Some("gone"));

        assert_eq!(
            resolve_category(&assigned, &categories).category().map(|c| c.name.as_str()),
            Some("Ideias")
        );
        assert_eq!(resolve_category(&loose, &categories), NoteCategory::Uncategorized);
        assert_eq!(resolve_category(&dangling, &categories), NoteCategory::Missing("gone"));
    }

    #[test]
    fn filter_keeps_matching_notes_in_order() {
        let notes = vec![note("a", Some("1")), note("b", None), note("c", Some("1"))];

        let ids = |selected: Vec<&Note>| {
            selected
                .into_iter()
                .map(|note| note.id.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(filter_by_category(&notes, None)), vec!["a", "b", "c"]);
        assert_eq!(ids(filter_by_category(&notes, Some("1"))), vec!["a", "c"]);
        assert!(filter_by_category(&notes, Some("2")).is_empty());
    }
}
