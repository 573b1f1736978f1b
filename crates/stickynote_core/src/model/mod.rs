//! Domain model for notes and categories.
//!
//! # Responsibility
//! - Define the records stores own and persist.
//! - Keep create/merge rules next to the data they shape.
//!
//! # Invariants
//! - Every note and category is identified by a unique string id.
//! - A note's `category_id` is a soft reference; it may name a category
//!   that no longer exists.

pub mod category;
pub mod note;
pub mod timestamp;
