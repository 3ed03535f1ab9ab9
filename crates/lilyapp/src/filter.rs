//! Collection filtering.
//!
//! The displayed list is the full collection reduced by three independent
//! predicates, combined with AND:
//!
//! 1. **Category**: [`Selection::Any`] or exact equality.
//! 2. **Rating**: [`Selection::Any`] or exact equality.
//! 3. **Search**: empty text matches everything; otherwise the lower-cased text
//!    must be a substring of the title, the author, the note (when present) or
//!    any tag.
//!
//! Filtering is pure: it borrows the collection, never reorders it, and returns
//! a fresh vector of references in input order.

use crate::model::{Category, Entry, Rating};

/// A filter slot that is either open or pinned to one value.
///
/// Stands in for an "ALL" pseudo-value so no real category or rating can ever
/// be confused with the absence of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Selection<T> {
    #[default]
    Any,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selection::Any => true,
            Selection::Only(wanted) => wanted == value,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Selection::Any)
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Selection::Only(v),
            None => Selection::Any,
        }
    }
}

/// The active category/rating/search selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub category: Selection<Category>,
    pub rating: Selection<Rating>,
    pub search: String,
}

impl FilterCriteria {
    pub fn new(
        category: Selection<Category>,
        rating: Selection<Rating>,
        search: impl Into<String>,
    ) -> Self {
        Self {
            category,
            rating,
            search: search.into(),
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Selection::Only(category);
        self
    }

    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = Selection::Only(rating);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// True when no predicate narrows the collection.
    pub fn is_unfiltered(&self) -> bool {
        self.category.is_any() && self.rating.is_any() && self.search.is_empty()
    }

    /// Checks a single entry against all three predicates.
    pub fn matches(&self, entry: &Entry) -> bool {
        self.matches_with(entry, &self.search.to_lowercase())
    }

    /// `needle` is the search text, already lower-cased.
    fn matches_with(&self, entry: &Entry, needle: &str) -> bool {
        self.category.admits(&entry.category)
            && self.rating.admits(&entry.rating)
            && matches_search(entry, needle)
    }
}

/// Returns the entries matching `criteria`, in their original order.
pub fn filter<'a>(entries: &'a [Entry], criteria: &FilterCriteria) -> Vec<&'a Entry> {
    let needle = criteria.search.to_lowercase();
    entries
        .iter()
        .filter(|entry| criteria.matches_with(entry, &needle))
        .collect()
}

/// `needle` must already be lower-cased.
fn matches_search(entry: &Entry, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    entry.title.to_lowercase().contains(needle)
        || entry.author.to_lowercase().contains(needle)
        || entry
            .note
            .as_deref()
            .is_some_and(|note| note.to_lowercase().contains(needle))
        || entry
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}
