//! Aggregate counts over the whole collection.
//!
//! The summary is always computed from the full collection, never from the
//! filtered view, so the numbers stay put while the user narrows the list.

use crate::model::{Entry, Rating};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    pub total: usize,
    pub bible_count: usize,
    /// Manga and novels.
    pub book_count: usize,
    /// Movies and animation.
    pub movie_count: usize,
}

impl Summary {
    /// Entries that are neither books nor movies.
    pub fn other_count(&self) -> usize {
        self.total
            .saturating_sub(self.book_count)
            .saturating_sub(self.movie_count)
    }
}

pub fn summarize(entries: &[Entry]) -> Summary {
    entries.iter().fold(Summary::default(), |mut acc, entry| {
        acc.total += 1;
        if entry.rating == Rating::Bible {
            acc.bible_count += 1;
        }
        if entry.category.is_book() {
            acc.book_count += 1;
        } else if entry.category.is_movie() {
            acc.movie_count += 1;
        }
        acc
    })
}
