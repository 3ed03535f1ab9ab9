use crate::commands::{load_collection, CmdResult};
use crate::error::Result;
use crate::filter::{filter, FilterCriteria};
use crate::store::EntryStore;
use crate::summary::summarize;
use tracing::debug;

/// The main view: filtered entries plus the summary of the whole collection.
pub fn run<S: EntryStore>(store: &S, criteria: &FilterCriteria) -> Result<CmdResult> {
    let (entries, failure) = load_collection(store);

    let listed: Vec<_> = filter(&entries, criteria).into_iter().cloned().collect();
    debug!(
        total = entries.len(),
        shown = listed.len(),
        "filtered collection"
    );

    let mut result = CmdResult::default()
        .with_summary(summarize(&entries))
        .with_listed_entries(listed);
    if let Some(message) = failure {
        result.add_message(message);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::{Category, Rating};
    use crate::store::memory::fixtures::EntryFixture;
    use crate::store::memory::InMemoryStore;

    fn seeded() -> InMemoryStore {
        InMemoryStore::with_entries(
            EntryFixture::new()
                .with("A", Category::Novel, Rating::Bible)
                .with("B", Category::Movie, Rating::Ordinary)
                .with("C", Category::Manga, Rating::Bible)
                .tagged(&["catgirl"])
                .build(),
        )
    }

    #[test]
    fn test_unfiltered_lists_newest_first() {
        let store = seeded();
        let result = run(&store, &FilterCriteria::default()).unwrap();
        let titles: Vec<_> = result.listed_entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "B", "A"]);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn test_summary_ignores_filter() {
        let store = seeded();
        let criteria = FilterCriteria::default().with_rating(Rating::Ordinary);
        let result = run(&store, &criteria).unwrap();

        assert_eq!(result.listed_entries.len(), 1);
        assert_eq!(result.listed_entries[0].title, "B");

        let summary = result.summary.unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.bible_count, 2);
        assert_eq!(summary.book_count, 2);
        assert_eq!(summary.movie_count, 1);
    }

    #[test]
    fn test_search_hits_tags() {
        let store = seeded();
        let criteria = FilterCriteria::default().with_search("CAT");
        let result = run(&store, &criteria).unwrap();
        assert_eq!(result.listed_entries.len(), 1);
        assert_eq!(result.listed_entries[0].title, "C");
    }

    #[test]
    fn test_list_failure_degrades_to_empty() {
        let store = seeded();
        store.set_fail_list(true);

        let result = run(&store, &FilterCriteria::default()).unwrap();
        assert!(result.listed_entries.is_empty());
        assert_eq!(result.summary.unwrap().total, 0);
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Error);
    }
}
