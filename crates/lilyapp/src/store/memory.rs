use super::{BlobStore, EntryStore};
use crate::draft::CoverUpload;
use crate::error::{LilyError, Result};
use crate::model::{sort_newest_first, Entry, NewEntry};
use std::cell::{Cell, RefCell};
use uuid::Uuid;

/// In-memory store for testing.
///
/// Uses `Cell`/`RefCell` for interior mutability since lily is
/// single-threaded. Each collaborator call can be made to fail on demand to
/// exercise the error paths of the commands.
#[derive(Default)]
pub struct InMemoryStore {
    entries: RefCell<Vec<Entry>>,
    uploads: RefCell<Vec<CoverUpload>>,
    list_calls: Cell<usize>,
    fail_list: Cell<bool>,
    fail_create: Cell<bool>,
    fail_upload: Cell<bool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with existing entries.
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        let store = Self::new();
        *store.entries.borrow_mut() = entries;
        store
    }

    pub fn set_fail_list(&self, fail: bool) {
        self.fail_list.set(fail);
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.set(fail);
    }

    pub fn set_fail_upload(&self, fail: bool) {
        self.fail_upload.set(fail);
    }

    /// How many times `list` has been called.
    pub fn list_calls(&self) -> usize {
        self.list_calls.get()
    }

    pub fn uploads(&self) -> Vec<CoverUpload> {
        self.uploads.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl EntryStore for InMemoryStore {
    fn list(&self) -> Result<Vec<Entry>> {
        self.list_calls.set(self.list_calls.get() + 1);
        if self.fail_list.get() {
            return Err(LilyError::Store("Simulated list error".to_string()));
        }
        let mut entries = self.entries.borrow().clone();
        sort_newest_first(&mut entries);
        Ok(entries)
    }

    fn create(&mut self, entry: &NewEntry) -> Result<Entry> {
        if self.fail_create.get() {
            return Err(LilyError::Store("Simulated create error".to_string()));
        }
        let created = Entry::from_new(Uuid::new_v4().to_string(), entry.clone());
        self.entries.borrow_mut().push(created.clone());
        Ok(created)
    }
}

impl BlobStore for InMemoryStore {
    fn upload(&mut self, cover: &CoverUpload) -> Result<String> {
        if self.fail_upload.get() {
            return Err(LilyError::Upload("Simulated upload error".to_string()));
        }
        self.uploads.borrow_mut().push(cover.clone());
        Ok(format!(
            "memory://covers/{}{}",
            Uuid::new_v4(),
            cover.extension()
        ))
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use crate::model::{Category, Entry, Rating};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn epoch() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).single().unwrap_or_default()
    }

    /// Builds entries with strictly increasing creation times, so the last
    /// one pushed is the newest.
    #[derive(Default)]
    pub struct EntryFixture {
        entries: Vec<Entry>,
    }

    impl EntryFixture {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, title: &str, category: Category, rating: Rating) -> Self {
            let n = self.entries.len();
            self.entries.push(Entry {
                id: format!("entry-{}", n + 1),
                title: title.to_string(),
                author: format!("Author {}", n + 1),
                category,
                rating,
                cover_url: crate::model::DEFAULT_COVER_URL.to_string(),
                note: None,
                tags: Vec::new(),
                created_at: epoch() + Duration::minutes(n as i64),
            });
            self
        }

        pub fn tagged(mut self, tags: &[&str]) -> Self {
            if let Some(last) = self.entries.last_mut() {
                last.tags = tags.iter().map(|t| t.to_string()).collect();
            }
            self
        }

        pub fn noted(mut self, note: &str) -> Self {
            if let Some(last) = self.entries.last_mut() {
                last.note = Some(note.to_string());
            }
            self
        }

        pub fn build(self) -> Vec<Entry> {
            self.entries
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::EntryFixture;
    use super::*;
    use crate::model::{Category, Rating};
    use chrono::Utc;

    fn new_entry(title: &str) -> NewEntry {
        NewEntry {
            title: title.to_string(),
            author: "A".to_string(),
            category: Category::Novel,
            rating: Rating::Strict,
            cover_url: String::new(),
            note: None,
            tags: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_list_is_newest_first() {
        let store = InMemoryStore::with_entries(
            EntryFixture::new()
                .with("Old", Category::Manga, Rating::Bible)
                .with("New", Category::Movie, Rating::Ordinary)
                .build(),
        );
        let listed = store.list().unwrap();
        assert_eq!(listed[0].title, "New");
        assert_eq!(listed[1].title, "Old");
        assert_eq!(store.list_calls(), 1);
    }

    #[test]
    fn test_create_assigns_unique_ids() {
        let mut store = InMemoryStore::new();
        let a = store.create(&new_entry("A")).unwrap();
        let b = store.create(&new_entry("B")).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_simulated_failures() {
        let mut store = InMemoryStore::new();
        store.set_fail_list(true);
        assert!(store.list().is_err());

        store.set_fail_create(true);
        assert!(store.create(&new_entry("A")).is_err());
        assert!(store.is_empty());

        store.set_fail_upload(true);
        let cover = CoverUpload {
            file_name: "c.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        };
        assert!(matches!(store.upload(&cover), Err(LilyError::Upload(_))));
        assert!(store.uploads().is_empty());
    }

    #[test]
    fn test_upload_returns_url_with_extension() {
        let mut store = InMemoryStore::new();
        let cover = CoverUpload {
            file_name: "c.PNG".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1],
        };
        let url = store.upload(&cover).unwrap();
        assert!(url.starts_with("memory://covers/"));
        assert!(url.ends_with(".png"));
        assert_eq!(store.uploads().len(), 1);
    }
}
