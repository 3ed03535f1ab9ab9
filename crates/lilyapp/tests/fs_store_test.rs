use lilyapp::api::LilyApi;
use lilyapp::config::LilyConfig;
use lilyapp::draft::{CoverSource, EntryDraft};
use lilyapp::filter::FilterCriteria;
use lilyapp::model::{Category, Entry, Rating};
use lilyapp::store::fs::FileStore;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, LilyApi<FileStore>) {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("data"));
    let api = LilyApi::new(store, LilyConfig::default());
    (dir, api)
}

fn draft(title: &str, category: Category, rating: Rating, tags: &str) -> EntryDraft {
    EntryDraft {
        category,
        rating,
        tags: tags.to_string(),
        ..EntryDraft::new(title, "Someone")
    }
}

#[test]
fn test_create_filter_and_summarize() {
    let (_dir, mut api) = setup();

    api.create(draft("Whisper", Category::Novel, Rating::Bible, "quiet"))
        .unwrap();
    api.create(draft("Night Drive", Category::Movie, Rating::Ordinary, ""))
        .unwrap();
    let last = api
        .create(draft("Nekomimi", Category::Manga, Rating::TopTier, "catgirl, comedy"))
        .unwrap();

    // The create result already carries the reloaded collection, newest first.
    let titles: Vec<_> = last
        .listed_entries
        .iter()
        .map(|e| e.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Nekomimi", "Night Drive", "Whisper"]);

    let bible = api
        .list(&FilterCriteria::default().with_rating(Rating::Bible))
        .unwrap();
    assert_eq!(bible.listed_entries.len(), 1);
    assert_eq!(bible.listed_entries[0].title, "Whisper");

    let summary = bible.summary.unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.bible_count, 1);
    assert_eq!(summary.book_count, 2);
    assert_eq!(summary.movie_count, 1);

    let cats = api
        .list(&FilterCriteria::default().with_search("cat"))
        .unwrap();
    assert_eq!(cats.listed_entries.len(), 1);
    assert_eq!(cats.listed_entries[0].tags, vec!["catgirl", "comedy"]);
}

#[test]
fn test_cover_file_is_copied_into_store() {
    let (dir, mut api) = setup();
    let cover_path = dir.path().join("poster.webp");
    fs::write(&cover_path, b"RIFF....WEBP").unwrap();

    let result = api
        .create(EntryDraft {
            cover: CoverSource::File(cover_path),
            ..EntryDraft::new("Poster", "Artist")
        })
        .unwrap();

    let cover_url = &result.affected_entries[0].cover_url;
    assert!(cover_url.starts_with("file://"));
    assert!(cover_url.ends_with(".webp"));

    let covers: Vec<_> = fs::read_dir(dir.path().join("data").join("covers"))
        .unwrap()
        .collect();
    assert_eq!(covers.len(), 1);
}

#[test]
fn test_export_matches_store_contents() {
    let (dir, mut api) = setup();
    api.create(draft("One", Category::Animation, Rating::Destiny, "a b"))
        .unwrap();
    api.create(draft("Two", Category::Other, Rating::Strict, ""))
        .unwrap();

    let out = dir.path().join("export");
    let result = api.export(&out).unwrap();
    let path = result.exported_path.unwrap();
    assert!(path.ends_with("lily_collection.json"));

    let exported: Vec<Entry> = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    let listed = api.list(&FilterCriteria::default()).unwrap().listed_entries;
    assert_eq!(exported, listed);
}

#[test]
fn test_invalid_draft_leaves_store_untouched() {
    let (dir, mut api) = setup();
    assert!(api.create(EntryDraft::new("Title", "  ")).is_err());
    assert!(!dir.path().join("data").join("entries.json").exists());
}
