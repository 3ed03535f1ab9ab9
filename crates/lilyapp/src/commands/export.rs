use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LilyError, Result};
use crate::model::Entry;
use crate::store::EntryStore;
use std::fs;
use std::path::Path;
use tracing::info;

/// Name of the export document, always the same so repeated exports overwrite.
pub const EXPORT_FILENAME: &str = "lily_collection.json";

/// Writes the whole collection, unfiltered, to `dir/lily_collection.json`.
///
/// A failed load is an error and leaves any earlier export in place.
pub fn run<S: EntryStore>(store: &S, dir: &Path) -> Result<CmdResult> {
    let entries = store
        .list()
        .map_err(|e| LilyError::Store(format!("Could not load collection: {}", e)))?;

    let mut result = CmdResult::default();
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    let path = dir.join(EXPORT_FILENAME);
    fs::write(&path, to_json(&entries)?)?;
    info!(path = %path.display(), count = entries.len(), "exported collection");

    result.add_message(CmdMessage::success(format!(
        "Exported {} entries to {}",
        entries.len(),
        path.display()
    )));
    result.exported_path = Some(path);
    Ok(result)
}

/// The export document: a pretty-printed JSON array of entries.
pub fn to_json(entries: &[Entry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Rating};
    use crate::store::memory::fixtures::EntryFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn test_to_json_empty() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_export_writes_full_collection() {
        let store = InMemoryStore::with_entries(
            EntryFixture::new()
                .with("One", Category::Novel, Rating::Bible)
                .noted("first")
                .with("Two", Category::Other, Rating::Destiny)
                .build(),
        );
        let dir = tempfile::tempdir().unwrap();

        let result = run(&store, dir.path()).unwrap();
        let path = result.exported_path.unwrap();
        assert_eq!(path, dir.path().join(EXPORT_FILENAME));

        let raw = fs::read_to_string(&path).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["title"], "Two");
        assert_eq!(parsed[1]["note"], "first");
        assert!(parsed[0]["createdAt"].is_i64());
        assert!(raw.contains('\n'));
    }

    #[test]
    fn test_export_round_trips_entries() {
        let entries = EntryFixture::new()
            .with("Round", Category::Animation, Rating::Mysterious)
            .tagged(&["a", "b"])
            .build();
        let json = to_json(&entries).unwrap();
        let back: Vec<Entry> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entries);
    }

    #[test]
    fn test_export_keeps_previous_file_when_load_fails() {
        let store = InMemoryStore::new();
        store.set_fail_list(true);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILENAME);
        fs::write(&path, r#"[{"id":"precious"}]"#).unwrap();

        let result = run(&store, dir.path());
        assert!(matches!(result, Err(LilyError::Store(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"[{"id":"precious"}]"#);
    }

    #[test]
    fn test_export_failure_creates_nothing() {
        let store = InMemoryStore::new();
        store.set_fail_list(true);
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");

        assert!(run(&store, &target).is_err());
        assert!(!target.exists());
    }

    #[test]
    fn test_export_creates_missing_dir() {
        let store = InMemoryStore::new();
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("out");
        run(&store, &target).unwrap();
        assert!(target.join(EXPORT_FILENAME).exists());
    }
}
