use super::{BlobStore, EntryStore};
use crate::draft::CoverUpload;
use crate::error::{LilyError, Result};
use crate::model::{sort_newest_first, Entry, NewEntry};
use reqwest::Url;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

const ENTRIES_FILENAME: &str = "entries.json";
const COVERS_DIRNAME: &str = "covers";

/// Local directory store.
///
/// ```text
/// <root>/
/// ├── entries.json      # JSON array of entries (same shape as the export)
/// └── covers/
///     └── {uuid}.{ext}  # uploaded cover images
/// ```
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entries_path(&self) -> PathBuf {
        self.root.join(ENTRIES_FILENAME)
    }

    fn covers_dir(&self) -> PathBuf {
        self.root.join(COVERS_DIRNAME)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    fn load_entries(&self) -> Result<Vec<Entry>> {
        let path = self.entries_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Writes through a temp file and renames, so a crash never leaves a
    /// truncated `entries.json` behind.
    fn save_entries(&self, entries: &[Entry]) -> Result<()> {
        self.ensure_dir(&self.root)?;
        let content = serde_json::to_string_pretty(entries)?;
        let tmp = self.root.join(format!(".{}.tmp", ENTRIES_FILENAME));
        fs::write(&tmp, content)?;
        fs::rename(tmp, self.entries_path())?;
        Ok(())
    }
}

impl EntryStore for FileStore {
    fn list(&self) -> Result<Vec<Entry>> {
        let mut entries = self.load_entries()?;
        // The file is append-ordered and timestamps are stored at millisecond
        // precision, so reverse first to keep same-millisecond entries newest first.
        entries.reverse();
        sort_newest_first(&mut entries);
        debug!(count = entries.len(), root = %self.root.display(), "loaded local entries");
        Ok(entries)
    }

    fn create(&mut self, entry: &NewEntry) -> Result<Entry> {
        let mut entries = self.load_entries()?;
        let created = Entry::from_new(Uuid::new_v4().to_string(), entry.clone());
        entries.push(created.clone());
        self.save_entries(&entries)?;
        Ok(created)
    }
}

impl BlobStore for FileStore {
    fn upload(&mut self, cover: &CoverUpload) -> Result<String> {
        let dir = self.covers_dir();
        self.ensure_dir(&dir)?;

        let path = dir.join(format!("{}{}", Uuid::new_v4(), cover.extension()));
        fs::write(&path, &cover.bytes)?;

        let absolute = fs::canonicalize(&path)?;
        Url::from_file_path(&absolute)
            .map(String::from)
            .map_err(|_| LilyError::Upload(format!("No file URL for {}", absolute.display())))
    }
}
