//! # Entry Editor
//!
//! An [`EntryDraft`] holds what the user typed for a new entry, before anything
//! touches a store. It validates the required fields and turns itself into a
//! [`NewEntry`] payload once the cover reference is known.
//!
//! The cover can come from three places:
//! - nothing: the default placeholder URL is used,
//! - a URL (or inline `data:` URI) given verbatim,
//! - a local image file, which the create command uploads through the blob
//!   store before inserting the row.

use crate::error::{LilyError, Result};
use crate::model::{Category, NewEntry, Rating};
use crate::tags::parse_tags;
use chrono::Utc;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CoverSource {
    #[default]
    None,
    Url(String),
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub title: String,
    pub author: String,
    pub category: Category,
    pub rating: Rating,
    pub note: String,
    /// Raw tag text as typed, see [`parse_tags`].
    pub tags: String,
    pub cover: CoverSource,
}

impl Default for EntryDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            category: Category::Manga,
            rating: Rating::Ordinary,
            note: String::new(),
            tags: String::new(),
            cover: CoverSource::None,
        }
    }
}

impl EntryDraft {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(LilyError::InvalidEntry("Title cannot be empty".to_string()));
        }
        if self.author.trim().is_empty() {
            return Err(LilyError::InvalidEntry(
                "Author cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the create payload.
    ///
    /// `uploaded_cover` is the public URL returned by the blob store when the
    /// draft pointed at a file; it takes precedence over the draft's own cover.
    pub fn into_new_entry(
        self,
        uploaded_cover: Option<String>,
        default_cover: &str,
    ) -> Result<NewEntry> {
        self.validate()?;

        let cover_url = match (uploaded_cover, self.cover) {
            (Some(url), _) => url,
            (None, CoverSource::Url(url)) if !url.trim().is_empty() => url.trim().to_string(),
            _ => default_cover.to_string(),
        };

        let note = self.note.trim();
        Ok(NewEntry {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            category: self.category,
            rating: self.rating,
            cover_url,
            note: if note.is_empty() {
                None
            } else {
                Some(note.to_string())
            },
            tags: parse_tags(&self.tags),
            created_at: Utc::now(),
        })
    }
}

/// An image ready to be handed to a [`crate::store::BlobStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverUpload {
    /// Original file name, used for the extension of the stored object.
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl CoverUpload {
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "cover".to_string());
        Ok(Self {
            content_type: content_type_for(path).to_string(),
            file_name,
            bytes,
        })
    }

    /// Lower-cased extension including the leading dot, or empty.
    pub fn extension(&self) -> String {
        Path::new(&self.file_name)
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default()
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DEFAULT_COVER_URL;

    #[test]
    fn test_rejects_empty_title() {
        let draft = EntryDraft::new("   ", "Author");
        assert!(matches!(draft.validate(), Err(LilyError::InvalidEntry(_))));
    }

    #[test]
    fn test_rejects_empty_author() {
        let draft = EntryDraft::new("Title", "");
        assert!(matches!(draft.validate(), Err(LilyError::InvalidEntry(_))));
    }

    #[test]
    fn test_defaults_match_editor_form() {
        let draft = EntryDraft::default();
        assert_eq!(draft.category, Category::Manga);
        assert_eq!(draft.rating, Rating::Ordinary);
        assert_eq!(draft.cover, CoverSource::None);
    }

    #[test]
    fn test_into_new_entry_uses_default_cover() {
        let draft = EntryDraft::new(" Citrus ", "Saburouta");
        let new = draft.into_new_entry(None, DEFAULT_COVER_URL).unwrap();
        assert_eq!(new.title, "Citrus");
        assert_eq!(new.cover_url, DEFAULT_COVER_URL);
        assert!(new.note.is_none());
        assert!(new.tags.is_empty());
    }

    #[test]
    fn test_into_new_entry_parses_tags_and_note() {
        let draft = EntryDraft {
            note: "  lovely  ".to_string(),
            tags: "school，drama, slow-burn".to_string(),
            cover: CoverSource::Url("https://example.com/c.png".to_string()),
            ..EntryDraft::new("Title", "Author")
        };
        let new = draft.into_new_entry(None, DEFAULT_COVER_URL).unwrap();
        assert_eq!(new.note.as_deref(), Some("lovely"));
        assert_eq!(new.tags, vec!["school", "drama", "slow-burn"]);
        assert_eq!(new.cover_url, "https://example.com/c.png");
    }

    #[test]
    fn test_uploaded_cover_wins() {
        let draft = EntryDraft {
            cover: CoverSource::File(PathBuf::from("cover.png")),
            ..EntryDraft::new("Title", "Author")
        };
        let new = draft
            .into_new_entry(Some("https://cdn/x.png".to_string()), DEFAULT_COVER_URL)
            .unwrap();
        assert_eq!(new.cover_url, "https://cdn/x.png");
    }

    #[test]
    fn test_blank_cover_url_falls_back() {
        let draft = EntryDraft {
            cover: CoverSource::Url("  ".to_string()),
            ..EntryDraft::new("Title", "Author")
        };
        let new = draft.into_new_entry(None, "fallback").unwrap();
        assert_eq!(new.cover_url, "fallback");
    }

    #[test]
    fn test_cover_upload_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Cover.JPG");
        std::fs::write(&path, b"fake-jpeg").unwrap();

        let upload = CoverUpload::from_path(&path).unwrap();
        assert_eq!(upload.content_type, "image/jpeg");
        assert_eq!(upload.file_name, "Cover.JPG");
        assert_eq!(upload.extension(), ".jpg");
        assert_eq!(upload.bytes, b"fake-jpeg");
    }

    #[test]
    fn test_cover_upload_missing_file() {
        let result = CoverUpload::from_path(Path::new("/definitely/not/here.png"));
        assert!(matches!(result, Err(LilyError::Io(_))));
    }
}
