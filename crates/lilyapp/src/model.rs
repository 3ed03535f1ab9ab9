//! # Data Model
//!
//! An [`Entry`] is one catalogued work: a manga volume, a novel, a film. Entries are
//! created once through the entry editor (see [`crate::draft`]) and are immutable from
//! then on; the collection as a whole is reloaded from the store rather than patched.
//!
//! ## Closed Enumerations
//!
//! [`Category`] and [`Rating`] are closed sets. Their serialized form is the label the
//! hosted table stores (`漫畫`, `聖經`, ...), and deserialization also accepts the
//! English token (`MANGA`, `TOP_TIER`, ...) so hand-written JSON stays readable.
//!
//! ## Export Shape
//!
//! `Entry` serializes with camelCase keys and `createdAt` as epoch milliseconds, which
//! is the document produced by `lily export`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LilyError;

/// Cover used when the user supplies neither a file nor a URL.
pub const DEFAULT_COVER_URL: &str =
    "https://images.unsplash.com/photo-1543002588-bfa74002ed7e?auto=format&fit=crop&q=80&w=200&h=300";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "漫畫", alias = "MANGA")]
    Manga,
    #[serde(rename = "小說", alias = "NOVEL")]
    Novel,
    #[serde(rename = "電影", alias = "MOVIE")]
    Movie,
    #[serde(rename = "動畫", alias = "ANIMATION")]
    Animation,
    #[serde(rename = "其他", alias = "OTHER")]
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Manga,
        Category::Novel,
        Category::Movie,
        Category::Animation,
        Category::Other,
    ];

    /// The stored label, also used for display.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Manga => "漫畫",
            Category::Novel => "小說",
            Category::Movie => "電影",
            Category::Animation => "動畫",
            Category::Other => "其他",
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Category::Manga => "MANGA",
            Category::Novel => "NOVEL",
            Category::Movie => "MOVIE",
            Category::Animation => "ANIMATION",
            Category::Other => "OTHER",
        }
    }

    /// Manga and novels count as books in the summary.
    pub fn is_book(&self) -> bool {
        matches!(self, Category::Manga | Category::Novel)
    }

    /// Films and animation count as movies in the summary.
    pub fn is_movie(&self) -> bool {
        matches!(self, Category::Movie | Category::Animation)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = LilyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| token_matches(s, c.token()) || s.trim() == c.label())
            .ok_or_else(|| LilyError::Parse(format!("Unknown category: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    #[serde(rename = "聖經", alias = "BIBLE")]
    Bible,
    #[serde(rename = "極品", alias = "TOP_TIER")]
    TopTier,
    #[serde(rename = "嚴格", alias = "STRICT")]
    Strict,
    #[serde(rename = "普通", alias = "ORDINARY")]
    Ordinary,
    #[serde(rename = "神秘", alias = "MYSTERIOUS")]
    Mysterious,
    #[serde(rename = "緣分", alias = "DESTINY")]
    Destiny,
}

impl Rating {
    pub const ALL: [Rating; 6] = [
        Rating::Bible,
        Rating::TopTier,
        Rating::Strict,
        Rating::Ordinary,
        Rating::Mysterious,
        Rating::Destiny,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Rating::Bible => "聖經",
            Rating::TopTier => "極品",
            Rating::Strict => "嚴格",
            Rating::Ordinary => "普通",
            Rating::Mysterious => "神秘",
            Rating::Destiny => "緣分",
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Rating::Bible => "BIBLE",
            Rating::TopTier => "TOP_TIER",
            Rating::Strict => "STRICT",
            Rating::Ordinary => "ORDINARY",
            Rating::Mysterious => "MYSTERIOUS",
            Rating::Destiny => "DESTINY",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Rating {
    type Err = LilyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rating::ALL
            .into_iter()
            .find(|r| token_matches(s, r.token()) || s.trim() == r.label())
            .ok_or_else(|| LilyError::Parse(format!("Unknown rating: {}", s)))
    }
}

/// Case-insensitive token comparison where `-` and `_` are interchangeable,
/// so `top-tier`, `TOP_TIER` and `Top_Tier` all name the same rating.
fn token_matches(input: &str, token: &str) -> bool {
    let normalized = input.trim().replace('-', "_");
    normalized.eq_ignore_ascii_case(token)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub category: Category,
    pub rating: Rating,
    #[serde(default = "default_cover_url")]
    pub cover_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

fn default_cover_url() -> String {
    DEFAULT_COVER_URL.to_string()
}

impl Entry {
    /// Materializes a payload into an entry once the store has assigned an id.
    pub fn from_new(id: impl Into<String>, new: NewEntry) -> Self {
        Self {
            id: id.into(),
            title: new.title,
            author: new.author,
            category: new.category,
            rating: new.rating,
            cover_url: new.cover_url,
            note: new.note,
            tags: new.tags,
            created_at: new.created_at,
        }
    }
}

/// The create payload: an entry without its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    pub title: String,
    pub author: String,
    pub category: Category,
    pub rating: Rating,
    pub cover_url: String,
    pub note: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Orders entries newest first, the order every store returns.
pub fn sort_newest_first(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_entry() -> Entry {
        Entry {
            id: "1700000000000".to_string(),
            title: "Bloom Into You".to_string(),
            author: "Nio Nakatani".to_string(),
            category: Category::Manga,
            rating: Rating::Bible,
            cover_url: "https://example.com/cover.jpg".to_string(),
            note: None,
            tags: vec!["school".to_string()],
            created_at: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
        }
    }

    #[test]
    fn test_category_serializes_as_stored_label() {
        let json = serde_json::to_string(&Category::Animation).unwrap();
        assert_eq!(json, "\"動畫\"");
    }

    #[test]
    fn test_category_accepts_english_token() {
        let cat: Category = serde_json::from_str("\"NOVEL\"").unwrap();
        assert_eq!(cat, Category::Novel);
        let cat: Category = serde_json::from_str("\"小說\"").unwrap();
        assert_eq!(cat, Category::Novel);
    }

    #[test]
    fn test_rating_from_str_variants() {
        assert_eq!("top-tier".parse::<Rating>().unwrap(), Rating::TopTier);
        assert_eq!("TOP_TIER".parse::<Rating>().unwrap(), Rating::TopTier);
        assert_eq!("極品".parse::<Rating>().unwrap(), Rating::TopTier);
        assert_eq!("bible".parse::<Rating>().unwrap(), Rating::Bible);
        assert!("legendary".parse::<Rating>().is_err());
    }

    #[test]
    fn test_category_from_str_variants() {
        assert_eq!("manga".parse::<Category>().unwrap(), Category::Manga);
        assert_eq!("其他".parse::<Category>().unwrap(), Category::Other);
        assert!("ALL".parse::<Category>().is_err());
    }

    #[test]
    fn test_book_and_movie_groups() {
        assert!(Category::Manga.is_book());
        assert!(Category::Novel.is_book());
        assert!(Category::Movie.is_movie());
        assert!(Category::Animation.is_movie());
        assert!(!Category::Other.is_book());
        assert!(!Category::Other.is_movie());
    }

    #[test]
    fn test_entry_export_shape() {
        let value = serde_json::to_value(sample_entry()).unwrap();
        assert_eq!(value["coverUrl"], "https://example.com/cover.jpg");
        assert_eq!(value["createdAt"], 1_700_000_000_000_i64);
        assert_eq!(value["category"], "漫畫");
        assert_eq!(value["rating"], "聖經");
        assert!(value.get("note").is_none());
    }

    #[test]
    fn test_entry_missing_optional_fields() {
        let json = r#"{
            "id": "x",
            "category": "OTHER",
            "rating": "DESTINY",
            "createdAt": 0
        }"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.title, "");
        assert_eq!(entry.author, "");
        assert_eq!(entry.cover_url, DEFAULT_COVER_URL);
        assert!(entry.note.is_none());
        assert!(entry.tags.is_empty());
    }

    #[test]
    fn test_sort_newest_first() {
        let older = sample_entry();
        let mut newer = sample_entry();
        newer.id = "2".to_string();
        newer.created_at = older.created_at + chrono::Duration::seconds(5);

        let mut entries = vec![older.clone(), newer.clone()];
        sort_newest_first(&mut entries);
        assert_eq!(entries[0].id, "2");
        assert_eq!(entries[1].id, older.id);
    }
}
