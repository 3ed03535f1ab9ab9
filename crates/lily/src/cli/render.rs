//! # Rendering
//!
//! Styled terminal output through `outstanding` templates.
//!
//! Layout work (display widths, truncation, padding, relative times, icons) stays
//! in Rust because it needs Unicode-aware processing: titles are often CJK, and
//! rating icons are double-width emoji. Templates receive flat, pre-computed
//! strings and only decide which style applies where.
//!
//! `--output json` bypasses templates entirely, see [`render_json`].

use super::styles::{names, rating_style, theme_for};
use super::templates::{
    CONFIG_TEMPLATE, LIST_TEMPLATE, MESSAGES_TEMPLATE, STATS_TEMPLATE, SUMMARY_TEMPLATE,
};
use chrono::{DateTime, Utc};
use lilyapp::commands::{CmdMessage, CmdResult, MessageLevel};
use lilyapp::config::LilyConfig;
use lilyapp::model::{Entry, Rating};
use lilyapp::prefs::{Preferences, ThemeMode};
use lilyapp::summary::Summary;
use outstanding::{render_with_color, Theme, ThemeChoice};
use serde::Serialize;
use std::path::PathBuf;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 80;
pub const TIME_WIDTH: usize = 14;
pub const EMPTY_MESSAGE: &str = "沒有找到相關的收藏...";
const CARD_INDENT: &str = "   ";

pub fn rating_icon(rating: Rating) -> &'static str {
    match rating {
        Rating::Bible => "👑",
        Rating::TopTier => "🌹",
        Rating::Destiny => "✨",
        Rating::Ordinary => "☕",
        Rating::Mysterious => "🔮",
        Rating::Strict => "📏",
    }
}

/// Resolved theme plus the colour switch, shared by every render call.
pub struct Output {
    theme: &'static Theme,
    use_color: bool,
}

#[derive(Serialize)]
struct EntryCardData {
    icon: String,
    rating: String,
    rating_style: String,
    category: String,
    title: String,
    padding: String,
    time_ago: String,
    indent: String,
    author: String,
    note: Option<String>,
    tags: String,
}

#[derive(Serialize)]
struct ListData {
    entries: Vec<EntryCardData>,
    empty: bool,
    empty_message: String,
    shown: Option<String>,
}

#[derive(Serialize)]
struct CountItem {
    label: String,
    value: usize,
    padding: String,
}

#[derive(Serialize)]
struct SummaryData {
    items: Vec<CountItem>,
}

#[derive(Serialize)]
struct StatsData {
    title: String,
    items: Vec<CountItem>,
}

#[derive(Serialize)]
struct ConfigRow {
    key: String,
    padding: String,
    value: String,
    style: String,
}

#[derive(Serialize)]
struct ConfigData {
    rows: Vec<ConfigRow>,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: String,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

impl Output {
    pub fn new(mode: ThemeMode, use_color: bool) -> Self {
        Self {
            theme: theme_for(mode),
            use_color,
        }
    }

    fn render<T: Serialize>(&self, template: &str, data: &T) -> String {
        render_with_color(template, data, ThemeChoice::from(self.theme), self.use_color)
            .unwrap_or_else(|e| format!("Render error: {}\n", e))
    }

    /// One card per entry, newest first. With a summary, the summary strip
    /// comes first and a "shown" count closes the list.
    pub fn render_list(&self, entries: &[Entry], summary: Option<&Summary>) -> String {
        self.render_list_at(entries, summary, Utc::now())
    }

    fn render_list_at(
        &self,
        entries: &[Entry],
        summary: Option<&Summary>,
        now: DateTime<Utc>,
    ) -> String {
        let mut out = String::new();
        if let Some(summary) = summary {
            out.push_str(&self.render_summary(summary));
            out.push('\n');
        }

        let data = ListData {
            entries: entries.iter().map(|e| entry_card(e, now)).collect(),
            empty: entries.is_empty(),
            empty_message: EMPTY_MESSAGE.to_string(),
            shown: summary.map(|s| {
                if s.total == entries.len() {
                    format!("{} shown", entries.len())
                } else {
                    format!("{} / {} shown", entries.len(), s.total)
                }
            }),
        };
        out.push_str(&self.render(LIST_TEMPLATE, &data));
        out
    }

    pub fn render_summary(&self, summary: &Summary) -> String {
        let data = SummaryData {
            items: count_items(summary, false),
        };
        self.render(SUMMARY_TEMPLATE, &data)
    }

    pub fn render_stats(&self, summary: &Summary) -> String {
        let data = StatsData {
            title: "收藏統計".to_string(),
            items: count_items(summary, true),
        };
        self.render(STATS_TEMPLATE, &data)
    }

    pub fn render_config(&self, config: &LilyConfig, file: Option<PathBuf>) -> String {
        let source = match file {
            Some(path) => path.display().to_string(),
            None => "(defaults and environment only)".to_string(),
        };
        let rows = vec![
            ("config file", Some(source)),
            ("backend", Some(config.backend.to_string())),
            (
                "data_dir",
                config.data_dir.as_ref().map(|d| d.display().to_string()),
            ),
            ("default_cover_url", Some(config.default_cover_url.clone())),
            ("remote.url", config.remote.url.clone()),
            ("remote.anon_key", config.remote.anon_key.clone()),
            ("remote.table", Some(config.remote.table.clone())),
            ("remote.bucket", Some(config.remote.bucket.clone())),
            (
                "remote.timeout_secs",
                Some(config.remote.timeout_secs.to_string()),
            ),
        ];

        let key_width = rows.iter().map(|(k, _)| k.width()).max().unwrap_or(0) + 2;
        let data = ConfigData {
            rows: rows
                .into_iter()
                .map(|(key, value)| {
                    let (value, style) = match value {
                        Some(v) => (v, names::REGULAR),
                        None => ("(not set)".to_string(), names::FAINT),
                    };
                    ConfigRow {
                        key: key.to_string(),
                        padding: " ".repeat(key_width - key.width()),
                        value,
                        style: style.to_string(),
                    }
                })
                .collect(),
        };
        self.render(CONFIG_TEMPLATE, &data)
    }

    /// Renders command messages with the style matching their level.
    pub fn render_messages(&self, messages: &[CmdMessage]) -> String {
        if messages.is_empty() {
            return String::new();
        }

        let data = MessagesData {
            messages: messages
                .iter()
                .map(|msg| {
                    let style = match msg.level {
                        MessageLevel::Info => names::INFO,
                        MessageLevel::Success => names::SUCCESS,
                        MessageLevel::Warning => names::WARNING,
                        MessageLevel::Error => names::ERROR,
                    };
                    MessageData {
                        content: msg.content.clone(),
                        style: style.to_string(),
                    }
                })
                .collect(),
        };
        self.render(MESSAGES_TEMPLATE, &data)
    }

    pub fn print_messages(&self, messages: &[CmdMessage]) {
        let output = self.render_messages(messages);
        if !output.is_empty() {
            print!("{}", output);
        }
    }
}

#[derive(Serialize)]
struct JsonView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    entries: Option<&'a [Entry]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a Summary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exported_path: Option<&'a PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<&'a LilyConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preferences: Option<&'a Preferences>,
    messages: &'a [CmdMessage],
}

/// Machine-readable form of a command result. Created entries are reported
/// under `entries` like listed ones.
pub fn render_json(result: &CmdResult) -> serde_json::Result<String> {
    let entries = if !result.affected_entries.is_empty() {
        Some(result.affected_entries.as_slice())
    } else if result.summary.is_some() && result.exported_path.is_none() {
        Some(result.listed_entries.as_slice())
    } else {
        None
    };
    let view = JsonView {
        entries,
        summary: result.summary.as_ref(),
        exported_path: result.exported_path.as_ref(),
        config: result.config.as_ref(),
        preferences: result.preferences.as_ref(),
        messages: &result.messages,
    };
    serde_json::to_string_pretty(&view)
}

fn entry_card(entry: &Entry, now: DateTime<Utc>) -> EntryCardData {
    let icon = rating_icon(entry.rating);
    let rating = entry.rating.label();
    let category = entry.category.label();

    // icon + " " + rating + "  " + category + "  " ... time
    let fixed = icon.width() + 1 + rating.width() + 2 + category.width() + 2 + TIME_WIDTH;
    let available = LINE_WIDTH.saturating_sub(fixed);
    let title = truncate_to_width(&entry.title, available);
    let padding = " ".repeat(available.saturating_sub(title.width()));

    let note_width = LINE_WIDTH.saturating_sub(CARD_INDENT.len());
    let note = entry
        .note
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(|n| note_preview(n, note_width));

    EntryCardData {
        icon: icon.to_string(),
        rating: rating.to_string(),
        rating_style: rating_style(entry.rating).to_string(),
        category: category.to_string(),
        title,
        padding,
        time_ago: format_time_ago(entry.created_at, now),
        indent: CARD_INDENT.to_string(),
        author: entry.author.clone(),
        note,
        tags: entry
            .tags
            .iter()
            .map(|t| format!("#{}", t))
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn count_items(summary: &Summary, with_other: bool) -> Vec<CountItem> {
    let mut counts = vec![
        ("總收藏", summary.total),
        ("聖經級", summary.bible_count),
        ("圖書", summary.book_count),
        ("電影", summary.movie_count),
    ];
    if with_other {
        counts.push(("其他", summary.other_count()));
    }
    let label_width = counts.iter().map(|(l, _)| l.width()).max().unwrap_or(0) + 2;
    counts
        .into_iter()
        .map(|(label, value)| CountItem {
            label: label.to_string(),
            value,
            padding: " ".repeat(label_width - label.width()),
        })
        .collect()
}

/// The note on a single line, quoted and cut to `max_width` columns.
fn note_preview(note: &str, max_width: usize) -> String {
    let flat = note.split_whitespace().collect::<Vec<_>>().join(" ");
    let inner = truncate_to_width(&flat, max_width.saturating_sub(4));
    format!("「{}」", inner)
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let time_str = timeago::Formatter::new().convert(elapsed.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
