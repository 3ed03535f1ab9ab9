//! # Command Layer
//!
//! This module contains the **core business logic** of lily. Each command lives in its
//! own submodule and implements plain functions over the store traits.
//!
//! ## Role and Responsibilities
//!
//! Commands:
//! - Load the collection from an [`EntryStore`](crate::store::EntryStore) and run the
//!   filter/aggregate engine over it
//! - Drive the entry editor and the blob store when creating entries
//! - Return a structured [`CmdResult`] with entries, summary and messages
//! - Are completely UI-agnostic
//!
//! ## What Commands Do NOT Do
//!
//! - **Terminal I/O**: No stdout, stderr or formatting
//! - **Argument parsing**: That's the CLI layer's job
//! - **Exit codes**: Return `Result`, let the caller decide
//!
//! ## Failure Policy
//!
//! A failed `list` is not fatal: the command logs it, carries on with an empty
//! collection and reports an error message, so the view still renders. A failed
//! upload or create is returned as `Err` and nothing is persisted. Export also
//! fails on a failed load, so an earlier export is never replaced by an empty one.
//!
//! ## Testing Strategy
//!
//! Command tests use [`InMemoryStore`](crate::store::memory::InMemoryStore) and its
//! failure switches to cover both the happy path and every error branch.
//!
//! ## Command Modules
//!
//! - [`list`]: Filtered view plus summary
//! - [`create`]: Create an entry from a draft
//! - [`export`]: Write the collection to `lily_collection.json`
//! - [`stats`]: Summary only
//! - [`config`]: Show configuration or a template
//! - [`theme`]: Show and change the theme preference

use crate::config::LilyConfig;
use crate::model::Entry;
use crate::prefs::Preferences;
use crate::store::EntryStore;
use crate::summary::Summary;
use serde::Serialize;
use std::path::PathBuf;
use tracing::error;

pub mod config;
pub mod create;
pub mod export;
pub mod list;
pub mod stats;
pub mod theme;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Entries that were created by the command.
    pub affected_entries: Vec<Entry>,
    /// Entries to display, already filtered.
    pub listed_entries: Vec<Entry>,
    /// Counts over the whole collection.
    pub summary: Option<Summary>,
    pub exported_path: Option<PathBuf>,
    pub config: Option<LilyConfig>,
    pub config_template: Option<String>,
    pub preferences: Option<Preferences>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_entries(mut self, entries: Vec<Entry>) -> Self {
        self.listed_entries = entries;
        self
    }

    pub fn with_affected_entries(mut self, entries: Vec<Entry>) -> Self {
        self.affected_entries = entries;
        self
    }

    pub fn with_summary(mut self, summary: Summary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}

/// Loads the full collection, degrading a store failure to an empty list.
///
/// The returned message (if any) describes the failure for the user.
pub(crate) fn load_collection<S: EntryStore>(store: &S) -> (Vec<Entry>, Option<CmdMessage>) {
    match store.list() {
        Ok(entries) => (entries, None),
        Err(e) => {
            error!(error = %e, "failed to load collection");
            (
                Vec::new(),
                Some(CmdMessage::error(format!("Could not load collection: {}", e))),
            )
        }
    }
}
