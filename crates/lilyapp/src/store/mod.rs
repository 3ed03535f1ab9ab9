//! # Storage Layer
//!
//! lily does not own its data: entries live in a table and cover images in an
//! object bucket, both behind a hosted backend. This module defines the two
//! collaborator interfaces the rest of the library depends on.
//!
//! - [`EntryStore`]: lists the collection (newest first) and inserts new entries.
//! - [`BlobStore`]: uploads a cover image and returns its public URL.
//!
//! ## Implementations
//!
//! - [`remote::RemoteStore`]: hosted table + bucket over HTTP (PostgREST-style
//!   rows, storage objects with public URLs).
//! - [`fs::FileStore`]: a local directory holding `entries.json` and a `covers/`
//!   folder, for use without a hosted project.
//! - [`memory::InMemoryStore`]: no persistence, with failure switches for tests.
//!
//! [`Backend`] picks one of the real implementations at runtime from the config.
//!
//! ## Reload, Don't Patch
//!
//! Callers never insert a created entry into their in-memory list. After a
//! successful [`EntryStore::create`] they call [`EntryStore::list`] again and
//! replace the collection wholesale.

use crate::draft::CoverUpload;
use crate::error::Result;
use crate::model::{Entry, NewEntry};

pub mod fs;
pub mod memory;
pub mod remote;

/// The remote table of entries.
pub trait EntryStore {
    /// All entries, newest-created first.
    fn list(&self) -> Result<Vec<Entry>>;

    /// Inserts a new entry and returns it with its assigned id.
    fn create(&mut self, entry: &NewEntry) -> Result<Entry>;
}

/// Object storage for cover images.
pub trait BlobStore {
    /// Stores the image and returns a URL the cover can be displayed from.
    fn upload(&mut self, cover: &CoverUpload) -> Result<String>;
}

/// The configured backend.
pub enum Backend {
    Local(fs::FileStore),
    Remote(remote::RemoteStore),
}

impl Backend {
    pub fn describe(&self) -> String {
        match self {
            Backend::Local(store) => format!("local ({})", store.root().display()),
            Backend::Remote(store) => format!("remote ({})", store.base_url()),
        }
    }
}

impl EntryStore for Backend {
    fn list(&self) -> Result<Vec<Entry>> {
        match self {
            Backend::Local(store) => store.list(),
            Backend::Remote(store) => store.list(),
        }
    }

    fn create(&mut self, entry: &NewEntry) -> Result<Entry> {
        match self {
            Backend::Local(store) => store.create(entry),
            Backend::Remote(store) => store.create(entry),
        }
    }
}

impl BlobStore for Backend {
    fn upload(&mut self, cover: &CoverUpload) -> Result<String> {
        match self {
            Backend::Local(store) => store.upload(cover),
            Backend::Remote(store) => store.upload(cover),
        }
    }
}
