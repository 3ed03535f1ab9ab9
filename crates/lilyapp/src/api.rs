//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every lily operation, whatever the UI.
//!
//! The facade:
//! - **Dispatches** to the matching `commands::*::run`
//! - **Supplies context** the commands need (the default cover)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It holds no business logic, does no terminal I/O and formats nothing.
//!
//! ## Generic Over the Stores
//!
//! `LilyApi<S: EntryStore + BlobStore>`:
//! - Production: `LilyApi<Backend>` (local directory or hosted backend)
//! - Testing: `LilyApi<InMemoryStore>`
//!
//! `config` and `theme` need no store and are reached through
//! [`Settings`](crate::init::Settings) instead.
//!
//! API tests check that calls reach the right command with the right context;
//! command behaviour is tested in the command modules.

use crate::commands;
use crate::config::LilyConfig;
use crate::draft::EntryDraft;
use crate::error::Result;
use crate::filter::FilterCriteria;
use crate::store::{BlobStore, EntryStore};
use std::path::Path;

pub struct LilyApi<S: EntryStore + BlobStore> {
    store: S,
    config: LilyConfig,
}

impl<S: EntryStore + BlobStore> LilyApi<S> {
    pub fn new(store: S, config: LilyConfig) -> Self {
        Self { store, config }
    }

    pub fn list(&self, criteria: &FilterCriteria) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, criteria)
    }

    pub fn create(&mut self, draft: EntryDraft) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.store, draft, &self.config.default_cover_url)
    }

    pub fn export(&self, dir: &Path) -> Result<commands::CmdResult> {
        commands::export::run(&self.store, dir)
    }

    pub fn stats(&self) -> Result<commands::CmdResult> {
        commands::stats::run(&self.store)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &LilyConfig {
        &self.config
    }
}
