//! # lily Architecture
//!
//! lily is a **personal media catalog library**: manga, novels, films and animation,
//! each with a rating, tags, a note and a cover. The `lily` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (crates/lily)                                          │
//! │  - Parses arguments, renders templates, handles terminal    │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Thin facade over commands                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - list / create / export / stats / config / theme          │
//! └─────────────────────────────────────────────────────────────┘
//!          │                                     │
//!          ▼                                     ▼
//! ┌──────────────────────────┐   ┌──────────────────────────────┐
//! │  Engine (filter, summary)│   │  Stores (store/)             │
//! │  - pure, no I/O          │   │  - EntryStore + BlobStore    │
//! └──────────────────────────┘   │  - remote / local / memory   │
//!                                └──────────────────────────────┘
//! ```
//!
//! ## The Engine
//!
//! [`filter::filter`] narrows the collection by category, rating and search text;
//! [`summary::summarize`] counts the whole collection. Both borrow their input, never
//! mutate it and never fail. Everything stateful (the loaded collection, the active
//! criteria) is an explicit value handed in by the caller.
//!
//! ## Testing Strategy
//!
//! 1. **Engine and model**: unit tests next to the code.
//! 2. **Commands**: run against [`store::memory::InMemoryStore`], including its
//!    failure switches.
//! 3. **API**: dispatch only.
//! 4. **Integration** (`tests/`): the file store end to end through [`api::LilyApi`].
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each command
//! - [`filter`] / [`summary`]: The query and aggregation engine
//! - [`model`]: `Entry`, `Category`, `Rating`
//! - [`draft`]: The entry editor
//! - [`tags`]: Tag text parsing
//! - [`store`]: Store traits and backends
//! - [`config`]: `lily.toml` and environment configuration
//! - [`prefs`]: Persisted theme preference
//! - [`init`]: Directory resolution and context wiring
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod draft;
pub mod error;
pub mod filter;
pub mod init;
pub mod model;
pub mod prefs;
pub mod store;
pub mod summary;
pub mod tags;
