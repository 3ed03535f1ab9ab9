//! # CLI Behavior
//!
//! This is **one possible UI client** for lilyapp, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes and output formatting.
//!
//! ## Naked Execution (`lily`)
//!
//! Running `lily` with no arguments is `lily list`: the summary strip, then the whole
//! collection newest first.
//!
//! ## Filtering
//!
//! `lily list` takes the three criteria as flags (`-c`, `-r`, `-s`); omitting one
//! means "any". `lily search <TERM...>` is `lily list -s "<TERM...>"`.
//! The summary always counts the whole collection.
//!
//! ## Themes
//!
//! Output uses a light or a dark palette. The choice stored with `lily theme` wins;
//! without one the terminal background is detected.
//!
//! ## Module Structure
//!
//! - `commands`: Dispatch and per-command handlers
//! - `logging`: `tracing` subscriber setup
//! - `render`: `CmdResult` to template data, and rendering
//! - `setup`: Argument parsing via clap
//! - `styles`: Light and dark themes
//! - `templates`: Embedded output templates

mod commands;
mod logging;
mod render;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;
