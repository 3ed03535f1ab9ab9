//! # lily CLI Architecture
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/lilyapp/`: UI-agnostic library (engine, stores, commands, API)
//! - `crates/lily/`: this CLI, one client of `lilyapp`
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/lily/src/cli/)                           │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Terminal rendering via outstanding templates (render.rs) │
//! │  - Logging initialisation (logging.rs)                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/lilyapp/src/api.rs)                      │
//! │  - Dispatches to command modules                            │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The CLI owns every user-facing concern: argument parsing, theme selection,
//! rendering, stderr logging and exit codes.
//!
//! ## Rendering with Outstanding
//!
//! Templates live in `src/cli/templates/` and are embedded with `include_str!()`.
//! `render.rs` turns `CmdResult` data into flat template structs (widths, icons,
//! relative times are computed in Rust) and the templates pick styles by name.
//!
//! ## Testing Approach
//!
//! - Argument parsing: `Cli::try_parse_from` in `setup.rs` tests.
//! - Rendering: canned entries rendered with colour off in `render.rs` tests.
//! - End to end: `tests/cli_e2e.rs` runs the binary against a temp data directory.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
