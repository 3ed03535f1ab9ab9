//! # CLI Templates
//!
//! Terminal output is rendered from minijinja templates through `outstanding`.
//! Templates live in their own files under `templates/` so they are easy to edit
//! and diff, and are embedded here as string constants.
//!
//! Conventions:
//!
//! 1. Line breaks are explicit (`{{ "\n" }}`) and tags trim their surroundings
//!    (`{%- ... -%}`), so the template layout never leaks into the output.
//! 2. Templates only pick style names. Widths, padding, icons and relative
//!    times are computed in `render.rs`.
//! 3. A style that depends on the data (a rating badge) is passed in as a
//!    field and used directly, as in `style(e.rating_style)`.

pub const LIST_TEMPLATE: &str = include_str!("templates/list.tmp");
pub const SUMMARY_TEMPLATE: &str = include_str!("templates/summary.tmp");
pub const STATS_TEMPLATE: &str = include_str!("templates/stats.tmp");
pub const CONFIG_TEMPLATE: &str = include_str!("templates/config.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
