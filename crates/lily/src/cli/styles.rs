//! Styles for the lily CLI.
//!
//! Output goes through `outstanding` templates that only ever name styles
//! semantically (`card-title`, `rating-bible`, `time`). The palettes below turn
//! those names into colours, once for light terminals and once for dark ones.
//!
//! Styles come in two layers:
//!
//! 1. Shared tokens (`regular`, `muted`, `faint`, `accent`) define the palette.
//! 2. Semantic names used by templates are built from those tokens, so the two
//!    themes differ only in the token values.
//!
//! Each rating has its own badge style (`rating-<token>`), looked up by name in
//! `render.rs` with [`rating_style`].

use console::Style;
use lilyapp::model::Rating;
use lilyapp::prefs::ThemeMode;
use once_cell::sync::Lazy;
use outstanding::{rgb_to_ansi256, Theme};

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const REGULAR: &str = "regular";
    pub const MUTED: &str = "muted";
    pub const FAINT: &str = "faint";
    pub const ACCENT: &str = "accent";
    pub const ERROR: &str = "error";
    pub const WARNING: &str = "warning";
    pub const SUCCESS: &str = "success";
    pub const INFO: &str = "info";
    pub const TIME: &str = "time";
    // Entry cards
    pub const CARD_TITLE: &str = "card-title";
    pub const CARD_AUTHOR: &str = "card-author";
    pub const CARD_CATEGORY: &str = "card-category";
    pub const CARD_NOTE: &str = "card-note";
    pub const CARD_TAG: &str = "card-tag";
    // Summary strip
    pub const SUMMARY_LABEL: &str = "summary-label";
    pub const SUMMARY_VALUE: &str = "summary-value";
    // Rating badges
    pub const RATING_BIBLE: &str = "rating-bible";
    pub const RATING_TOP_TIER: &str = "rating-top-tier";
    pub const RATING_STRICT: &str = "rating-strict";
    pub const RATING_ORDINARY: &str = "rating-ordinary";
    pub const RATING_MYSTERIOUS: &str = "rating-mysterious";
    pub const RATING_DESTINY: &str = "rating-destiny";
}

pub fn rating_style(rating: Rating) -> &'static str {
    match rating {
        Rating::Bible => names::RATING_BIBLE,
        Rating::TopTier => names::RATING_TOP_TIER,
        Rating::Strict => names::RATING_STRICT,
        Rating::Ordinary => names::RATING_ORDINARY,
        Rating::Mysterious => names::RATING_MYSTERIOUS,
        Rating::Destiny => names::RATING_DESTINY,
    }
}

static LIGHT_THEME: Lazy<Theme> = Lazy::new(build_light_theme);
static DARK_THEME: Lazy<Theme> = Lazy::new(build_dark_theme);

pub fn theme_for(mode: ThemeMode) -> &'static Theme {
    match mode {
        ThemeMode::Light => &LIGHT_THEME,
        ThemeMode::Dark => &DARK_THEME,
    }
}

/// The terminal's background, when it can be detected. Unknown counts as light.
pub fn detect_mode() -> ThemeMode {
    match dark_light::detect() {
        dark_light::Mode::Dark => ThemeMode::Dark,
        _ => ThemeMode::Light,
    }
}

/// Palette values that differ between light and dark terminals.
struct Palette {
    regular: Style,
    muted: Style,
    faint: Style,
    accent: Style,
    bible: Style,
    top_tier: Style,
    strict: Style,
    mysterious: Style,
    destiny: Style,
    tag: Style,
}

fn build_light_theme() -> Theme {
    build_theme(Palette {
        regular: Style::new().black(),
        muted: Style::new().color256(rgb_to_ansi256((115, 115, 115))),
        faint: Style::new().color256(rgb_to_ansi256((173, 173, 173))),
        accent: Style::new().color256(rgb_to_ansi256((214, 51, 132))),
        bible: Style::new().color256(rgb_to_ansi256((196, 140, 0))).bold(),
        top_tier: Style::new().color256(rgb_to_ansi256((190, 24, 93))),
        strict: Style::new().color256(rgb_to_ansi256((71, 85, 105))),
        mysterious: Style::new().color256(rgb_to_ansi256((109, 40, 217))),
        destiny: Style::new().color256(rgb_to_ansi256((13, 148, 136))),
        tag: Style::new().color256(rgb_to_ansi256((0, 95, 175))),
    })
}

fn build_dark_theme() -> Theme {
    build_theme(Palette {
        regular: Style::new().white(),
        muted: Style::new().color256(rgb_to_ansi256((180, 180, 180))),
        faint: Style::new().color256(rgb_to_ansi256((110, 110, 110))),
        accent: Style::new().color256(rgb_to_ansi256((244, 114, 182))),
        bible: Style::new().color256(rgb_to_ansi256((255, 214, 10))).bold(),
        top_tier: Style::new().color256(rgb_to_ansi256((251, 113, 133))),
        strict: Style::new().color256(rgb_to_ansi256((148, 163, 184))),
        mysterious: Style::new().color256(rgb_to_ansi256((167, 139, 250))),
        destiny: Style::new().color256(rgb_to_ansi256((94, 234, 212))),
        tag: Style::new().color256(rgb_to_ansi256((125, 211, 252))),
    })
}

fn build_theme(p: Palette) -> Theme {
    Theme::new()
        .add(names::REGULAR, p.regular.clone())
        .add(names::MUTED, p.muted.clone())
        .add(names::FAINT, p.faint.clone())
        .add(names::ACCENT, p.accent.clone())
        .add(names::ERROR, Style::new().red().bold())
        .add(names::WARNING, Style::new().yellow().bold())
        .add(names::SUCCESS, Style::new().green())
        .add(names::INFO, p.muted.clone())
        .add(names::TIME, p.muted.clone().italic())
        .add(names::CARD_TITLE, p.regular.clone().bold())
        .add(names::CARD_AUTHOR, p.muted.clone())
        .add(names::CARD_CATEGORY, p.accent.clone())
        .add(names::CARD_NOTE, p.muted.clone().italic())
        .add(names::CARD_TAG, p.tag)
        .add(names::SUMMARY_LABEL, p.faint)
        .add(names::SUMMARY_VALUE, p.accent.bold())
        .add(names::RATING_BIBLE, p.bible)
        .add(names::RATING_TOP_TIER, p.top_tier)
        .add(names::RATING_STRICT, p.strict)
        .add(names::RATING_ORDINARY, p.muted)
        .add(names::RATING_MYSTERIOUS, p.mysterious)
        .add(names::RATING_DESTINY, p.destiny)
}
