use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::prefs::{Preferences, ThemeMode};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    Show,
    Set(ThemeMode),
    /// Flips the stored theme. With nothing stored, `current` is the
    /// theme in effect (detected from the terminal).
    Toggle { current: ThemeMode },
}

pub fn run(prefs_dir: &Path, action: ThemeAction) -> Result<CmdResult> {
    let mut prefs = Preferences::load(prefs_dir)?;
    let mut result = CmdResult::default();

    match action {
        ThemeAction::Show => {}
        ThemeAction::Set(mode) => {
            prefs.theme = Some(mode);
            prefs.save(prefs_dir)?;
            result.add_message(CmdMessage::success(format!("Theme set to {}", mode)));
        }
        ThemeAction::Toggle { current } => {
            let next = prefs.theme.unwrap_or(current).toggled();
            prefs.theme = Some(next);
            prefs.save(prefs_dir)?;
            result.add_message(CmdMessage::success(format!("Theme set to {}", next)));
        }
    }

    result.preferences = Some(prefs);
    Ok(result)
}
