use crate::commands::CmdResult;
use crate::config::LilyConfig;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    Show,
    Template,
}

pub fn run(config: &LilyConfig, action: ConfigAction) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match action {
        ConfigAction::Show => result.config = Some(config.redacted()),
        ConfigAction::Template => result.config_template = Some(LilyConfig::template()),
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_masks_key() {
        let mut config = LilyConfig::default();
        config.remote.anon_key = Some("abcdefgh".to_string());
        let result = run(&config, ConfigAction::Show).unwrap();
        let shown = result.config.unwrap();
        assert_eq!(shown.remote.anon_key.as_deref(), Some("abcd…"));
        assert!(result.config_template.is_none());
    }

    #[test]
    fn test_template() {
        let result = run(&LilyConfig::default(), ConfigAction::Template).unwrap();
        assert!(result.config.is_none());
        assert!(result.config_template.unwrap().contains("timeout_secs"));
    }
}
