//! # Context Setup
//!
//! Setup runs in two steps:
//!
//! 1. [`Settings::load`] resolves where lily reads its configuration and keeps its
//!    data, and loads the configuration. Nothing here touches a store, so
//!    `config` and `theme` work even when the backend is misconfigured.
//! 2. [`Settings::connect`] builds the configured backend and the API over it.
//!
//! ## Directories
//!
//! - **Config**: `$LILY_CONFIG_DIR` if set, else the OS config directory
//!   (`directories::ProjectDirs`). Holds `lily.toml`.
//! - **Data**: `data_dir` from the configuration (`LILY_DATA_DIR`), else the OS
//!   data directory. Holds the local store and `prefs.json`.
//!
//! Both environment overrides exist mainly so tests can isolate state.

use crate::api::LilyApi;
use crate::commands::config::ConfigAction;
use crate::commands::theme::ThemeAction;
use crate::commands::{self, CmdResult};
use crate::config::LilyConfig;
use crate::error::{LilyError, Result};
use crate::store::Backend;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct LilyContext {
    pub api: LilyApi<Backend>,
    pub config: LilyConfig,
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "lily", "lily")
        .ok_or_else(|| LilyError::Config("Could not determine home directory".to_string()))
}

pub fn config_dir() -> Result<PathBuf> {
    match std::env::var_os("LILY_CONFIG_DIR") {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => Ok(project_dirs()?.config_dir().to_path_buf()),
    }
}

pub fn default_data_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().to_path_buf())
}

/// Resolved configuration and directories, before any store exists.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: LilyConfig,
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl Settings {
    /// Loads the configuration from the environment and `lily.toml`.
    pub fn load() -> Result<Self> {
        let config_dir = config_dir()?;
        let config = LilyConfig::load(&config_dir)?;
        let data_dir = resolve_data_dir(&config)?;
        Ok(Self {
            config,
            config_dir,
            data_dir,
        })
    }

    /// Builds the backend and the API over it.
    pub fn connect(&self) -> Result<LilyContext> {
        initialize_with(
            self.config.clone(),
            self.config_dir.clone(),
            self.data_dir.clone(),
        )
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.config, action)
    }

    pub fn theme(&self, action: ThemeAction) -> Result<CmdResult> {
        commands::theme::run(&self.data_dir, action)
    }
}

/// Builds the context from an already loaded configuration.
pub fn initialize_with(
    config: LilyConfig,
    config_dir: PathBuf,
    data_dir: PathBuf,
) -> Result<LilyContext> {
    let backend = config.build_backend(&data_dir)?;
    debug!(
        backend = %backend.describe(),
        config_dir = %config_dir.display(),
        "initialized lily context"
    );
    let api = LilyApi::new(backend, config.clone());
    Ok(LilyContext {
        api,
        config,
        config_dir,
        data_dir,
    })
}

/// The data directory the context would use for `config`, without building a backend.
pub fn resolve_data_dir(config: &LilyConfig) -> Result<PathBuf> {
    match &config.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => default_data_dir(),
    }
}

/// True when `dir` already holds a `lily.toml`.
pub fn has_config_file(dir: &Path) -> bool {
    dir.join(crate::config::CONFIG_FILENAME).exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendKind;
    use crate::filter::FilterCriteria;
    use tempfile::tempdir;

    #[test]
    fn test_initialize_local_backend() {
        let config_dir = tempdir().unwrap();
        let data_dir = tempdir().unwrap();

        let ctx = initialize_with(
            LilyConfig::default(),
            config_dir.path().to_path_buf(),
            data_dir.path().to_path_buf(),
        )
        .unwrap();

        assert!(matches!(ctx.api.store(), Backend::Local(_)));
        assert_eq!(ctx.data_dir, data_dir.path());
        let result = ctx.api.list(&FilterCriteria::default()).unwrap();
        assert!(result.listed_entries.is_empty());
        assert!(!has_config_file(config_dir.path()));
    }

    #[test]
    fn test_initialize_remote_without_credentials_fails() {
        let dir = tempdir().unwrap();
        let config = LilyConfig {
            backend: BackendKind::Remote,
            ..Default::default()
        };
        let result = initialize_with(config, dir.path().to_path_buf(), dir.path().to_path_buf());
        assert!(matches!(result, Err(LilyError::Config(_))));
    }

    fn remote_settings(dir: &Path) -> Settings {
        Settings {
            config: LilyConfig {
                backend: BackendKind::Remote,
                ..Default::default()
            },
            config_dir: dir.to_path_buf(),
            data_dir: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_settings_work_without_a_backend() {
        let dir = tempdir().unwrap();
        let settings = remote_settings(dir.path());
        assert!(settings.connect().is_err());

        let shown = settings.config(ConfigAction::Show).unwrap();
        assert_eq!(shown.config.unwrap().backend, BackendKind::Remote);
        let template = settings.config(ConfigAction::Template).unwrap();
        assert!(template.config_template.unwrap().contains("[remote]"));

        settings
            .theme(ThemeAction::Set(crate::prefs::ThemeMode::Dark))
            .unwrap();
        assert!(dir.path().join(crate::prefs::PREFS_FILENAME).exists());
    }

    #[test]
    fn test_connect_local_settings() {
        let config_dir = tempdir().unwrap();
        let data_dir = tempdir().unwrap();
        let settings = Settings {
            config: LilyConfig::default(),
            config_dir: config_dir.path().to_path_buf(),
            data_dir: data_dir.path().to_path_buf(),
        };

        let ctx = settings.connect().unwrap();
        assert_eq!(ctx.data_dir, settings.data_dir);
        assert!(matches!(ctx.api.store(), Backend::Local(_)));
    }

    #[test]
    fn test_resolve_data_dir_prefers_config() {
        let config = LilyConfig {
            data_dir: Some(PathBuf::from("/srv/lily")),
            ..Default::default()
        };
        assert_eq!(resolve_data_dir(&config).unwrap(), PathBuf::from("/srv/lily"));
    }
}
