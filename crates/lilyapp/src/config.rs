//! # Configuration
//!
//! lily configuration is managed by [`confique`], which layers environment
//! variables over a TOML file over compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `LILY_BACKEND`, `LILY_DATA_DIR`, `LILY_REMOTE_URL`,
//!    `LILY_REMOTE_KEY`.
//! 2. **Config file**: `lily.toml` in the config directory (`$LILY_CONFIG_DIR`, else the
//!    OS-appropriate config directory via the `directories` crate).
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `backend` | `local` | `local` (directory store) or `remote` (hosted table + bucket) |
//! | `data_dir` | OS data dir | Where the local store and preferences live |
//! | `default_cover_url` | placeholder image | Cover used when none is given |
//! | `remote.url` | none | Project URL of the hosted backend |
//! | `remote.anon_key` | none | Public (anon) API key |
//! | `remote.table` | `items` | Table holding entries |
//! | `remote.bucket` | `covers` | Bucket holding cover images |
//! | `remote.timeout_secs` | `30` | Per-request timeout |
//!
//! ## CLI Usage
//!
//! - `lily config`: show the resolved configuration (the key is masked).
//! - `lily config template`: print a commented sample `lily.toml`.

use crate::error::{LilyError, Result};
use crate::model::DEFAULT_COVER_URL;
use crate::store::fs::FileStore;
use crate::store::remote::RemoteStore;
use crate::store::Backend;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "lily.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Local,
    Remote,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Local => f.write_str("local"),
            BackendKind::Remote => f.write_str("remote"),
        }
    }
}

/// Configuration for lily, stored in `lily.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LilyConfig {
    /// Which store to use: "local" keeps everything in `data_dir`,
    /// "remote" talks to the hosted table and bucket configured below.
    #[config(env = "LILY_BACKEND", default = "local")]
    pub backend: BackendKind,

    /// Directory for the local store and preferences.
    /// When absent, the OS data directory is used.
    #[config(env = "LILY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Cover image shown for entries created without one.
    #[config(
        default = "https://images.unsplash.com/photo-1543002588-bfa74002ed7e?auto=format&fit=crop&q=80&w=200&h=300"
    )]
    pub default_cover_url: String,

    #[config(nested)]
    pub remote: RemoteConfig,
}

/// Hosted backend connection.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    /// Project URL, e.g. "https://abcd.supabase.co".
    #[config(env = "LILY_REMOTE_URL")]
    pub url: Option<String>,

    /// Public (anon) API key of the project.
    #[config(env = "LILY_REMOTE_KEY")]
    pub anon_key: Option<String>,

    #[config(default = "items")]
    pub table: String,

    #[config(default = "covers")]
    pub bucket: String,

    /// Request timeout in seconds.
    #[config(default = 30)]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            table: "items".to_string(),
            bucket: "covers".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for LilyConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Local,
            data_dir: None,
            default_cover_url: DEFAULT_COVER_URL.to_string(),
            remote: RemoteConfig::default(),
        }
    }
}

impl LilyConfig {
    /// Loads env + `<config_dir>/lily.toml` + defaults. A missing file is not an error.
    pub fn load(config_dir: &Path) -> Result<Self> {
        Self::builder()
            .env()
            .file(config_dir.join(CONFIG_FILENAME))
            .load()
            .map_err(|e| LilyError::Config(e.to_string()))
    }

    /// A commented `lily.toml` listing every setting with its default.
    pub fn template() -> String {
        confique::toml::template::<LilyConfig>(confique::toml::FormatOptions::default())
    }

    /// Copy safe to print: the API key is masked.
    pub fn redacted(&self) -> Self {
        let mut shown = self.clone();
        if let Some(key) = shown.remote.anon_key.as_mut() {
            *key = mask(key);
        }
        shown
    }

    pub fn build_backend(&self, data_dir: &Path) -> Result<Backend> {
        match self.backend {
            BackendKind::Local => Ok(Backend::Local(FileStore::new(data_dir))),
            BackendKind::Remote => Ok(Backend::Remote(RemoteStore::new(&self.remote)?)),
        }
    }
}

fn mask(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    format!("{}…", visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = LilyConfig::default();
        assert_eq!(config.backend, BackendKind::Local);
        assert_eq!(config.default_cover_url, DEFAULT_COVER_URL);
        assert_eq!(config.remote.table, "items");
        assert_eq!(config.remote.bucket, "covers");
        assert_eq!(config.remote.timeout_secs, 30);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"
backend = "remote"

[remote]
url = "https://abcd.example.co"
anon_key = "public-key"
bucket = "posters"
"#,
        )
        .unwrap();

        let config = LilyConfig::load(dir.path()).unwrap();
        assert_eq!(config.backend, BackendKind::Remote);
        assert_eq!(config.remote.url.as_deref(), Some("https://abcd.example.co"));
        assert_eq!(config.remote.bucket, "posters");
        assert_eq!(config.remote.table, "items");
    }

    #[test]
    fn test_load_rejects_unknown_backend() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "backend = \"cloud\"\n").unwrap();
        assert!(matches!(
            LilyConfig::load(dir.path()),
            Err(LilyError::Config(_))
        ));
    }

    #[test]
    fn test_template_is_valid_toml() {
        let template = LilyConfig::template();
        assert!(template.contains("backend"));
        assert!(template.contains("[remote]"));
        let parsed: std::result::Result<toml::Value, _> = toml::from_str(&template);
        assert!(parsed.is_ok());
    }

    #[test]
    fn test_redacted_masks_key() {
        let mut config = LilyConfig::default();
        config.remote.anon_key = Some("eyJhbGciOiJIUzI1NiJ9.secret".to_string());
        let shown = config.redacted();
        assert_eq!(shown.remote.anon_key.as_deref(), Some("eyJh…"));
    }

    #[test]
    fn test_remote_backend_requires_credentials() {
        let config = LilyConfig {
            backend: BackendKind::Remote,
            ..Default::default()
        };
        let dir = tempdir().unwrap();
        assert!(matches!(
            config.build_backend(dir.path()),
            Err(LilyError::Config(_))
        ));
    }

    #[test]
    fn test_local_backend() {
        let dir = tempdir().unwrap();
        let backend = LilyConfig::default().build_backend(dir.path()).unwrap();
        assert!(matches!(backend, Backend::Local(_)));
    }
}
