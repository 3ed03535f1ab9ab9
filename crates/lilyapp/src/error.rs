use thiserror::Error;

/// Errors surfaced by the lily library.
///
/// The filter/summary engine never produces these; they come from the stores,
/// the entry editor and configuration loading.
#[derive(Error, Debug)]
pub enum LilyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Cover upload failed: {0}")]
    Upload(String),

    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, LilyError>;
