use thiserror::Error;

#[derive(Error, Debug)]
pub enum SsoError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Prompt failed: {0}")]
    Prompt(dialoguer::Error),

    #[error("Setup aborted")]
    Cancelled,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Interactive setup requires a terminal")]
    NotATerminal,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SsoError>;
