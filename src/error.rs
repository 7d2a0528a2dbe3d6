use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from the terminal or log/config files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Invalid configuration value (bad server URL, log directive, ...).
    #[error("Config error: {0}")]
    Config(String),

    /// The snapshot payload does not match the disk/partition/node contract.
    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),

    /// An explorer path that does not address any node in the snapshot.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The command endpoint could not be reached or answered with a failure.
    #[error("Transport failure: {0}")]
    Transport(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedSnapshot(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}
