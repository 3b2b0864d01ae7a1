use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("Persistence fault: {0}")]
    Persistence(String),

    #[error(transparent)]
    Content(#[from] crate::content::ContentError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TerminalError>;
