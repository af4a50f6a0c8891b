use thiserror::Error;

/// Failures that abort loading. Lookup misses are not errors; they come
/// back as `None` and are logged.
#[derive(Error, Debug)]
pub enum VocationError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid definitions document: {0}")]
    InvalidDocument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Vocation registry already initialized")]
    AlreadyInitialized,
}

pub type Result<T> = std::result::Result<T, VocationError>;
