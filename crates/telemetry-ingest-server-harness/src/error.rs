use thiserror::Error;

/// Errors that can occur during harness execution
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Bind error: {0}")]
    BindError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
