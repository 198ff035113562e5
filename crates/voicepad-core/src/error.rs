use thiserror::Error;

/// Top-level error type for the VoicePad system.
///
/// Each variant wraps a subsystem-specific failure. Subsystem crates return
/// `VoicepadError` directly so that the `?` operator works across crate
/// boundaries without adapter code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VoicepadError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Speech capability unavailable: {0}")]
    CapabilityUnavailable(String),

    #[error("Recognition error: {0}")]
    Recognition(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for VoicepadError {
    fn from(err: toml::de::Error) -> Self {
        VoicepadError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for VoicepadError {
    fn from(err: toml::ser::Error) -> Self {
        VoicepadError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for VoicepadError {
    fn from(err: serde_json::Error) -> Self {
        VoicepadError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for VoicePad operations.
pub type Result<T> = std::result::Result<T, VoicepadError>;
