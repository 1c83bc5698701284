use thiserror::Error;

pub type MedialocResult<T> = Result<T, MedialocError>;

/// Failures at the fallible edges: config files and encoded descriptors.
///
/// Resolution itself never errors; an unresolvable descriptor is `None`.
#[derive(Debug, Error)]
pub enum MedialocError {
    #[error("config error: {0}")]
    Config(String),

    #[error("descriptor error: {0}")]
    Descriptor(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
