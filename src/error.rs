use thiserror::Error;

/// Failures talking to the remote resource collection.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("could not decode response: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Rendering-surface failures. Fatal for the render in progress,
/// logged by the caller, never retried.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("missing mount point `{0}`")]
    MissingMount(String),
    #[error("surface io failed: {0}")]
    Io(#[from] std::io::Error),
}
