use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("sprite `{0}` requested before loading finished")]
    NotLoaded(&'static str),
    #[error("failed to load `{path}`: {reason}")]
    LoadFailed { path: &'static str, reason: String },
    #[error("sprite loader stopped before every sprite arrived")]
    Disconnected,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
