use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Network Error: {0}")]
    Network(String),

    #[error("Bridge Protocol Error: {0}")]
    Protocol(String),

    #[error("File I/O Error: {0}")]
    Io(String),

    #[error("State File Error: {0}")]
    StateFormat(String),
}

// Allow conversion from std::io::Error to AppError::Io
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Protocol(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Protocol(err.to_string())
    }
}

/// Validation failures shown to whoever is setting a camera up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("status-not-found")]
    StatusNotFound,

    #[error("unsupported-model")]
    UnsupportedModel(String),

    #[error("already-configured")]
    AlreadyConfigured(String),
}

impl SetupError {
    pub fn code(&self) -> &'static str {
        match self {
            SetupError::StatusNotFound => "status-not-found",
            SetupError::UnsupportedModel(_) => "unsupported-model",
            SetupError::AlreadyConfigured(_) => "already-configured",
        }
    }
}
