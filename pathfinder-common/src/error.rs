use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum PathfinderError {
    #[error("I/O Error: {0}")]
    Io(#[from] Arc<std::io::Error>),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] Arc<serde_json::Error>),

    #[error("Configuration Error: {0}")]
    Config(String),
}

impl From<std::io::Error> for PathfinderError {
    fn from(err: std::io::Error) -> Self {
        PathfinderError::Io(Arc::new(err))
    }
}

impl From<serde_json::Error> for PathfinderError {
    fn from(err: serde_json::Error) -> Self {
        PathfinderError::Json(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, PathfinderError>;
