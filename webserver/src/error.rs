//! WebServer-specific error types

use thiserror::Error;
use chaos::ChaosError;
use shared::SharedError;

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("Server startup error: {0}")]
    ServerStartup(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Chaos layer error: {0}")]
    Chaos(#[from] ChaosError),

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl WebServerError {
    pub fn config(message: impl Into<String>) -> Self {
        WebServerError::Config(message.into())
    }
}

pub type WebServerResult<T> = Result<T, WebServerError>;
