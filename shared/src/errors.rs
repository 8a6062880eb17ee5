//! Shared error types for the chaos layer workspace

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("Failed to read configuration file {path}: {message}")]
    ConfigRead { path: String, message: String },

    #[error("Failed to parse configuration: {message}")]
    ConfigParse { message: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
