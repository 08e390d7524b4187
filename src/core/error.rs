use std::io;
use thiserror::Error;

/// Unified error type for the mmate client
#[derive(Error, Debug)]
pub enum MmateError {
    /// The chat backend answered with something other than a reply
    #[error("API error: {0}")]
    Api(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// User input errors
    #[error("Input error: {0}")]
    Input(String),

    /// IO-related errors
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Network-related errors
    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for MmateError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MmateError::Network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            MmateError::Network(format!("Connection failed: {}", err))
        } else if err.is_status() {
            MmateError::Api(format!("Backend returned error status: {}", err))
        } else if err.is_decode() {
            MmateError::Serialization(format!("Undecodable response: {}", err))
        } else {
            MmateError::Network(format!("Request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for MmateError {
    fn from(err: serde_json::Error) -> Self {
        MmateError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<serde_yml::Error> for MmateError {
    fn from(err: serde_yml::Error) -> Self {
        MmateError::Serialization(format!("YAML error: {}", err))
    }
}
