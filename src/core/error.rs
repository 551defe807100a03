use std::io;
use thiserror::Error;

/// Unified error type for the weather agent service
#[derive(Error, Debug)]
pub enum AgentError {
    /// Backend API errors (Ollama, OpenAI-compatible endpoints)
    #[error("API error: {0}")]
    Api(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request validation errors
    #[error("{0}")]
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

    /// Backend call exceeded the configured deadline
    #[error("Request timed out after {0}s")]
    Timeout(u64),
}

impl From<reqwest::Error> for AgentError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AgentError::Network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            AgentError::Network(format!("Connection failed: {}", err))
        } else if err.is_status() {
            AgentError::Api(format!("API returned error status: {}", err))
        } else {
            AgentError::Network(format!("Request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for AgentError {
    fn from(err: serde_json::Error) -> Self {
        AgentError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<serde_yml::Error> for AgentError {
    fn from(err: serde_yml::Error) -> Self {
        AgentError::Serialization(format!("YAML error: {}", err))
    }
}
