//! Log setup. Standard output carries the protocol, so every log line goes
//! to standard error.

use crate::core::error::AgentError;
use is_terminal::IsTerminal;
use std::io;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over `default_filter`.
pub fn init(default_filter: &str) -> Result<(), AgentError> {
    let filter = build_filter(std::env::var("RUST_LOG").ok().as_deref(), default_filter)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init()
        .map_err(|e| AgentError::Config(format!("failed to install log subscriber: {}", e)))
}

fn build_filter(env_filter: Option<&str>, default_filter: &str) -> Result<EnvFilter, AgentError> {
    let directives = env_filter
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(default_filter);

    EnvFilter::try_new(directives)
        .map_err(|e| AgentError::Config(format!("invalid log filter '{}': {}", directives, e)))
}
