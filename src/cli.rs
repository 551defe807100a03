use clap::Parser;
use std::path::PathBuf;

/// Line-delimited JSON weather assistant service (requests on stdin, replies on stdout)
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a YAML config file [default: ~/.weather-agent/config.yaml]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Backend provider [possible values: ollama, openai, openrouter, deepseek]
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Model to use (provider-specific)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Override the provider's base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Give up on a backend call after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Log filter used when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}
