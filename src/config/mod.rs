use crate::cli::Args;
use crate::core::error::AgentError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Ollama,
    OpenAI,
    OpenRouter,
    DeepSeek,
}

impl Provider {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::Ollama => crate::providers::ollama::DEFAULT_OLLAMA_URL,
            Provider::OpenAI => "https://api.openai.com/v1",
            Provider::OpenRouter => "https://openrouter.ai/api/v1",
            Provider::DeepSeek => "https://api.deepseek.com/v1",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Ollama => "llama3.2",
            Provider::OpenAI => "gpt-4.1-mini",
            Provider::OpenRouter => "google/gemini-2.0-flash-001",
            Provider::DeepSeek => "deepseek-chat",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Ollama => "ollama",
            Provider::OpenAI => "openai",
            Provider::OpenRouter => "openrouter",
            Provider::DeepSeek => "deepseek",
        }
    }
}

impl FromStr for Provider {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ollama" => Ok(Provider::Ollama),
            "openai" => Ok(Provider::OpenAI),
            "openrouter" => Ok(Provider::OpenRouter),
            "deepseek" => Ok(Provider::DeepSeek),
            other => Err(AgentError::Config(format!("Unknown provider: {}", other))),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub active_provider: Option<Provider>,
    pub providers: HashMap<Provider, ProviderConfig>,
    pub request_timeout_secs: Option<u64>,
    pub log_level: Option<String>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".weather-agent")
            .join("config.yaml")
    }

    /// Read the YAML layer. An explicit path must exist; the default one may not.
    pub fn load(explicit: Option<&Path>) -> Result<Config, AgentError> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(AgentError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                path.to_path_buf()
            }
            None => {
                let path = Self::default_path();
                if !path.exists() {
                    return Ok(Config::default());
                }
                path
            }
        };

        let contents = fs::read_to_string(&path)?;
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_yml::from_str::<Config>(&contents)
            .map_err(|e| AgentError::Config(format!("Parse {}: {}", path.display(), e)))
    }

    /// Full layering: file, then `.env`/process environment, then flags.
    pub fn resolve(args: &Args) -> Result<Config, AgentError> {
        let mut config = Self::load(args.config.as_deref())?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.apply_args(args)?;
        Ok(config)
    }

    pub fn provider(&self) -> Provider {
        self.active_provider.unwrap_or_default()
    }

    fn active_entry(&mut self) -> &mut ProviderConfig {
        let provider = self.provider();
        self.providers.entry(provider).or_default()
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), AgentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(provider) = lookup("WEATHER_AGENT_PROVIDER") {
            self.active_provider = Some(provider.parse()?);
        }
        if let Some(model) = lookup("MODEL") {
            self.active_entry().model = Some(model);
        }
        if let Some(base_url) = lookup("WEATHER_AGENT_BASE_URL") {
            self.active_entry().base_url = Some(base_url);
        } else if self.provider() == Provider::Ollama {
            if let Some(host) = lookup("OLLAMA_HOST") {
                self.active_entry().base_url = Some(normalize_host(&host));
            }
        }
        if let Some(api_key) = lookup("WEATHER_AGENT_API_KEY") {
            self.active_entry().api_key = Some(api_key);
        }
        if let Some(secs) = lookup("WEATHER_AGENT_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|e| {
                AgentError::Config(format!("WEATHER_AGENT_TIMEOUT_SECS: {}", e))
            })?;
            self.request_timeout_secs = Some(secs);
        }
        Ok(())
    }

    pub fn apply_args(&mut self, args: &Args) -> Result<(), AgentError> {
        if let Some(provider) = &args.provider {
            self.active_provider = Some(provider.parse()?);
        }
        if let Some(model) = &args.model {
            self.active_entry().model = Some(model.clone());
        }
        if let Some(base_url) = &args.base_url {
            self.active_entry().base_url = Some(base_url.clone());
        }
        if let Some(secs) = args.timeout_secs {
            self.request_timeout_secs = Some(secs);
        }
        if let Some(level) = &args.log_level {
            self.log_level = Some(level.clone());
        }
        Ok(())
    }

    /// Settings for the active provider with defaults filled in.
    pub fn provider_config(&self) -> ProviderConfig {
        let provider = self.provider();
        let entry = self.providers.get(&provider).cloned().unwrap_or_default();
        ProviderConfig {
            api_key: entry.api_key,
            base_url: Some(
                entry
                    .base_url
                    .unwrap_or_else(|| provider.default_base_url().to_string()),
            ),
            model: Some(
                entry
                    .model
                    .unwrap_or_else(|| provider.default_model().to_string()),
            ),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

fn normalize_host(host: &str) -> String {
    let host = host.trim();
    if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}
