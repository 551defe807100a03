//! Weather-specific prompting on top of a generic [`LLMProvider`].
//!
//! Each capability comes in two flavours: a `try_*` method returning an
//! explicit `Result`, and a fail-soft wrapper that never errors and instead
//! substitutes the documented default (an apology text, or "not a farewell").

use crate::core::error::AgentError;
use crate::providers::{LLMProvider, Message};
use serde_json::Value;
use std::time::Duration;

pub const ANALYSIS_SYSTEM_PROMPT: &str = "You are an AI agent for a weather API. Provide short, friendly, and to-the-point responses.
Avoid unnecessary words. Do not use Markdown or any formatting\u{2014}plain text only.
Always keep replies as brief and clear as possible.
Follow this style strictly.";

pub const FAREWELL_SYSTEM_PROMPT: &str = "Reply with only \"1\" if the message is a goodbye/farewell, otherwise reply with only \"0\". No other text.";

pub struct WeatherResponder {
    provider: Box<dyn LLMProvider>,
    timeout: Option<Duration>,
}

impl WeatherResponder {
    pub fn new(provider: Box<dyn LLMProvider>, timeout: Option<Duration>) -> Self {
        Self { provider, timeout }
    }

    async fn call(&self, messages: &[Message]) -> Result<String, AgentError> {
        let request = self.provider.get_response(messages);
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .map_err(|_| AgentError::Timeout(limit.as_secs()))?,
            None => request.await,
        }
    }

    pub async fn try_analyze(&self, snapshot: &Value, prompt: &str) -> Result<String, AgentError> {
        let messages = [
            Message::system(ANALYSIS_SYSTEM_PROMPT),
            Message::user(analysis_prompt(snapshot, prompt)?),
        ];
        self.call(&messages).await
    }

    /// Answer `prompt` from `snapshot`; failures become a user-facing apology.
    pub async fn analyze(&self, snapshot: &Value, prompt: &str) -> String {
        match self.try_analyze(snapshot, prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, provider = self.provider.name(), "analysis call failed");
                format!("Sorry, I encountered an error: {}", e)
            }
        }
    }

    pub async fn try_classify_farewell(&self, text: &str) -> Result<bool, AgentError> {
        let messages = [
            Message::system(FAREWELL_SYSTEM_PROMPT),
            Message::user(text),
        ];
        let reply = self.call(&messages).await?;
        Ok(parse_farewell_verdict(&reply))
    }

    /// Whether `text` ends the conversation; any failure reads as `false`.
    pub async fn classify_farewell(&self, text: &str) -> bool {
        match self.try_classify_farewell(text).await {
            Ok(verdict) => verdict,
            Err(e) => {
                tracing::warn!(error = %e, provider = self.provider.name(), "farewell classification failed");
                false
            }
        }
    }
}

pub fn analysis_prompt(snapshot: &Value, prompt: &str) -> Result<String, AgentError> {
    let weather_data = serde_json::to_string_pretty(snapshot)?;
    Ok(format!(
        "Weather data:\n{}\n\nUser question: {}\n\nProvide a brief, friendly answer based on the weather data.",
        weather_data, prompt
    ))
}

/// The classifier answers with an integer; non-zero means farewell.
pub fn parse_farewell_verdict(reply: &str) -> bool {
    reply
        .trim()
        .parse::<i64>()
        .map(|n| n != 0)
        .unwrap_or(false)
}
