use super::{LLMProvider, Message};
use crate::core::error::AgentError;
use crate::providers::base_client::HttpClient;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct OllamaMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: Option<OllamaReply>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct OllamaReply {
    content: String,
}

/// Local Ollama server, talking to the native `/api/chat` endpoint.
#[derive(Clone)]
pub struct OllamaProvider {
    client: HttpClient,
    model: String,
}

impl OllamaProvider {
    pub fn new(base_url: Option<String>, model: String) -> Result<Self, AgentError> {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());
        Ok(Self {
            client: HttpClient::new(base_url, None)?,
            model,
        })
    }

    fn build_payload<'a>(&'a self, messages: &'a [Message]) -> OllamaChatRequest<'a> {
        OllamaChatRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| OllamaMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            stream: false,
        }
    }
}

fn parse_reply(body: &str) -> Result<String, AgentError> {
    let parsed: OllamaChatResponse = serde_json::from_str(body)?;

    if let Some(error) = parsed.error {
        return Err(AgentError::Api(error));
    }

    parsed
        .message
        .map(|m| m.content)
        .ok_or_else(|| AgentError::Api("No message in Ollama response".to_string()))
}

#[async_trait]
impl LLMProvider for OllamaProvider {
    async fn get_response(&self, messages: &[Message]) -> Result<String, AgentError> {
        let payload = self.build_payload(messages);
        let response = self.client.post("api/chat", &payload).await?;
        let body = response.text().await?;
        parse_reply(&body)
    }

    fn name(&self) -> &'static str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
