use super::{LLMProvider, Message};
use crate::core::error::AgentError;
use crate::providers::base_client::HttpClient;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatCompletionMessage<'a>>,
    stream: Option<bool>,
}

#[derive(Serialize)]
struct ChatCompletionMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    #[serde(default)]
    content: Option<String>,
}

/// Any endpoint speaking the OpenAI `chat/completions` dialect
/// (OpenAI, OpenRouter, DeepSeek, llama.cpp servers, ...).
#[derive(Clone)]
pub struct OpenAICompatibleProvider {
    client: HttpClient,
    name: &'static str,
    model: String,
}

impl OpenAICompatibleProvider {
    pub fn new(
        name: &'static str,
        base_url: String,
        api_key: Option<String>,
        model: String,
    ) -> Result<Self, AgentError> {
        let auth_header = api_key
            .filter(|key| !key.trim().is_empty())
            .map(|key| ("Authorization".to_string(), format!("Bearer {}", key)));

        Ok(Self {
            client: HttpClient::new(base_url, auth_header)?,
            name,
            model,
        })
    }

    fn build_payload<'a>(&'a self, messages: &'a [Message]) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| ChatCompletionMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            stream: None,
        }
    }
}

fn parse_reply(body: &str) -> Result<String, AgentError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body)?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AgentError::Api("No choices in API response".to_string()))?;

    choice
        .message
        .content
        .map(|c| c.trim().to_string())
        .ok_or_else(|| AgentError::Api("No content in API response".to_string()))
}

#[async_trait]
impl LLMProvider for OpenAICompatibleProvider {
    async fn get_response(&self, messages: &[Message]) -> Result<String, AgentError> {
        let payload = self.build_payload(messages);
        let response = self.client.post("chat/completions", &payload).await?;
        let body = response.text().await?;
        parse_reply(&body)
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_omits_stream_flag() {
        let provider = OpenAICompatibleProvider::new(
            "openai",
            "https://api.openai.com/v1".to_string(),
            Some("sk-test".to_string()),
            "gpt-4.1-mini".to_string(),
        )
        .unwrap();
        let messages = vec![Message::user("hello")];
        let value = serde_json::to_value(provider.build_payload(&messages)).unwrap();

        assert_eq!(value["model"], "gpt-4.1-mini");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["stream"], serde_json::Value::Null);
    }

    #[test]
    fn first_choice_is_trimmed() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  1\n"}}]}"#;
        assert_eq!(parse_reply(body).unwrap(), "1");
    }

    #[test]
    fn empty_choices_is_an_api_error() {
        let err = parse_reply(r#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(err, AgentError::Api(_)));
    }
}
