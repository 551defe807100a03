use crate::config::{Provider, ProviderConfig};
use crate::core::error::AgentError;
use crate::providers::{
    LLMProvider, ollama::OllamaProvider, openai_compatible::OpenAICompatibleProvider,
};
use std::collections::HashMap;

type ProviderCreator =
    Box<dyn Fn(&ProviderConfig) -> Result<Box<dyn LLMProvider>, AgentError> + Send + Sync>;

pub struct ProviderFactory {
    creators: HashMap<Provider, ProviderCreator>,
}

impl Default for ProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderFactory {
    pub fn new() -> Self {
        let mut creators = HashMap::new();

        creators.insert(
            Provider::Ollama,
            Box::new(|config: &ProviderConfig| {
                let model = model_or_default(config, Provider::Ollama);
                let provider = OllamaProvider::new(config.base_url.clone(), model)?;
                Ok(Box::new(provider) as Box<dyn LLMProvider>)
            }) as ProviderCreator,
        );

        for provider in [Provider::OpenAI, Provider::OpenRouter, Provider::DeepSeek] {
            creators.insert(
                provider,
                Box::new(move |config: &ProviderConfig| {
                    let base_url = config
                        .base_url
                        .clone()
                        .unwrap_or_else(|| provider.default_base_url().to_string());
                    let model = model_or_default(config, provider);
                    let client = OpenAICompatibleProvider::new(
                        provider.as_str(),
                        base_url,
                        config.api_key.clone(),
                        model,
                    )?;
                    Ok(Box::new(client) as Box<dyn LLMProvider>)
                }) as ProviderCreator,
            );
        }

        Self { creators }
    }

    pub fn create(
        &self,
        provider: &Provider,
        config: &ProviderConfig,
    ) -> Result<Box<dyn LLMProvider>, AgentError> {
        self.creators
            .get(provider)
            .ok_or_else(|| AgentError::Config(format!("Provider not found: {}", provider)))
            .and_then(|creator| creator(config))
    }
}

fn model_or_default(config: &ProviderConfig, provider: Provider) -> String {
    config
        .model
        .clone()
        .unwrap_or_else(|| provider.default_model().to_string())
}
