use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use weather_agent::app::Application;
use weather_agent::core::error::AgentError;
use weather_agent::providers::{LLMProvider, Message};
use weather_agent::responder::WeatherResponder;

/// Backend double: replays canned replies and counts calls.
#[derive(Clone, Default)]
pub struct FakeBackend {
    replies: Arc<Mutex<VecDeque<Result<String, String>>>>,
    calls: Arc<Mutex<usize>>,
    panics: bool,
}

impl FakeBackend {
    pub fn replying(replies: &[Result<&str, &str>]) -> Self {
        let queue = replies
            .iter()
            .map(|r| r.map(str::to_string).map_err(str::to_string))
            .collect();
        Self {
            replies: Arc::new(Mutex::new(queue)),
            calls: Arc::default(),
            panics: false,
        }
    }

    /// A backend whose every call panics.
    pub fn panicking() -> Self {
        Self {
            panics: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl LLMProvider for FakeBackend {
    async fn get_response(&self, _messages: &[Message]) -> Result<String, AgentError> {
        *self.calls.lock().unwrap() += 1;
        if self.panics {
            panic!("backend exploded");
        }
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(reason)) => Err(AgentError::Api(reason)),
            None => Err(AgentError::Network("backend unreachable".to_string())),
        }
    }

    fn name(&self) -> &'static str {
        "fake"
    }

    fn model(&self) -> &str {
        "fake-model"
    }
}

/// Feed `input` through a fresh service and return the output lines.
pub async fn serve(backend: &FakeBackend, input: &str) -> Vec<String> {
    let mut app = Application::new(WeatherResponder::new(Box::new(backend.clone()), None));
    let mut out = Vec::new();
    app.run(input.as_bytes(), &mut out).await.unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}
