//! In-memory provider that replays canned replies, for unit tests.

use super::{LLMProvider, Message};
use crate::core::error::AgentError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub enum Reply {
    Text(String),
    Fail(String),
    Panic,
    Hang,
}

impl Reply {
    pub fn text(s: &str) -> Self {
        Reply::Text(s.to_string())
    }

    pub fn fail(s: &str) -> Self {
        Reply::Fail(s.to_string())
    }
}

#[derive(Default)]
struct Script {
    replies: VecDeque<Reply>,
    calls: Vec<Vec<Message>>,
}

#[derive(Clone, Default)]
pub struct ScriptedProvider {
    script: Arc<Mutex<Script>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                replies: replies.into(),
                calls: Vec::new(),
            })),
        }
    }

    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.script.lock().unwrap().calls.clone()
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn get_response(&self, messages: &[Message]) -> Result<String, AgentError> {
        let reply = {
            let mut script = self.script.lock().unwrap();
            script.calls.push(messages.to_vec());
            script.replies.pop_front()
        };

        match reply {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Fail(reason)) => Err(AgentError::Api(reason)),
            Some(Reply::Panic) => panic!("scripted provider panic"),
            Some(Reply::Hang) => std::future::pending().await,
            None => Err(AgentError::Api("no scripted reply left".to_string())),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }
}
