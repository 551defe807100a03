use super::AgentState;
use crate::commands::handler::CommandHandler;
use crate::core::error::AgentError;
use crate::protocol::{Request, Response};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
pub struct CommandRegistry {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn register<C: CommandHandler + 'static>(&mut self, name: &str, command: C) {
        self.handlers.insert(name.to_string(), Arc::new(command));
    }

    pub async fn execute(
        &self,
        name: &str,
        state: &mut AgentState,
        request: &Request,
    ) -> Result<Response, AgentError> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| AgentError::Input(format!("Unknown command: {}", name)))?;
        handler.execute(state, request).await
    }

    pub fn get_command_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn help_lines(&self) -> Vec<&'static str> {
        let mut lines: Vec<&'static str> = self.handlers.values().map(|h| h.help()).collect();
        lines.sort();
        lines
    }
}
