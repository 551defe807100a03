use super::{
    AgentState,
    handler::{PingCommand, QueryCommand, SetWeatherCommand},
    registry::CommandRegistry,
};
use crate::protocol::{Request, Response, command_name};
use std::sync::Arc;

#[derive(Clone)]
pub struct CommandDispatcher {
    registry: Arc<CommandRegistry>,
}

impl CommandDispatcher {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    /// Route one decoded request; handler errors become error responses.
    pub async fn handle(&self, state: &mut AgentState, request: &Request) -> Response {
        let command = command_name(request);
        tracing::debug!(%command, "dispatching request");

        match self.registry.execute(&command, state, request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%command, error = %e, "request rejected");
                Response::error(e.to_string())
            }
        }
    }

    pub fn get_command_names(&self) -> Vec<String> {
        self.registry.get_command_names()
    }

    pub fn help_lines(&self) -> Vec<&'static str> {
        self.registry.help_lines()
    }
}

pub fn create_command_registry() -> CommandDispatcher {
    let mut registry = CommandRegistry::new();

    registry.register("set_weather", SetWeatherCommand);
    registry.register("query", QueryCommand);
    registry.register("ping", PingCommand);

    CommandDispatcher::new(Arc::new(registry))
}
