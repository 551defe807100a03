use super::AgentState;
use crate::core::error::AgentError;
use crate::protocol::{Request, Response, string_field, text_field};
use crate::utils::text::to_plain_text;
use async_trait::async_trait;
use serde_json::{Map, Value};

pub const NO_LOCATION_MESSAGE: &str = "No location set. Please set location first.";
pub const NO_PROMPT_MESSAGE: &str = "No prompt provided";
pub const FAREWELL_REPLY: &str = "Bye. Have a nice day.";

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn execute(
        &self,
        state: &mut AgentState,
        request: &Request,
    ) -> Result<Response, AgentError>;
    fn help(&self) -> &'static str;
}

pub struct SetWeatherCommand;
pub struct QueryCommand;
pub struct PingCommand;

#[async_trait]
impl CommandHandler for SetWeatherCommand {
    async fn execute(
        &self,
        state: &mut AgentState,
        request: &Request,
    ) -> Result<Response, AgentError> {
        let location = text_field(request, "location");

        let weather = match request.get("weather_data") {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(value) => value.clone(),
        };

        state.session.set_weather(location.clone(), weather);
        tracing::info!(%location, "weather snapshot updated");

        Ok(Response::success("set_weather").with_location(location))
    }

    fn help(&self) -> &'static str {
        "set_weather {location, weather_data} - Replace the current location and weather snapshot"
    }
}

#[async_trait]
impl CommandHandler for QueryCommand {
    async fn execute(
        &self,
        state: &mut AgentState,
        request: &Request,
    ) -> Result<Response, AgentError> {
        let Some(snapshot) = state.session.weather() else {
            return Ok(Response::command_error("query", NO_LOCATION_MESSAGE));
        };

        let prompt = match string_field(request, "prompt") {
            Ok(prompt) => prompt,
            Err(e) => return Ok(Response::command_error("query", e.to_string())),
        };
        if prompt.is_empty() {
            return Ok(Response::command_error("query", NO_PROMPT_MESSAGE));
        }

        if mentions_bye(&prompt) || state.responder.classify_farewell(&prompt).await {
            tracing::debug!("farewell detected");
            return Ok(Response::success("query").with_reply(FAREWELL_REPLY, true));
        }

        let reply = state.responder.analyze(snapshot, &prompt).await;
        Ok(Response::success("query").with_reply(to_plain_text(&reply), false))
    }

    fn help(&self) -> &'static str {
        "query {prompt} - Ask a question about the current weather snapshot"
    }
}

#[async_trait]
impl CommandHandler for PingCommand {
    async fn execute(
        &self,
        _state: &mut AgentState,
        _request: &Request,
    ) -> Result<Response, AgentError> {
        Ok(Response::success("ping").with_message("pong"))
    }

    fn help(&self) -> &'static str {
        "ping - Liveness check"
    }
}

fn mentions_bye(prompt: &str) -> bool {
    prompt.to_lowercase().contains("bye")
}
