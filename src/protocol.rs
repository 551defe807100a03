//! Wire types for the line-delimited JSON protocol.

use crate::core::error::AgentError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type Request = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
    Ready,
}

/// One reply line. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_bye: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Response {
    fn with_status(status: Status) -> Self {
        Self {
            status,
            command: None,
            location: None,
            response: None,
            is_bye: None,
            message: None,
        }
    }

    pub fn ready() -> Self {
        Self::with_status(Status::Ready)
    }

    pub fn success(command: &str) -> Self {
        Self {
            command: Some(command.to_string()),
            ..Self::with_status(Status::Success)
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::with_status(Status::Error)
        }
    }

    pub fn command_error(command: &str, message: impl Into<String>) -> Self {
        Self {
            command: Some(command.to_string()),
            ..Self::error(message)
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_reply(mut self, reply: impl Into<String>, is_bye: bool) -> Self {
        self.response = Some(reply.into());
        self.is_bye = Some(is_bye);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Serialize to a single line (no trailing newline).
    pub fn to_line(&self) -> Result<String, AgentError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Decode one input line. Framing and shape problems come back as the
/// error response to send.
pub fn parse_request(line: impl AsRef<[u8]>) -> Result<Request, Response> {
    let value: Value = serde_json::from_slice(line.as_ref())
        .map_err(|e| Response::error(format!("Invalid JSON: {}", e)))?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(Response::error("Request must be a JSON object")),
    }
}

/// Name to dispatch on; non-string values are rendered as JSON text.
pub fn command_name(request: &Request) -> String {
    match request.get("command") {
        Some(Value::String(name)) => name.clone(),
        Some(other) => other.to_string(),
        None => Value::Null.to_string(),
    }
}

/// Field as display text: absent or `null` yields `""`, strings are taken
/// verbatim and any other value is rendered as JSON text.
pub fn text_field(request: &Request, field: &str) -> String {
    match request.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Optional string field: absent or `null` yields `""`.
pub fn string_field(request: &Request, field: &str) -> Result<String, AgentError> {
    match request.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(AgentError::Input(format!("{} must be a string", field))),
    }
}
