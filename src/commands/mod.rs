pub mod dispatcher;
pub mod handler;
pub mod registry;

use crate::responder::WeatherResponder;
use crate::session::SessionState;
pub use dispatcher::{CommandDispatcher, create_command_registry};

/// Everything a command handler may touch while serving one request.
pub struct AgentState {
    pub session: SessionState,
    pub responder: WeatherResponder,
}

impl AgentState {
    pub fn new(responder: WeatherResponder) -> Self {
        Self {
            session: SessionState::new(),
            responder,
        }
    }
}
