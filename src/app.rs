use crate::commands::{AgentState, CommandDispatcher, create_command_registry};
use crate::core::error::AgentError;
use crate::protocol::{Response, parse_request};
use crate::responder::WeatherResponder;
use crate::session::SessionState;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// The request/response loop: one JSON line in, one JSON line out.
pub struct Application {
    command_dispatcher: CommandDispatcher,
    state: AgentState,
}

impl Application {
    pub fn new(responder: WeatherResponder) -> Self {
        Self::with_dispatcher(create_command_registry(), responder)
    }

    pub fn with_dispatcher(
        command_dispatcher: CommandDispatcher,
        responder: WeatherResponder,
    ) -> Self {
        Self {
            command_dispatcher,
            state: AgentState::new(responder),
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.state.session
    }

    /// Announce readiness, then serve requests until `reader` hits end of input.
    ///
    /// Only I/O failures on the streams themselves end the loop early.
    pub async fn run<R, W>(&mut self, mut reader: R, writer: &mut W) -> Result<(), AgentError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        for line in self.command_dispatcher.help_lines() {
            tracing::debug!(command = line, "registered");
        }

        write_response(writer, &Response::ready()).await?;

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                tracing::info!("input closed, shutting down");
                return Ok(());
            }

            let response = self.handle_line(trim_line_ending(&buf)).await;
            write_response(writer, &response).await?;
        }
    }

    /// Produce the reply for one raw input line. Never fails.
    pub async fn handle_line(&mut self, line: &[u8]) -> Response {
        let request = match parse_request(line) {
            Ok(request) => request,
            Err(response) => {
                tracing::warn!(
                    reason = response.message.as_deref().unwrap_or_default(),
                    "unreadable request"
                );
                return response;
            }
        };

        let dispatch = self.command_dispatcher.handle(&mut self.state, &request);
        match AssertUnwindSafe(dispatch).catch_unwind().await {
            Ok(response) => response,
            Err(panic) => {
                let reason = panic_message(&*panic);
                tracing::error!(%reason, "request handler panicked");
                Response::error(format!("Service error: {}", reason))
            }
        }
    }
}

async fn write_response<W>(writer: &mut W, response: &Response) -> Result<(), AgentError>
where
    W: AsyncWrite + Unpin,
{
    let line = match response.to_line() {
        Ok(line) => line,
        Err(e) => Response::error(format!("Service error: {}", e)).to_line()?,
    };

    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected panic".to_string()
    }
}
