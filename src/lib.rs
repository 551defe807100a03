//! Line-delimited JSON service that answers weather questions for a host
//! application, backed by a chat-completion model.
//!
//! The host writes one JSON request per line to standard input and reads one
//! JSON response per line from standard output. See [`app::Application`] for
//! the loop and [`commands`] for the command set.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod protocol;
pub mod providers;
pub mod responder;
pub mod session;
pub mod utils;
