//! Per-command handler implementations
//!
//! - **Version**: 3.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 3.0.0: Handlers are looked up by the `execute` key of command files
//! - 2.0.0: Add ClearHandler
//! - 1.0.0: Initial AddHandler, InfoHandler, PingHandler

pub mod add;
pub mod clear;
pub mod info;
pub mod ping;

use std::sync::Arc;

use super::handler::{HandlerTable, SlashCommandHandler};

/// Create all compiled-in command handlers
///
/// Returns a vector of handlers ready to be put into a [`HandlerTable`].
pub fn create_all_handlers() -> Vec<Arc<dyn SlashCommandHandler>> {
    vec![
        Arc::new(add::AddHandler),
        Arc::new(info::InfoHandler),
        Arc::new(clear::ClearHandler),
        Arc::new(ping::PingHandler),
    ]
}

/// The handler table used by the bot
pub fn default_handler_table() -> HandlerTable {
    HandlerTable::from_handlers(create_all_handlers())
}
