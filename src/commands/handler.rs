//! Slash command handler trait and infrastructure
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Handlers are bound to commands by command files, take a transport-neutral event
//! - 1.0.0: Initial implementation for modular command handling

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use super::context::CommandContext;
use super::event::CommandEvent;

/// Trait for slash command handlers
///
/// Handlers are compiled in. A command file binds a command definition to a
/// handler through its `execute` field, which must equal the handler's
/// [`name`](SlashCommandHandler::name).
///
/// # Example
///
/// ```ignore
/// pub struct PingHandler;
///
/// #[async_trait]
/// impl SlashCommandHandler for PingHandler {
///     fn name(&self) -> &'static str {
///         "ping"
///     }
///
///     async fn handle(&self, _ctx: Arc<CommandContext>, event: &dyn CommandEvent) -> Result<()> {
///         event.reply(Reply::public("Pong!")).await
///     }
/// }
/// ```
#[async_trait]
pub trait SlashCommandHandler: Send + Sync {
    /// Key referenced by the `execute` field of command files
    fn name(&self) -> &'static str;

    /// Handle the slash command
    ///
    /// # Arguments
    ///
    /// * `ctx` - Shared command context with the persisted stores and owner id
    /// * `event` - The invocation to answer
    async fn handle(&self, ctx: Arc<CommandContext>, event: &dyn CommandEvent) -> Result<()>;
}

/// The static table of compiled-in handlers, keyed by handler name
#[derive(Clone, Default)]
pub struct HandlerTable {
    handlers: HashMap<&'static str, Arc<dyn SlashCommandHandler>>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a list of handlers; later entries win on name clashes
    pub fn from_handlers(handlers: Vec<Arc<dyn SlashCommandHandler>>) -> Self {
        let mut table = Self::new();
        for handler in handlers {
            table.insert(handler);
        }
        table
    }

    pub fn insert(&mut self, handler: Arc<dyn SlashCommandHandler>) {
        self.handlers.insert(handler.name(), handler);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn SlashCommandHandler>> {
        self.handlers.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
