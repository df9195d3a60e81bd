//! Utility command handlers
//!
//! Handles: ping
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::event::{CommandEvent, Reply};
use crate::commands::handler::SlashCommandHandler;

/// Handler for /ping
pub struct PingHandler;

#[async_trait]
impl SlashCommandHandler for PingHandler {
    fn name(&self) -> &'static str {
        "ping"
    }

    async fn handle(&self, _ctx: Arc<CommandContext>, event: &dyn CommandEvent) -> Result<()> {
        event.reply(Reply::public("Pong!")).await?;
        info!("Ping command completed for user {}", event.user_id());
        Ok(())
    }
}
