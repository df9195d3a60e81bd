//! Key message handler
//!
//! Handles: info
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

/// Handler for /info - store a message under a key, or post it back
pub struct InfoHandler;

#[async_trait]
impl SlashCommandHandler for InfoHandler {
    fn name(&self) -> &'static str {
        "info"
    }

    async fn handle(&self, ctx: Arc<CommandContext>, event: &dyn CommandEvent) -> Result<()> {
        let key = event.options().get_string("key").unwrap_or_default();
        let message = event
            .options()
            .get_string("message")
            .filter(|m| !m.is_empty());

        match message {
            Some(message) => {
                ctx.messages.set(&key, &message).await?;
                event
                    .reply(Reply::ephemeral(format!("Saved message: {key}")))
                    .await?;
                info!("Info command stored key '{key}' for user {}", event.user_id());
            }
            None => match ctx.messages.get(&key).await.filter(|m| !m.is_empty()) {
                Some(stored) => event.reply(Reply::public(stored)).await?,
                None => {
                    event
                        .reply(Reply::ephemeral(format!("No message found for {key}")))
                        .await?
                }
            },
        }

        Ok(())
    }
}
