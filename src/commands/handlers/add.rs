//! Response list handler
//!
//! Handles: add
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Write into the shared store so mention replies pick up new lines at once
//! - 1.0.0: Initial owner-only /add

use anyhow::Result;
use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::event::{CommandEvent, Reply};
use crate::commands::handler::SlashCommandHandler;
use crate::features::ResponseCategory;

/// Handler for /add - append a line to one of the mention reply lists
pub struct AddHandler;

#[async_trait]
impl SlashCommandHandler for AddHandler {
    fn name(&self) -> &'static str {
        "add"
    }

    async fn handle(&self, ctx: Arc<CommandContext>, event: &dyn CommandEvent) -> Result<()> {
        let user_id = event.user_id();
        if !ctx.is_owner(user_id) {
            warn!("🚫 /add refused for non-owner {user_id}");
            return event
                .reply(Reply::ephemeral("You do not have permission to use this command."))
                .await;
        }

        let category = event
            .options()
            .get_string("category")
            .and_then(|c| c.parse::<ResponseCategory>().ok());
        let Some(category) = category else {
            return event
                .reply(Reply::ephemeral("Invalid category provided."))
                .await;
        };

        let message = event.options().get_string("message").unwrap_or_default();
        ctx.responses.add(category, message).await?;

        event
            .reply(Reply::ephemeral(format!(
                "Added your message to the {category} category!"
            )))
            .await?;

        info!("Add command completed for user {user_id} ({category})");
        Ok(())
    }
}
