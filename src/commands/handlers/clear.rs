//! Moderation handler
//!
//! Handles: clear
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use async_trait::async_trait;
use log::{error, info, warn};
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::event::{CommandEvent, Reply};
use crate::commands::handler::SlashCommandHandler;

/// Most messages one /clear may delete
pub const MAX_CLEAR_AMOUNT: i64 = 20;

/// Handler for /clear - bulk delete recent channel messages (administrators only)
pub struct ClearHandler;

#[async_trait]
impl SlashCommandHandler for ClearHandler {
    fn name(&self) -> &'static str {
        "clear"
    }

    async fn handle(&self, _ctx: Arc<CommandContext>, event: &dyn CommandEvent) -> Result<()> {
        let user_id = event.user_id();
        if !event.is_administrator() {
            warn!("🚫 /clear refused for non-administrator {user_id}");
            return event
                .reply(Reply::ephemeral(
                    "You need to be an administrator to use this command.",
                ))
                .await;
        }

        let amount = match event.options().get_integer("amount") {
            Some(n) if (1..=MAX_CLEAR_AMOUNT).contains(&n) => n as u64,
            _ => {
                return event
                    .reply(Reply::ephemeral(format!(
                        "Please provide a number between 1 and {MAX_CLEAR_AMOUNT}."
                    )))
                    .await;
            }
        };

        if !event.in_guild() {
            return event
                .reply(Reply::ephemeral(
                    "This command can only be used in text channels.",
                ))
                .await;
        }

        match event.delete_recent_messages(amount).await {
            Ok(deleted) => {
                info!("🧹 Clear command deleted {deleted}/{amount} messages for user {user_id}");
                event
                    .reply(Reply::ephemeral(format!(
                        "Successfully deleted {deleted} messages."
                    )))
                    .await
            }
            Err(e) => {
                error!("Failed to delete messages for /clear: {e:#}");
                event
                    .reply(Reply::ephemeral(
                        "There was an error while trying to delete messages in this channel.",
                    ))
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{context_in, FakeCommandEvent};
    use serde_json::json;

    #[tokio::test]
    async fn test_clear_requires_administrator() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(&dir, None).await;
        let event = FakeCommandEvent::new("clear", [("amount", json!(5))]);

        ClearHandler.handle(ctx, &event).await.unwrap();

        assert_eq!(
            event.single().1,
            Reply::ephemeral("You need to be an administrator to use this command.")
        );
        assert!(event.delete_requests().is_empty());
    }

    #[tokio::test]
    async fn test_clear_amount_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(&dir, None).await;

        for amount in [0, 21, -3] {
            let event = FakeCommandEvent::new("clear", [("amount", json!(amount))]).as_admin();
            ClearHandler.handle(ctx.clone(), &event).await.unwrap();
            assert_eq!(
                event.single().1,
                Reply::ephemeral("Please provide a number between 1 and 20.")
            );
            assert!(event.delete_requests().is_empty());
        }
    }

    #[tokio::test]
    async fn test_clear_deletes_requested_amount() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(&dir, None).await;
        let event = FakeCommandEvent::new("clear", [("amount", json!(20))]).as_admin();

        ClearHandler.handle(ctx, &event).await.unwrap();

        assert_eq!(event.delete_requests(), vec![20]);
        assert_eq!(event.single().1, Reply::ephemeral("Successfully deleted 20 messages."));
    }

    #[tokio::test]
    async fn test_clear_reports_actual_count() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(&dir, None).await;
        let event = FakeCommandEvent::new("clear", [("amount", json!(10))])
            .as_admin()
            .with_deletable(Some(3));

        ClearHandler.handle(ctx, &event).await.unwrap();

        assert_eq!(event.single().1, Reply::ephemeral("Successfully deleted 3 messages."));
    }

    #[tokio::test]
    async fn test_clear_outside_guild() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(&dir, None).await;
        let event = FakeCommandEvent::new("clear", [("amount", json!(2))])
            .as_admin()
            .in_dm();

        ClearHandler.handle(ctx, &event).await.unwrap();

        assert_eq!(
            event.single().1,
            Reply::ephemeral("This command can only be used in text channels.")
        );
    }

    #[tokio::test]
    async fn test_clear_platform_error_is_answered() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(&dir, None).await;
        let event = FakeCommandEvent::new("clear", [("amount", json!(2))])
            .as_admin()
            .with_deletable(None);

        ClearHandler.handle(ctx, &event).await.unwrap();

        assert!(event.single().1.content.starts_with("There was an error while trying"));
    }
}
