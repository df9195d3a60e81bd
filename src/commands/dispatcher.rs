//! # Event Dispatcher
//!
//! Routes slash command invocations to the handler bound in the live
//! registry and answers messages that mention the bot.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.2.0: `@everyone`, `@here` and pings of a role the bot holds count as mentions
//! - 1.1.0: Options are checked against the command schema before the handler runs
//! - 1.0.0: Initial command routing and mention replies

use log::{debug, error, info, warn};
use std::sync::Arc;
use uuid::Uuid;

use super::context::CommandContext;
use super::event::{CommandEvent, MessageEvent, Reply};
use super::registry::SharedRegistry;
use crate::features::MentionPolicy;

/// Notice sent when a handler fails
pub const COMMAND_ERROR_NOTICE: &str = "There was an error while executing this command!";

/// How a command invocation was dealt with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Handled,
    UnknownCommand,
    InvalidOptions,
    Failed,
}

pub struct Dispatcher {
    registry: SharedRegistry,
    context: Arc<CommandContext>,
    mention_policy: MentionPolicy,
}

impl Dispatcher {
    pub fn new(
        registry: SharedRegistry,
        context: Arc<CommandContext>,
        mention_policy: MentionPolicy,
    ) -> Self {
        Self {
            registry,
            context,
            mention_policy,
        }
    }

    /// Run the handler registered for the invoked command
    pub async fn dispatch_command(&self, event: &dyn CommandEvent) -> DispatchOutcome {
        let request_id = Uuid::new_v4();
        let name = event.command_name();
        info!(
            "[{request_id}] 🎯 Slash command /{name} from user {}",
            event.user_id()
        );

        let registry = self.registry.snapshot().await;
        let Some(command) = registry.get(name) else {
            error!("[{request_id}] No command matching {name} was found.");
            return DispatchOutcome::UnknownCommand;
        };

        if let Err(e) = command.definition.check_options(event.options()) {
            warn!("[{request_id}] ⚠️ Rejected /{name}: {e}");
            if let Err(why) = event
                .reply(Reply::ephemeral(format!("Invalid option: {e}.")))
                .await
            {
                error!("[{request_id}] Failed to send invalid option notice: {why}");
            }
            return DispatchOutcome::InvalidOptions;
        }

        let handler = Arc::clone(&command.handler);
        drop(registry);

        match handler.handle(Arc::clone(&self.context), event).await {
            Ok(()) => {
                debug!("[{request_id}] ✅ /{name} completed");
                DispatchOutcome::Handled
            }
            Err(e) => {
                error!("[{request_id}] ❌ Error executing /{name}: {e:#}");
                let notice = Reply::ephemeral(COMMAND_ERROR_NOTICE);
                let delivered = if event.replied() {
                    event.follow_up(notice).await
                } else {
                    event.reply(notice).await
                };
                if let Err(why) = delivered {
                    error!("[{request_id}] Failed to send error notice: {why}");
                }
                DispatchOutcome::Failed
            }
        }
    }

    /// Reply to a message if it mentions the bot
    ///
    /// Returns whether a reply was sent.
    pub async fn handle_message(&self, message: &dyn MessageEvent, bot_id: u64) -> bool {
        if message.author_is_bot() || !mentions_bot(message, bot_id) {
            return false;
        }

        let request_id = Uuid::new_v4();
        debug!(
            "[{request_id}] 💬 Mentioned in message ({} chars)",
            message.content().len()
        );

        let responses = self.context.responses.snapshot().await;
        let reply = {
            let mut rng = rand::rng();
            self.mention_policy.reply(&responses, &mut rng)
        };

        match message.reply(&reply).await {
            Ok(()) => {
                info!("[{request_id}] ✅ Replied to mention");
                true
            }
            Err(e) => {
                error!("[{request_id}] ❌ Failed to reply to mention: {e}");
                false
            }
        }
    }
}

/// Direct pings, `@everyone`/`@here` and pings of one of the bot's roles
fn mentions_bot(message: &dyn MessageEvent, bot_id: u64) -> bool {
    if message.mentions().contains(&bot_id) || message.mentions_everyone() {
        return true;
    }
    let roles = message.mentioned_roles();
    !roles.is_empty()
        && message
            .roles_of(bot_id)
            .iter()
            .any(|role| roles.contains(role))
}
