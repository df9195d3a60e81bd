//! Slash command interactions
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::id::MessageId;
use serenity::prelude::Context;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::commands::event::{CommandEvent, Reply};
use crate::commands::options::CommandOptions;

/// Discord refuses to bulk delete messages older than this
const BULK_DELETE_MAX_AGE_SECS: i64 = 14 * 24 * 60 * 60;

/// A slash command interaction seen through [`CommandEvent`]
pub struct SerenityCommandEvent<'a> {
    ctx: &'a Context,
    command: &'a ApplicationCommandInteraction,
    options: CommandOptions,
    replied: AtomicBool,
}

impl<'a> SerenityCommandEvent<'a> {
    pub fn new(ctx: &'a Context, command: &'a ApplicationCommandInteraction) -> Self {
        Self {
            ctx,
            command,
            options: CommandOptions::from_interaction(&command.data.options),
            replied: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl<'a> CommandEvent for SerenityCommandEvent<'a> {
    fn command_name(&self) -> &str {
        &self.command.data.name
    }

    fn options(&self) -> &CommandOptions {
        &self.options
    }

    fn user_id(&self) -> u64 {
        self.command.user.id.0
    }

    fn is_administrator(&self) -> bool {
        self.command
            .member
            .as_ref()
            .and_then(|member| member.permissions)
            .map(|permissions| permissions.administrator())
            .unwrap_or(false)
    }

    fn in_guild(&self) -> bool {
        self.command.guild_id.is_some()
    }

    fn replied(&self) -> bool {
        self.replied.load(Ordering::SeqCst)
    }

    async fn reply(&self, reply: Reply) -> Result<()> {
        self.command
            .create_interaction_response(&self.ctx.http, |r| {
                r.kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|m| {
                        m.content(&reply.content).ephemeral(reply.ephemeral)
                    })
            })
            .await?;
        self.replied.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn follow_up(&self, reply: Reply) -> Result<()> {
        self.command
            .create_followup_message(&self.ctx.http, |f| {
                f.content(&reply.content).ephemeral(reply.ephemeral)
            })
            .await?;
        Ok(())
    }

    async fn delete_recent_messages(&self, limit: u64) -> Result<usize> {
        let channel_id = self.command.channel_id;
        let messages = channel_id
            .messages(&self.ctx.http, |retriever| retriever.limit(limit))
            .await?;

        let cutoff = chrono::Utc::now().timestamp() - BULK_DELETE_MAX_AGE_SECS;
        let deletable: Vec<MessageId> = messages
            .iter()
            .filter(|message| message.timestamp.unix_timestamp() > cutoff)
            .map(|message| message.id)
            .collect();
        debug!(
            "🧹 {} of {} fetched messages in {channel_id} are recent enough to delete",
            deletable.len(),
            messages.len()
        );

        match deletable.as_slice() {
            [] => {}
            [single] => channel_id.delete_message(&self.ctx.http, *single).await?,
            many => channel_id.delete_messages(&self.ctx.http, many).await?,
        }
        Ok(deletable.len())
    }
}
