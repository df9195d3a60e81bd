//! Channel messages

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::commands::event::MessageEvent;

/// A posted message seen through [`MessageEvent`]
pub struct SerenityMessage<'a> {
    ctx: &'a Context,
    msg: &'a Message,
}

impl<'a> SerenityMessage<'a> {
    pub fn new(ctx: &'a Context, msg: &'a Message) -> Self {
        Self { ctx, msg }
    }
}

#[async_trait]
impl<'a> MessageEvent for SerenityMessage<'a> {
    fn content(&self) -> &str {
        &self.msg.content
    }

    fn author_is_bot(&self) -> bool {
        self.msg.author.bot
    }

    fn mentions(&self) -> Vec<u64> {
        self.msg.mentions.iter().map(|user| user.id.0).collect()
    }

    fn mentions_everyone(&self) -> bool {
        self.msg.mention_everyone
    }

    fn mentioned_roles(&self) -> Vec<u64> {
        self.msg.mention_roles.iter().map(|role| role.0).collect()
    }

    fn roles_of(&self, user_id: u64) -> Vec<u64> {
        let Some(guild_id) = self.msg.guild_id else {
            return Vec::new();
        };
        // The gateway always sends the bot's own member with the guild
        self.ctx
            .cache
            .member(guild_id, user_id)
            .map(|member| member.roles.iter().map(|role| role.0).collect())
            .unwrap_or_default()
    }

    async fn reply(&self, content: &str) -> Result<()> {
        self.msg.reply(self.ctx, content).await?;
        Ok(())
    }
}
