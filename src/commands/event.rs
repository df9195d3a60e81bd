//! Inbound event contracts
//!
//! The dispatcher and handlers only see these traits; the serenity types
//! are wrapped in `crate::discord`.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use async_trait::async_trait;

use super::options::CommandOptions;

/// Content of a reply to an interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub content: String,
    /// Visible only to the invoking user
    pub ephemeral: bool,
}

impl Reply {
    pub fn public(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: false,
        }
    }

    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: true,
        }
    }
}

/// A slash command invocation
#[async_trait]
pub trait CommandEvent: Send + Sync {
    fn command_name(&self) -> &str;

    fn options(&self) -> &CommandOptions;

    /// Id of the invoking user
    fn user_id(&self) -> u64;

    /// Whether the invoking member holds the administrator permission
    fn is_administrator(&self) -> bool;

    /// Whether the invocation happened inside a guild channel
    fn in_guild(&self) -> bool;

    /// Whether an initial response has already been sent
    fn replied(&self) -> bool;

    /// Send the initial response
    async fn reply(&self, reply: Reply) -> Result<()>;

    /// Send an additional message after the initial response
    async fn follow_up(&self, reply: Reply) -> Result<()>;

    /// Delete up to `limit` of the most recent messages in the invoking
    /// channel, skipping any too old for bulk deletion. Returns the number
    /// actually deleted.
    async fn delete_recent_messages(&self, limit: u64) -> Result<usize>;
}

/// A plain message posted in a channel the bot can see
#[async_trait]
pub trait MessageEvent: Send + Sync {
    fn content(&self) -> &str;

    fn author_is_bot(&self) -> bool;

    /// Ids of the users the message mentions
    fn mentions(&self) -> Vec<u64>;

    /// Whether the message pings `@everyone` or `@here`
    fn mentions_everyone(&self) -> bool;

    /// Ids of the roles the message mentions
    fn mentioned_roles(&self) -> Vec<u64>;

    /// Role ids `user_id` holds where the message was posted; empty outside guilds
    fn roles_of(&self, user_id: u64) -> Vec<u64>;

    async fn reply(&self, content: &str) -> Result<()>;
}
