//! Shared context for command handlers
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Carry the JSON stores and owner id instead of a global client object
//! - 1.0.0: Initial implementation with core shared state

use std::sync::Arc;

use crate::features::{MessageStore, ResponseStore};

/// Shared context for all command handlers
///
/// Contains:
/// - ResponseStore for the mention reply lists (written by `/add`)
/// - MessageStore for `/info` keys
/// - The owner id gating privileged commands
#[derive(Clone)]
pub struct CommandContext {
    pub responses: Arc<ResponseStore>,
    pub messages: Arc<MessageStore>,
    pub owner_id: Option<u64>,
}

impl CommandContext {
    /// Create a new CommandContext with the given stores
    pub fn new(
        responses: Arc<ResponseStore>,
        messages: Arc<MessageStore>,
        owner_id: Option<u64>,
    ) -> Self {
        Self {
            responses,
            messages,
            owner_id,
        }
    }

    /// Whether `user_id` is the configured owner
    pub fn is_owner(&self, user_id: u64) -> bool {
        self.owner_id == Some(user_id)
    }
}
