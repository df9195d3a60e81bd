//! # Features
//!
//! Persisted state behind the bot's commands and mention replies.

pub mod messages;
pub mod responses;

pub use messages::MessageStore;
pub use responses::{MentionPolicy, ResponseCategory, ResponseStore, Responses};
