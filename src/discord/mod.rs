//! # Discord Adapters
//!
//! Wrap serenity's interaction and message types in the
//! [`CommandEvent`](crate::commands::CommandEvent) and
//! [`MessageEvent`](crate::commands::MessageEvent) traits.

pub mod interaction;
pub mod message;

pub use interaction::SerenityCommandEvent;
pub use message::SerenityMessage;
