// Core layer - configuration and JSON persistence
pub mod core;

// Features layer - response lists and saved messages
pub mod features;

// Application layer
pub mod commands;

// Discord adapters for the command event traits
pub mod discord;

pub use crate::core::Config;
