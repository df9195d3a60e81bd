//! # Core Module
//!
//! Configuration and JSON persistence shared by the rest of the bot.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.7.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Replace message chunking with JSON file persistence helpers
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod json_file;

// Re-export commonly used items
pub use config::Config;
