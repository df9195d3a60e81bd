//! # Command System
//!
//! File-defined slash commands: discovery, hot reload, remote registration
//! and dispatch.
//!
//! A reload runs [`loader`] over the commands directory, swaps the result
//! into the [`SharedRegistry`] and pushes the definitions through a
//! [`CommandRegistrar`]. The [`Dispatcher`] reads whatever registry is live
//! when an interaction arrives.
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 3.0.0: Commands are declared in YAML files, hot reloaded and registered globally
//! - 2.1.0: Add modular handler infrastructure (handler trait, context, registry)
//! - 2.0.0: Remove bang commands, slash-only command system

pub mod context;
pub mod definition;
pub mod deploy;
pub mod dispatcher;
pub mod event;
pub mod handler;
pub mod handlers;
pub mod loader;
pub mod options;
pub mod registrar;
pub mod registry;
pub mod watcher;

#[cfg(test)]
pub(crate) mod testing;

// Re-export handler infrastructure
pub use context::CommandContext;
pub use definition::CommandDefinition;
pub use deploy::{DeployReport, Deployer};
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use event::{CommandEvent, MessageEvent, Reply};
pub use handler::{HandlerTable, SlashCommandHandler};
pub use handlers::default_handler_table;
pub use loader::{load_commands, LoadedCommands, SkippedFile};
pub use options::CommandOptions;
pub use registrar::{CommandRegistrar, DiscordRegistrar};
pub use registry::{CommandRegistry, SharedRegistry};
pub use watcher::{run_reload_loop, CommandWatcher, WatchEvent};
