//! Command registry
//!
//! - **Version**: 2.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.1.0: Swaps carry a load generation; an older load never replaces a newer one
//! - 2.0.0: Entries pair a loaded definition with its handler; registry is swapped whole on reload
//! - 1.0.0: Initial implementation for handler dispatch

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::definition::CommandDefinition;
use super::handler::SlashCommandHandler;

/// A loaded command: its declared schema, its handler and the file it came from
#[derive(Clone)]
pub struct RegisteredCommand {
    pub definition: CommandDefinition,
    pub handler: Arc<dyn SlashCommandHandler>,
    pub source: PathBuf,
}

/// Registry mapping command names to loaded commands
///
/// # Example
///
/// ```ignore
/// let mut registry = CommandRegistry::new();
/// registry.register(RegisteredCommand { definition, handler, source });
///
/// if let Some(command) = registry.get("ping") {
///     command.handler.handle(ctx, &event).await?;
/// }
/// ```
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, RegisteredCommand>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under its definition's name
    ///
    /// Returns the entry it replaced, if any.
    pub fn register(&mut self, command: RegisteredCommand) -> Option<RegisteredCommand> {
        self.commands
            .insert(command.definition.name.clone(), command)
    }

    /// Get a command by name
    pub fn get(&self, name: &str) -> Option<&RegisteredCommand> {
        self.commands.get(name)
    }

    /// Check if a command is registered
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Number of registered commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// The live registry shared between the reload cycle (sole writer) and the
/// dispatcher (readers).
///
/// Readers take a snapshot and drop the lock before awaiting anything, so a
/// reload never blocks behind a slow handler and never changes a registry
/// under a lookup already in progress.
#[derive(Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<Live>>,
}

/// The installed registry and the generation of the load that built it
#[derive(Default)]
struct Live {
    generation: u64,
    registry: Arc<CommandRegistry>,
}

impl SharedRegistry {
    pub fn new(registry: CommandRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Live {
                generation: 0,
                registry: Arc::new(registry),
            })),
        }
    }

    /// Current registry
    pub async fn snapshot(&self) -> Arc<CommandRegistry> {
        Arc::clone(&self.inner.read().await.registry)
    }

    /// Generation of the installed registry; 0 until the first swap
    pub async fn generation(&self) -> u64 {
        self.inner.read().await.generation
    }

    /// Install `registry` unless a load at least as new is already live
    ///
    /// Returns whether the swap happened.
    pub async fn replace_if_newer(&self, generation: u64, registry: CommandRegistry) -> bool {
        let mut live = self.inner.write().await;
        if generation <= live.generation {
            return false;
        }
        *live = Live {
            generation,
            registry: Arc::new(registry),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{Script, ScriptedHandler};

    fn command(name: &str, description: &str) -> RegisteredCommand {
        RegisteredCommand {
            definition: CommandDefinition {
                name: name.to_string(),
                description: description.to_string(),
                options: vec![],
            },
            handler: ScriptedHandler::new("ping", Script::Succeed),
            source: PathBuf::from(format!("{name}.yaml")),
        }
    }

    #[test]
    fn test_registry_new_is_empty() {
        let registry = CommandRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_registry_register_single() {
        let mut registry = CommandRegistry::new();
        assert!(registry.register(command("ping", "Ping")).is_none());

        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("ping"));
        assert!(!registry.contains("pong"));
    }

    #[test]
    fn test_registry_register_replaces_same_name() {
        let mut registry = CommandRegistry::new();
        registry.register(command("ping", "first"));
        let replaced = registry.register(command("ping", "second"));

        assert_eq!(replaced.unwrap().definition.description, "first");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("ping").unwrap().definition.description, "second");
    }

    #[tokio::test]
    async fn test_shared_registry_snapshot_survives_replace() {
        let mut first = CommandRegistry::new();
        first.register(command("ping", "Ping"));
        let shared = SharedRegistry::new(first);

        let before = shared.snapshot().await;
        assert!(shared.replace_if_newer(1, CommandRegistry::new()).await);

        assert!(before.contains("ping"));
        assert!(shared.snapshot().await.is_empty());
        assert_eq!(shared.generation().await, 1);
    }

    #[tokio::test]
    async fn test_shared_registry_rejects_older_generation() {
        let shared = SharedRegistry::default();
        let mut newer = CommandRegistry::new();
        newer.register(command("info", "Info"));
        let mut older = CommandRegistry::new();
        older.register(command("ping", "Ping"));

        assert!(shared.replace_if_newer(2, newer).await);
        assert!(!shared.replace_if_newer(1, older.clone()).await);
        assert!(!shared.replace_if_newer(2, older).await);

        let live = shared.snapshot().await;
        assert!(live.contains("info"));
        assert!(!live.contains("ping"));
        assert_eq!(shared.generation().await, 2);
    }
}
