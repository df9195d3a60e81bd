//! # Reload Cycle
//!
//! One deploy loads every command file, swaps the new registry in and then
//! pushes the definitions to Discord. It runs once at startup and once per
//! watch event.
//!
//! Every deploy takes a generation number before it loads. A load that
//! finishes after a newer one has already been installed is discarded, so
//! overlapping reloads can never roll the registry back to older files.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.2.0: Loads are ordered by generation; a superseded load is neither installed nor registered
//! - 1.1.0: Loader runs on the blocking pool; a failed load keeps the previous registry
//! - 1.0.0: Initial load-and-register on startup

use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use super::handler::HandlerTable;
use super::loader::{load_commands, LoadedCommands};
use super::registrar::CommandRegistrar;
use super::registry::SharedRegistry;

/// What one deploy did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployReport {
    /// The commands directory could not be read; nothing changed
    LoadFailed(String),
    /// A newer load was installed first; this one was dropped
    Superseded,
    /// The registry was replaced; `registered` says whether Discord accepted it
    Deployed {
        loaded: usize,
        skipped: usize,
        registered: bool,
    },
}

impl DeployReport {
    pub fn is_registered(&self) -> bool {
        matches!(self, DeployReport::Deployed { registered: true, .. })
    }
}

pub struct Deployer {
    root: PathBuf,
    handlers: Arc<HandlerTable>,
    registry: SharedRegistry,
    registrar: Arc<dyn CommandRegistrar>,
    next_generation: AtomicU64,
}

impl Deployer {
    pub fn new(
        root: PathBuf,
        handlers: Arc<HandlerTable>,
        registry: SharedRegistry,
        registrar: Arc<dyn CommandRegistrar>,
    ) -> Self {
        Self {
            root,
            handlers,
            registry,
            registrar,
            next_generation: AtomicU64::new(0),
        }
    }

    /// The registry this deployer writes to
    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    /// Load, swap and register
    ///
    /// Never fails outright; every problem is logged and reflected in the
    /// returned report.
    pub async fn deploy(&self) -> DeployReport {
        let deploy_id = Uuid::new_v4();
        let generation = self.next_generation();
        match self.load(deploy_id).await {
            Ok(loaded) => self.apply(deploy_id, generation, loaded).await,
            Err(report) => report,
        }
    }

    fn next_generation(&self) -> u64 {
        self.next_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn load(&self, deploy_id: Uuid) -> Result<LoadedCommands, DeployReport> {
        info!("[{deploy_id}] 📂 Loading commands from {}", self.root.display());

        let root = self.root.clone();
        let handlers = Arc::clone(&self.handlers);
        match tokio::task::spawn_blocking(move || load_commands(&root, &handlers)).await {
            Ok(Ok(loaded)) => Ok(loaded),
            Ok(Err(e)) => {
                error!("[{deploy_id}] ❌ Failed to load commands, keeping previous set: {e:#}");
                Err(DeployReport::LoadFailed(format!("{e:#}")))
            }
            Err(e) => {
                error!("[{deploy_id}] ❌ Command loader task failed: {e}");
                Err(DeployReport::LoadFailed(e.to_string()))
            }
        }
    }

    async fn apply(
        &self,
        deploy_id: Uuid,
        generation: u64,
        loaded: LoadedCommands,
    ) -> DeployReport {
        let loaded_count = loaded.registry.len();
        let skipped = loaded.skipped.len();
        if skipped > 0 {
            warn!("[{deploy_id}] ⚠️ Skipped {skipped} command file(s)");
        }

        if !self.registry.replace_if_newer(generation, loaded.registry).await {
            info!("[{deploy_id}] ⏭️ Load #{generation} superseded by a newer reload, discarding");
            return DeployReport::Superseded;
        }

        let registered = match self.registrar.register(&loaded.definitions).await {
            Ok(()) => {
                info!("[{deploy_id}] ✅ Deployed {loaded_count} commands");
                true
            }
            Err(e) => {
                error!("[{deploy_id}] ❌ Failed to register application commands: {e:#}");
                false
            }
        };

        DeployReport::Deployed {
            loaded: loaded_count,
            skipped,
            registered,
        }
    }
}
