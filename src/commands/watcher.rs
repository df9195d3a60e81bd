//! # Command File Watcher
//!
//! Polls the commands directory and triggers a full reload for every change.
//!
//! Polling is used instead of native notifications so edits on network
//! mounts and bind-mounted volumes are still seen. Every create, modify and
//! remove event starts its own deploy; events are neither debounced nor
//! coalesced, so saving one file may reload several times.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use log::{debug, info, warn};
use notify::{Config, Event, EventKind, PollWatcher, RecursiveMode, Watcher};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use super::deploy::Deployer;

/// A change somewhere under the commands directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    pub path: PathBuf,
}

/// Keeps the poll watcher alive; dropping it stops watching
pub struct CommandWatcher {
    _watcher: PollWatcher,
}

impl CommandWatcher {
    /// Start polling `root` recursively every `interval`
    pub fn start(
        root: &Path,
        interval: Duration,
    ) -> Result<(Self, mpsc::UnboundedReceiver<WatchEvent>)> {
        let (tx, rx) = mpsc::unbounded_channel();
        let watched_root = root.to_path_buf();

        let handler = move |result: notify::Result<Event>| match result {
            Ok(event) => {
                for event in watch_events(&watched_root, &event) {
                    debug!("👀 Command file change: {}", event.path.display());
                    if tx.send(event).is_err() {
                        return;
                    }
                }
            }
            Err(e) => warn!("[WARNING] Command watcher error: {e}"),
        };

        let mut watcher =
            PollWatcher::new(handler, Config::default().with_poll_interval(interval))?;
        watcher.watch(root, RecursiveMode::Recursive)?;
        info!(
            "👀 Watching {} for command changes (every {}ms)",
            root.display(),
            interval.as_millis()
        );

        Ok((Self { _watcher: watcher }, rx))
    }
}

/// The reload-worthy events carried by one notify event
fn watch_events(root: &Path, event: &Event) -> Vec<WatchEvent> {
    match event.kind {
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
        _ => return Vec::new(),
    }
    event
        .paths
        .iter()
        .filter(|path| !is_hidden(root, path))
        .map(|path| WatchEvent { path: path.clone() })
        .collect()
}

/// Whether any component of `path` below `root` starts with a dot
pub fn is_hidden(root: &Path, path: &Path) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.components().any(|component| match component {
        Component::Normal(name) => name.to_str().map(|n| n.starts_with('.')).unwrap_or(false),
        _ => false,
    })
}

/// Run one deploy per watch event until the channel closes
///
/// Deploys are spawned, not awaited, so a slow registration never holds
/// back the next reload.
pub async fn run_reload_loop(mut rx: mpsc::UnboundedReceiver<WatchEvent>, deployer: Arc<Deployer>) {
    while let Some(event) = rx.recv().await {
        info!(
            "🔄 Change detected at {}, reloading commands",
            event.path.display()
        );
        let deployer = Arc::clone(&deployer);
        tokio::spawn(async move {
            deployer.deploy().await;
        });
    }
    debug!("Command watcher channel closed, reload loop exiting");
}
