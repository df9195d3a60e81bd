//! # Command Loader
//!
//! Discovers command files under a directory tree and binds each one to a
//! compiled-in handler.
//!
//! A command file is a YAML document with two fields:
//!
//! ```yaml
//! data:
//!   name: ping
//!   description: Check that the bot is alive
//! execute: ping
//! ```
//!
//! `data` is the command schema pushed to Discord; `execute` names the
//! handler in the [`HandlerTable`]. Files missing either field, naming an
//! unknown handler, or declaring an invalid schema are skipped with a warning.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Duplicate command names replace the earlier entry and log a warning
//! - 1.0.0: Initial recursive loader

use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use super::definition::CommandDefinition;
use super::handler::HandlerTable;
use super::registry::{CommandRegistry, RegisteredCommand};

/// File extensions recognised as command files
pub const COMMAND_FILE_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Raw shape of a command file; both fields are optional so a missing one
/// can be reported instead of failing the parse
#[derive(Debug, Deserialize)]
struct CommandFile {
    data: Option<CommandDefinition>,
    execute: Option<String>,
}

/// Why a command file was not loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Unreadable(String),
    Malformed(String),
    MissingData,
    MissingExecute,
    UnknownHandler(String),
    InvalidSchema(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unreadable(e) => write!(f, "could not be read: {e}"),
            SkipReason::Malformed(e) => write!(f, "is not a valid command file: {e}"),
            SkipReason::MissingData => write!(f, "is missing a required \"data\" property"),
            SkipReason::MissingExecute => {
                write!(f, "is missing a required \"execute\" property")
            }
            SkipReason::UnknownHandler(name) => write!(f, "names unknown handler \"{name}\""),
            SkipReason::InvalidSchema(e) => write!(f, "declares an invalid command: {e}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Result of one load pass
pub struct LoadedCommands {
    pub registry: CommandRegistry,
    /// Definitions in load order, one per command name, for remote registration
    pub definitions: Vec<CommandDefinition>,
    pub skipped: Vec<SkippedFile>,
}

/// Whether `path` looks like a command file
pub fn is_command_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| COMMAND_FILE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

/// Walk `root` and load every command file beneath it
///
/// Subdirectories are loaded depth-first with entries sorted by file name.
/// When two files declare the same command name the later one wins.
pub fn load_commands(root: &Path, handlers: &HandlerTable) -> Result<LoadedCommands> {
    if !root.is_dir() {
        return Err(anyhow!(
            "Commands directory {} does not exist or is not a directory",
            root.display()
        ));
    }

    let mut registry = CommandRegistry::new();
    let mut definitions: Vec<CommandDefinition> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut skipped = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("[WARNING] Could not read entry under {}: {e}", root.display());
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || !is_command_file(path) {
            continue;
        }

        match load_command_file(path, handlers) {
            Ok(command) => {
                let name = command.definition.name.clone();
                let definition = command.definition.clone();

                if let Some(previous) = registry.register(command) {
                    warn!(
                        "[WARNING] Command '{name}' from {} replaces the one from {}",
                        path.display(),
                        previous.source.display()
                    );
                }
                match positions.get(&name) {
                    Some(&index) => definitions[index] = definition,
                    None => {
                        positions.insert(name.clone(), definitions.len());
                        definitions.push(definition);
                    }
                }
                info!("Loaded command: {name}");
            }
            Err(reason) => {
                warn!("[WARNING] The command at {} {reason}.", path.display());
                skipped.push(SkippedFile {
                    path: path.to_path_buf(),
                    reason,
                });
            }
        }
    }

    debug!(
        "Loaded {} commands from {} ({} skipped)",
        registry.len(),
        root.display(),
        skipped.len()
    );

    Ok(LoadedCommands {
        registry,
        definitions,
        skipped,
    })
}

fn load_command_file(
    path: &Path,
    handlers: &HandlerTable,
) -> std::result::Result<RegisteredCommand, SkipReason> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| SkipReason::Unreadable(e.to_string()))?;
    let file: CommandFile =
        serde_yaml::from_str(&contents).map_err(|e| SkipReason::Malformed(e.to_string()))?;

    let definition = file.data.ok_or(SkipReason::MissingData)?;
    let execute = file.execute.ok_or(SkipReason::MissingExecute)?;
    let handler = handlers
        .get(execute.trim())
        .ok_or_else(|| SkipReason::UnknownHandler(execute.clone()))?;
    definition
        .validate()
        .map_err(|e| SkipReason::InvalidSchema(e.to_string()))?;

    Ok(RegisteredCommand {
        definition,
        handler,
        source: path.to_path_buf(),
    })
}
