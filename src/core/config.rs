//! Process configuration sourced from the environment
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Add mention reply policy and watcher settings
//! - 1.0.0: Initial token/application/owner configuration

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::features::responses::MentionPolicy;

/// Default poll interval for the command directory watcher
pub const DEFAULT_WATCH_INTERVAL_MS: u64 = 1000;

/// Default probability of answering a mention from the `insult` list
pub const DEFAULT_INSULT_PROBABILITY: f64 = 0.9;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log filter from `LOG_LEVEL`
///
/// Read on its own so the logger is up before the rest of the configuration
/// is parsed; `RUST_LOG` still overrides it.
pub fn log_level() -> String {
    std::env::var("LOG_LEVEL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub application_id: u64,
    /// The only user allowed to run `/add`. `None` locks the command for everyone.
    pub owner_id: Option<u64>,
    pub commands_dir: PathBuf,
    pub data_dir: PathBuf,
    pub watch_commands: bool,
    pub watch_interval: Duration,
    pub mention_policy: MentionPolicy,
}

impl Config {
    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let discord_token = get("DISCORD_TOKEN")
            .ok_or_else(|| anyhow!("Missing DISCORD_TOKEN in environment or .env file"))?;

        let application_id = get("CLIENT_ID")
            .ok_or_else(|| anyhow!("Missing CLIENT_ID in environment or .env file"))?
            .trim()
            .parse::<u64>()
            .context("CLIENT_ID must be a numeric application id")?;

        let owner_id = get("OWNER_ID")
            .map(|v| v.trim().parse::<u64>())
            .transpose()
            .context("OWNER_ID must be a numeric user id")?;

        let watch_commands = match get("WATCH_COMMANDS") {
            Some(v) => parse_bool(&v)
                .ok_or_else(|| anyhow!("WATCH_COMMANDS must be true or false, got '{v}'"))?,
            None => true,
        };

        let watch_interval_ms = get("WATCH_INTERVAL_MS")
            .map(|v| v.trim().parse::<u64>())
            .transpose()
            .context("WATCH_INTERVAL_MS must be a whole number of milliseconds")?
            .unwrap_or(DEFAULT_WATCH_INTERVAL_MS);
        if watch_interval_ms == 0 {
            return Err(anyhow!("WATCH_INTERVAL_MS must be greater than zero"));
        }

        let mention_policy = match get("MENTION_REPLY") {
            Some(text) => MentionPolicy::Canned(text),
            None => {
                let insult_probability = get("INSULT_PROBABILITY")
                    .map(|v| v.trim().parse::<f64>())
                    .transpose()
                    .context("INSULT_PROBABILITY must be a number")?
                    .unwrap_or(DEFAULT_INSULT_PROBABILITY);
                if !(0.0..=1.0).contains(&insult_probability) {
                    return Err(anyhow!(
                        "INSULT_PROBABILITY must be between 0 and 1, got {insult_probability}"
                    ));
                }
                MentionPolicy::Weighted { insult_probability }
            }
        };

        Ok(Self {
            discord_token,
            application_id,
            owner_id,
            commands_dir: get("COMMANDS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("commands")),
            data_dir: get("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            watch_commands,
            watch_interval: Duration::from_millis(watch_interval_ms),
            mention_policy,
        })
    }

    pub fn responses_path(&self) -> PathBuf {
        self.data_dir.join("responses.json")
    }

    pub fn messages_path(&self) -> PathBuf {
        self.data_dir.join("messages.json")
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
