//! # Feature: Key Messages
//!
//! A small key → message store backing `/info`.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Keep the map in memory, serialize writes
//! - 1.0.0: Initial file-backed store

use anyhow::Result;
use log::info;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::Mutex;

use crate::core::json_file;

pub struct MessageStore {
    path: PathBuf,
    messages: Mutex<BTreeMap<String, String>>,
}

impl MessageStore {
    /// Load the store, creating `{}` on disk if the file is missing
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let messages: BTreeMap<String, String> = json_file::load_or_init(&path).await?;
        info!("🗒️ Loaded {} stored messages", messages.len());
        Ok(Self {
            path,
            messages: Mutex::new(messages),
        })
    }

    /// Store or overwrite the message for `key`
    pub async fn set(&self, key: &str, message: &str) -> Result<()> {
        let mut messages = self.messages.lock().await;
        let mut updated = messages.clone();
        updated.insert(key.to_string(), message.to_string());
        json_file::save(&self.path, &updated).await?;
        *messages = updated;
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.messages.lock().await.get(key).cloned()
    }
}
