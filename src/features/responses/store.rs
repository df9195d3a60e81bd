//! Persisted insult/blab response lists

use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::Mutex;

use super::ResponseCategory;
use crate::core::json_file;

/// On-disk shape of `responses.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Responses {
    #[serde(default)]
    pub insult: Vec<String>,
    #[serde(default)]
    pub blab: Vec<String>,
}

impl Responses {
    pub fn get(&self, category: ResponseCategory) -> &[String] {
        match category {
            ResponseCategory::Insult => &self.insult,
            ResponseCategory::Blab => &self.blab,
        }
    }

    fn get_mut(&mut self, category: ResponseCategory) -> &mut Vec<String> {
        match category {
            ResponseCategory::Insult => &mut self.insult,
            ResponseCategory::Blab => &mut self.blab,
        }
    }
}

/// Response lists cached in memory and written through to disk
///
/// Every mutation holds the lock across the file write, so two concurrent
/// `/add` calls cannot overwrite each other's line.
pub struct ResponseStore {
    path: PathBuf,
    data: Mutex<Responses>,
}

impl ResponseStore {
    /// Load the store, creating an empty file if none exists
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data: Responses = json_file::load_or_init(&path).await?;
        info!(
            "💬 Loaded {} insult and {} blab responses",
            data.insult.len(),
            data.blab.len()
        );
        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    /// Append a line to a category and persist the whole file
    pub async fn add(&self, category: ResponseCategory, line: String) -> Result<()> {
        let mut data = self.data.lock().await;
        let mut updated = data.clone();
        updated.get_mut(category).push(line);
        json_file::save(&self.path, &updated).await?;
        *data = updated;
        Ok(())
    }

    /// Copy of the current lists
    pub async fn snapshot(&self) -> Responses {
        self.data.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_open_initializes_empty_lists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("responses.json");

        let store = ResponseStore::open(&path).await.unwrap();

        assert_eq!(store.snapshot().await, Responses::default());
        let on_disk: Responses =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, Responses::default());
    }

    #[tokio::test]
    async fn test_add_persists_and_updates_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("responses.json");
        let store = ResponseStore::open(&path).await.unwrap();

        store
            .add(ResponseCategory::Blab, "did you know".to_string())
            .await
            .unwrap();

        assert_eq!(store.snapshot().await.blab, vec!["did you know".to_string()]);

        let reopened = ResponseStore::open(&path).await.unwrap();
        assert_eq!(reopened.snapshot().await.blab, vec!["did you know".to_string()]);
        assert!(reopened.snapshot().await.insult.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_not_lost() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("responses.json");
        let store = Arc::new(ResponseStore::open(&path).await.unwrap());

        let mut tasks = Vec::new();
        for i in 0..10 {
            let store = Arc::clone(&store);
            tasks.push(tokio::spawn(async move {
                store
                    .add(ResponseCategory::Insult, format!("line {i}"))
                    .await
                    .unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let reopened = ResponseStore::open(&path).await.unwrap();
        assert_eq!(reopened.snapshot().await.insult.len(), 10);
    }

    #[tokio::test]
    async fn test_open_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("responses.json");
        std::fs::write(&path, "{\"insult\": [").unwrap();

        assert!(ResponseStore::open(&path).await.is_err());
    }
}
