//! Pretty-printed JSON file persistence
//!
//! Shared by the response and key-message stores. Files are written with
//! two-space indentation and always rewritten whole.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::{Context, Result};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Load `path`, or create it from `T::default()` when it does not exist.
///
/// A file that exists but cannot be read or parsed is an error; it is never
/// overwritten.
pub async fn load_or_init<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Serialize + Default,
{
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => {
            let value = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            debug!("Loaded {}", path.display());
            Ok(value)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let value = T::default();
            save(path, &value).await?;
            info!("📄 Created {}", path.display());
            Ok(value)
        }
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Write `value` to `path` as pretty JSON, creating parent directories.
pub async fn save<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
