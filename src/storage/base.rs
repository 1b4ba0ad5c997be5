use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use super::{file_storage::FileStorage, memory_storage::MemoryStorage};
use crate::config::SessionConfig;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage file {path} could not be accessed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage contents could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable string key/value storage, the same shape as a browser's
/// `localStorage`. Every write replaces the whole value for its key.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Creates the storage backend described by the session config.
/// If `persist = false`, the session only lives as long as the process.
pub fn create_storage(config: &SessionConfig) -> Arc<dyn Storage> {
    if !config.persist {
        info!("Session persistence is disabled. Using in-memory storage.");
        return Arc::new(MemoryStorage::new());
    }

    let path = config.resolved_storage_path();
    info!("Persisting session to {}", path.display());
    Arc::new(FileStorage::new(path))
}
