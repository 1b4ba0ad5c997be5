use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where and under which key the signed-in identity is kept between runs.
/// - persist: if false, sessions only last for one process (MemoryStorage).
/// - storage_path: JSON file holding the stored keys; defaults to
///   `$HOME/.marshall/storage.json`.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct SessionConfig {
    #[serde(default = "default_persist")]
    pub persist: bool,
    #[serde(default)]
    pub storage_path: Option<PathBuf>,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            persist: default_persist(),
            storage_path: None,
            storage_key: default_storage_key(),
        }
    }
}

fn default_persist() -> bool {
    true
}

fn default_storage_key() -> String {
    "authData".to_string()
}

impl SessionConfig {
    pub fn resolved_storage_path(&self) -> PathBuf {
        if let Some(path) = &self.storage_path {
            return path.clone();
        }
        match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(".marshall").join("storage.json"),
            None => PathBuf::from("storage.json"),
        }
    }
}
