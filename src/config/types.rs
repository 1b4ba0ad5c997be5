use std::path::Path;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::api::ApiConfig;
use super::logging::LoggingConfig;
use super::session::SessionConfig;

/// Prefix of environment variables that override the YAML file.
/// Nested keys are separated by `__`, e.g. `MARSHALL_API__BASE_URL`.
pub const ENV_PREFIX: &str = "MARSHALL_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: the backend, the session storage and logging.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Load config from a YAML file, then apply `MARSHALL_*` environment overrides.
/// A missing file is not an error as long as the environment supplies
/// everything required.
pub fn load_config(path: &Path) -> Result<ConfigV1, figment::Error> {
    let figment = Figment::new()
        .join(Serialized::default("version", "1.0.0"))
        .merge(Yaml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));
    extract(figment)
}

/// Parse config from an in-memory YAML document (no environment overrides).
pub fn load_config_str(yaml: &str) -> Result<ConfigV1, figment::Error> {
    extract(Figment::new().merge(Yaml::string(yaml)))
}

fn extract(figment: Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
    // handle configuration migration between versions here when necessary
}

/// The JSON schema for the configuration, pretty-printed.
pub fn config_schema() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&schema_for!(Config))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_CONFIG: &str = r#"
version: "1.0.0"
api:
  base_url: "https://tasks.example.com"
  endpoints:
    get_tasks: "v2/get_tasks"
session:
  persist: false
logging:
  level: "debug"
  format: "json"
"#;

    #[test]
    fn test_load_full_config() {
        let config = load_config_str(TEST_CONFIG).expect("config should parse");
        assert_eq!(config.api.base_url, "https://tasks.example.com");
        assert_eq!(config.api.endpoints.get_tasks, "v2/get_tasks");
        assert_eq!(config.api.endpoints.post_task, "post_task");
        assert!(!config.session.persist);
        assert_eq!(config.session.storage_key, "authData");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_defaults_apply() {
        let config = load_config_str(
            r#"
version: "1.0.0"
api:
  base_url: "http://localhost:8000"
"#,
        )
        .unwrap();
        assert!(config.session.persist);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, "console");
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let result = load_config_str(
            r#"
version: "0.9.0"
api:
  base_url: "http://localhost:8000"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_environment_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.yaml", TEST_CONFIG)?;
            jail.set_env("MARSHALL_API__BASE_URL", "http://override:9000");
            jail.set_env("MARSHALL_SESSION__STORAGE_KEY", "session");

            let config = load_config(Path::new("config.yaml"))?;
            assert_eq!(config.api.base_url, "http://override:9000");
            assert_eq!(config.session.storage_key, "session");
            assert_eq!(config.api.endpoints.get_tasks, "v2/get_tasks");
            Ok(())
        });
    }

    #[test]
    fn test_environment_alone_is_enough() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("MARSHALL_API__BASE_URL", "http://only-env:8000");
            let config = load_config(Path::new("missing.yaml"))?;
            assert_eq!(config.api.base_url, "http://only-env:8000");
            Ok(())
        });
    }

    #[test]
    fn test_schema_mentions_sections() {
        let schema = config_schema().unwrap();
        assert!(schema.contains("base_url"));
        assert!(schema.contains("storage_key"));
    }
}
