use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where the task backend lives.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

/// Paths of the five task endpoints, relative to `base_url`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct EndpointsConfig {
    #[serde(default = "default_get_tasks")]
    pub get_tasks: String,
    #[serde(default = "default_post_task")]
    pub post_task: String,
    #[serde(default = "default_update_task")]
    pub update_task: String,
    #[serde(default = "default_update_completed_task")]
    pub update_completed_task: String,
    #[serde(default = "default_delete_task")]
    pub delete_task: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            get_tasks: default_get_tasks(),
            post_task: default_post_task(),
            update_task: default_update_task(),
            update_completed_task: default_update_completed_task(),
            delete_task: default_delete_task(),
        }
    }
}

fn default_get_tasks() -> String {
    "get_tasks".to_string()
}

fn default_post_task() -> String {
    "post_task".to_string()
}

fn default_update_task() -> String {
    "update_task".to_string()
}

fn default_update_completed_task() -> String {
    "update_completed_task".to_string()
}

fn default_delete_task() -> String {
    "delete_task".to_string()
}

impl ApiConfig {
    /// Config pointing at `base_url` with the default endpoint paths.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            endpoints: EndpointsConfig::default(),
        }
    }

    /// Joins `path` onto the base URL with exactly one slash between them.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_with_single_slash() {
        assert_eq!(
            ApiConfig::new("https://api.example.com/").url("/get_tasks"),
            "https://api.example.com/get_tasks"
        );
        assert_eq!(
            ApiConfig::new("http://localhost:8000").url("post_task"),
            "http://localhost:8000/post_task"
        );
    }
}
