use reqwest::Url;

use crate::config::ApiConfig;
use crate::request::TransportError;

/// Fully resolved URLs of the task endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEndpoints {
    pub get_tasks: String,
    pub post_task: String,
    pub update_task: String,
    pub update_completed_task: String,
    pub delete_task: String,
}

impl TaskEndpoints {
    pub fn from_config(config: &ApiConfig) -> Self {
        let paths = &config.endpoints;
        Self {
            get_tasks: config.url(&paths.get_tasks),
            post_task: config.url(&paths.post_task),
            update_task: config.url(&paths.update_task),
            update_completed_task: config.url(&paths.update_completed_task),
            delete_task: config.url(&paths.delete_task),
        }
    }

    pub fn list_url(&self, owner_id: &str) -> Result<String, TransportError> {
        with_segment(&self.get_tasks, owner_id)
    }

    pub fn delete_url(&self, id: &str) -> Result<String, TransportError> {
        with_segment(&self.delete_task, id)
    }
}

/// Appends `segment` as a single percent-encoded path segment, so ids
/// containing `/`, `?` or `#` cannot leave the endpoint.
fn with_segment(base: &str, segment: &str) -> Result<String, TransportError> {
    let invalid = |message: &str| TransportError::InvalidUrl {
        url: base.to_string(),
        message: message.to_string(),
    };

    // The url crate silently drops these two segments.
    if matches!(segment, "" | "." | "..") {
        return Err(invalid(&format!("'{}' is not a valid path segment", segment)));
    }

    let mut url = Url::parse(base).map_err(|e| invalid(&e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("URL cannot have path segments"))?
        .pop_if_empty()
        .push(segment);
    Ok(url.into())
}
