use std::collections::HashMap;

use serde::Serialize;
use serde_json::{json, Value};

/// Per-call configuration: an optional JSON body plus extra headers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub body: Option<Value>,
    pub headers: HashMap<String, String>,
}

impl RequestOptions {
    /// Options carrying `payload` serialized as the JSON body.
    pub fn json<T: Serialize>(payload: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            body: Some(serde_json::to_value(payload)?),
            headers: HashMap::new(),
        })
    }

    /// Body understood by the completion endpoint.
    pub fn completion(id: &str, is_completed: bool) -> Self {
        Self {
            body: Some(json!({ "itemId": id, "isCompleted": is_completed })),
            headers: HashMap::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_body() {
        let options = RequestOptions::completion("t1", true);
        assert_eq!(
            options.body,
            Some(json!({"itemId": "t1", "isCompleted": true}))
        );
        assert!(options.headers.is_empty());
    }
}
