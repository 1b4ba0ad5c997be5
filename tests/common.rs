#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use marshall::app::App;
use marshall::config::{load_config_str, ConfigV1};
use marshall::notify::MemoryNotifier;
use marshall::startup::build_app;
use serde_json::{json, Value};

/// Mints an ID token the way the identity provider would (the signature is
/// never checked by the client).
pub fn mint_id_token(sub: &str, name: &str) -> String {
    let claims = json!({
        "iss": "https://accounts.example.com",
        "aud": "marshall-client",
        "sub": sub,
        "name": name,
        "email": format!("{}@example.com", sub),
        "iat": 1700000000,
        "exp": 4102444800i64
    });
    let mut header = Header::new(Algorithm::HS256);
    header.kid = Some("provider-key".to_string());
    encode(&header, &claims, &EncodingKey::from_secret(b"provider-secret"))
        .expect("Failed to create token")
}

pub fn test_config(base_url: &str, storage_path: &Path) -> ConfigV1 {
    let yaml = format!(
        r#"
version: "1.0.0"
api:
  base_url: "{}"
session:
  persist: true
  storage_path: "{}"
logging:
  level: "debug"
  format: "json"
"#,
        base_url,
        storage_path.display()
    );
    load_config_str(&yaml).expect("test config should parse")
}

pub fn build_test_app(config: &ConfigV1) -> (App, Arc<MemoryNotifier>) {
    let notifier = Arc::new(MemoryNotifier::new());
    (build_app(config, notifier.clone()), notifier)
}

/// A task as the backend spells it.
pub fn backend_task(id: &str, title: &str, owner: &str) -> Value {
    json!({
        "_id": id,
        "title": title,
        "description": "2%",
        "date": "2024-01-01",
        "iscompleted": false,
        "isimportant": false,
        "userid": owner
    })
}
