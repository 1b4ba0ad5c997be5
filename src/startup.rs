//! Application assembly.
//!
//! Builds the request client, the storage backend and the stores from the
//! configuration and hydrates the session, producing a ready-to-use [`App`].

use std::sync::Arc;

use tracing::info;

use crate::app::App;
use crate::config::ConfigV1;
use crate::notify::Notifier;
use crate::request::RequestClient;
use crate::session::{SessionState, SessionStore};
use crate::storage::create_storage;
use crate::tasks::TaskStore;

/// Creates the application context and restores any persisted session.
pub fn build_app(config: &ConfigV1, notifier: Arc<dyn Notifier>) -> App {
    let storage = create_storage(&config.session);
    let session = SessionStore::new(storage, config.session.storage_key.clone());
    let tasks = TaskStore::from_config(RequestClient::new(), &config.api);

    let mut app = App::new(session, tasks, notifier);
    match app.init() {
        SessionState::Authenticated => info!("Restored stored session"),
        SessionState::Unauthenticated => info!("Starting without a session"),
    }
    info!("Using task backend at {}", config.api.base_url);
    app
}
