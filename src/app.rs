//! The application context: the three stores plus the flows that tie them
//! together the way the task screens use them.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::dialog::{DialogMode, DialogStore, Submission, TaskForm};
use crate::error::ClientError;
use crate::models::{Task, TaskFilter};
use crate::notify::Notifier;
use crate::request::RequestOptions;
use crate::session::{IdentityProvider, SessionState, SessionStore};
use crate::tasks::TaskStore;

/// Owns the session, task and dialog stores and a notifier.
///
/// Every failing operation is reported through the notifier before its error
/// is returned, so callers only need the `Result` for control flow.
pub struct App {
    pub session: SessionStore,
    pub tasks: TaskStore,
    pub dialog: DialogStore,
    notifier: Arc<dyn Notifier>,
}

impl App {
    pub fn new(session: SessionStore, tasks: TaskStore, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            session,
            tasks,
            dialog: DialogStore::new(),
            notifier,
        }
    }

    /// Rehydrates the session from durable storage. Run once at startup.
    pub fn init(&mut self) -> SessionState {
        self.session.restore()
    }

    pub async fn sign_in(
        &mut self,
        provider: &dyn IdentityProvider,
    ) -> Result<SessionState, ClientError> {
        let before = self.session.identity().cloned();
        let state = match self.session.sign_in(provider).await {
            Ok(state) => state,
            Err(e) => {
                self.notifier.error("Could not save the session");
                return Err(e.into());
            }
        };
        // A provider that yields nothing leaves an earlier session in place.
        let changed = self
            .session
            .identity()
            .filter(|identity| Some(*identity) != before.as_ref());
        if let Some(identity) = changed {
            self.notifier
                .success(&format!("Signed in as {}", identity.display_name()));
        }
        Ok(state)
    }

    pub fn sign_out(&mut self) -> Result<(), ClientError> {
        if let Err(e) = self.session.logout() {
            self.notifier.error("Could not clear the stored session");
            return Err(e.into());
        }
        Ok(())
    }

    fn owner_id(&self) -> Result<String, ClientError> {
        match self.session.identity() {
            Some(identity) => Ok(identity.sub.clone()),
            None => {
                self.notifier.error("Sign in first");
                Err(ClientError::NotSignedIn)
            }
        }
    }

    /// Refetches the signed-in user's tasks.
    pub async fn refresh(&mut self) -> Result<Vec<Task>, ClientError> {
        let owner_id = self.owner_id()?;
        match self.tasks.fetch_items(&owner_id).await {
            Ok(items) => Ok(items),
            Err(e) => {
                self.notifier.error(&format!("Could not load tasks: {}", e));
                Err(e.into())
            }
        }
    }

    /// The cached tasks matching `filter`. May be stale if the last refresh
    /// failed; check `tasks.items().is_error`.
    pub fn visible(&self, filter: TaskFilter) -> Vec<&Task> {
        match &self.tasks.items().data {
            Some(items) => filter.apply(items),
            None => Vec::new(),
        }
    }

    pub fn open_dialog(&mut self, mode: DialogMode) {
        self.dialog.open(mode);
    }

    pub fn close_dialog(&mut self) {
        self.dialog.close();
    }

    /// Validates `form` against the current dialog mode, sends it, closes the
    /// dialog and refetches the list. On any failure the dialog stays open.
    /// A closed dialog cannot be submitted; nothing is sent.
    pub async fn submit_dialog(&mut self, form: &TaskForm) -> Result<(), ClientError> {
        let Some(mode) = self.dialog.active().cloned() else {
            self.notifier.error("Open the task dialog first");
            return Err(ClientError::DialogClosed);
        };
        let submission = match form.submit(&mode, self.session.identity()) {
            Ok(submission) => submission,
            Err(e) => {
                self.notifier.error(&e.to_string());
                return Err(e.into());
            }
        };

        let sent = match &submission {
            Submission::Create(new_task) => self.tasks.post_item(new_task).await,
            Submission::Update(update) => self.tasks.put_item(update).await,
        };
        if let Err(e) = sent {
            self.notifier.error(&format!("Could not save the task: {}", e));
            return Err(e.into());
        }

        match mode {
            DialogMode::Create => self.notifier.success("Task added"),
            DialogMode::Update(_) => self.notifier.success("Task updated"),
            DialogMode::Details(_) => debug!("Details dialog saved without changes"),
        }
        self.close_dialog();
        self.refresh().await?;
        Ok(())
    }

    /// Flips the completion flag of `task` and refetches the list.
    pub async fn toggle_completed(&mut self, task: &Task) -> Result<Task, ClientError> {
        let options = RequestOptions::completion(&task.id, !task.is_completed);
        let updated = match self.tasks.update_completed(options).await {
            Ok(updated) => updated,
            Err(e) => {
                self.notifier
                    .error(&format!("Could not update the task: {}", e));
                return Err(e.into());
            }
        };

        if updated.is_completed {
            self.notifier.success("Task completed");
        } else {
            self.notifier.success("Task marked as in progress");
        }
        self.refresh().await?;
        Ok(updated)
    }

    /// Deletes the task with `id` and refetches the list.
    pub async fn remove(&mut self, id: &str) -> Result<(), ClientError> {
        if let Err(e) = self.tasks.delete_item(id).await {
            self.notifier
                .error(&format!("Could not delete the task: {}", e));
            return Err(e.into());
        }
        self.notifier.success("Task deleted");
        if let Err(e) = self.refresh().await {
            warn!("Task {} deleted but the list could not be refreshed", id);
            return Err(e);
        }
        Ok(())
    }

    /// Looks a task up in the cached list.
    pub fn find(&self, id: &str) -> Option<&Task> {
        self.tasks
            .items()
            .data
            .as_ref()
            .and_then(|items| items.iter().find(|task| task.id == id))
    }

    /// Refreshes the list and returns a copy of the task with `id`.
    pub async fn locate(&mut self, id: &str) -> Result<Task, ClientError> {
        self.refresh().await?;
        match self.find(id) {
            Some(task) => Ok(task.clone()),
            None => {
                self.notifier.error(&format!("No task with id '{}'", id));
                Err(ClientError::TaskNotFound(id.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::dialog::ValidationError;
    use crate::models::Identity;
    use crate::notify::{MemoryNotifier, NoticeLevel};
    use crate::request::RequestClient;
    use crate::storage::MemoryStorage;
    use mockito::Server;

    fn app(base_url: &str, notifier: Arc<MemoryNotifier>) -> App {
        let session = SessionStore::new(Arc::new(MemoryStorage::new()), "authData");
        let tasks = TaskStore::from_config(RequestClient::new(), &ApiConfig::new(base_url));
        App::new(session, tasks, notifier)
    }

    fn signed_in(base_url: &str, notifier: Arc<MemoryNotifier>) -> App {
        let mut app = app(base_url, notifier);
        app.session
            .login(Identity::from_stored(r#"{"sub": "u1", "name": "Ada"}"#).unwrap())
            .unwrap();
        app
    }

    #[tokio::test]
    async fn test_refresh_requires_session() {
        let notifier = Arc::new(MemoryNotifier::new());
        let mut app = app("http://127.0.0.1:9", notifier.clone());

        let err = app.refresh().await.unwrap_err();
        assert!(matches!(err, ClientError::NotSignedIn));
        assert_eq!(notifier.levels(), vec![NoticeLevel::Error]);
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_dispatched() {
        let mut server = Server::new_async().await;
        let post = server
            .mock("POST", "/post_task")
            .expect(0)
            .create_async()
            .await;

        let notifier = Arc::new(MemoryNotifier::new());
        let mut app = signed_in(&server.url(), notifier.clone());
        app.open_dialog(DialogMode::Create);

        let err = app.submit_dialog(&TaskForm::default()).await.unwrap_err();
        post.assert_async().await;

        assert!(matches!(
            err,
            ClientError::Validation(ValidationError::MissingTitle)
        ));
        assert!(app.dialog.is_open());
        assert_eq!(notifier.notices(), vec![(NoticeLevel::Error, "enter a title".to_string())]);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_dialog_open() {
        let mut server = Server::new_async().await;
        let put = server
            .mock("PUT", "/update_task")
            .with_status(500)
            .create_async()
            .await;
        let list = server
            .mock("GET", "/get_tasks/u1")
            .expect(0)
            .create_async()
            .await;

        let notifier = Arc::new(MemoryNotifier::new());
        let mut app = signed_in(&server.url(), notifier.clone());
        let target = Task {
            id: "t1".to_string(),
            ..Task::default()
        };
        app.open_dialog(DialogMode::Update(target.clone()));
        let form = TaskForm {
            title: "x".to_string(),
            description: "y".to_string(),
            date: "2024-01-01".to_string(),
            ..TaskForm::for_mode(&DialogMode::Update(target))
        };

        let err = app.submit_dialog(&form).await.unwrap_err();
        put.assert_async().await;
        list.assert_async().await;

        assert!(matches!(err, ClientError::Transport(_)));
        assert!(app.dialog.is_open());
        assert!(app.tasks.updated().is_error);
        assert_eq!(notifier.levels(), vec![NoticeLevel::Error]);
    }

    #[tokio::test]
    async fn test_toggle_completed_flips_flag_and_refetches() {
        let mut server = Server::new_async().await;
        let patch = server
            .mock("PATCH", "/update_completed_task")
            .match_body(mockito::Matcher::Json(
                serde_json::json!({"itemId": "t1", "isCompleted": true}),
            ))
            .with_status(200)
            .with_body(r#"{"_id": "t1", "iscompleted": true}"#)
            .create_async()
            .await;
        let list = server
            .mock("GET", "/get_tasks/u1")
            .with_status(200)
            .with_body(r#"[{"_id": "t1", "iscompleted": true}]"#)
            .create_async()
            .await;

        let notifier = Arc::new(MemoryNotifier::new());
        let mut app = signed_in(&server.url(), notifier.clone());
        let task = Task {
            id: "t1".to_string(),
            ..Task::default()
        };

        let updated = app.toggle_completed(&task).await.unwrap();
        patch.assert_async().await;
        list.assert_async().await;

        assert!(updated.is_completed);
        assert_eq!(app.visible(TaskFilter::Completed).len(), 1);
        assert!(app.visible(TaskFilter::Proceeding).is_empty());
        assert_eq!(notifier.levels(), vec![NoticeLevel::Success]);
    }

    #[tokio::test]
    async fn test_closed_dialog_is_not_submitted_again() {
        let mut server = Server::new_async().await;
        let post = server
            .mock("POST", "/post_task")
            .with_status(201)
            .with_body(r#"{"_id": "t1", "title": "Buy milk", "userid": "u1"}"#)
            .expect(1)
            .create_async()
            .await;
        let list = server
            .mock("GET", "/get_tasks/u1")
            .with_status(200)
            .with_body(r#"[{"_id": "t1", "title": "Buy milk", "userid": "u1"}]"#)
            .expect(1)
            .create_async()
            .await;

        let notifier = Arc::new(MemoryNotifier::new());
        let mut app = signed_in(&server.url(), notifier.clone());
        app.open_dialog(DialogMode::Create);
        let form = TaskForm {
            title: "Buy milk".to_string(),
            description: "2%".to_string(),
            date: "2024-01-01".to_string(),
            ..TaskForm::default()
        };
        app.submit_dialog(&form).await.unwrap();
        assert!(!app.dialog.is_open());

        let err = app.submit_dialog(&form).await.unwrap_err();
        post.assert_async().await;
        list.assert_async().await;

        assert!(matches!(err, ClientError::DialogClosed));
        assert_eq!(notifier.levels().last(), Some(&NoticeLevel::Error));
    }

    #[tokio::test]
    async fn test_details_save_puts_without_success_notice() {
        let mut server = Server::new_async().await;
        let put = server
            .mock("PUT", "/update_task")
            .match_body(mockito::Matcher::PartialJson(
                serde_json::json!({"id": "t1", "title": "Buy milk"}),
            ))
            .with_status(200)
            .with_body(r#"{"_id": "t1", "title": "Buy milk", "userid": "u1"}"#)
            .create_async()
            .await;
        let list = server
            .mock("GET", "/get_tasks/u1")
            .with_status(200)
            .with_body(r#"[{"_id": "t1", "title": "Buy milk", "userid": "u1"}]"#)
            .create_async()
            .await;

        let notifier = Arc::new(MemoryNotifier::new());
        let mut app = signed_in(&server.url(), notifier.clone());
        let mode = DialogMode::Details(Task {
            id: "t1".to_string(),
            title: "Buy milk".to_string(),
            description: "2%".to_string(),
            date: "2024-01-01".to_string(),
            owner_id: "u1".to_string(),
            ..Task::default()
        });
        let form = TaskForm::for_mode(&mode);
        app.open_dialog(mode);

        app.submit_dialog(&form).await.unwrap();
        put.assert_async().await;
        list.assert_async().await;

        assert!(!app.dialog.is_open());
        assert!(notifier.notices().is_empty());
        assert_eq!(app.tasks.updated().current().unwrap().id, "t1");
    }

    #[tokio::test]
    async fn test_empty_sign_in_keeps_session_without_notice() {
        let notifier = Arc::new(MemoryNotifier::new());
        let mut app = signed_in("http://127.0.0.1:9", notifier.clone());

        let cancelled = crate::session::IssuedTokenProvider::new("test", None);
        let state = app.sign_in(&cancelled).await.unwrap();

        assert_eq!(state, SessionState::Authenticated);
        assert_eq!(app.session.identity().unwrap().sub, "u1");
        assert!(notifier.notices().is_empty());
    }
}
