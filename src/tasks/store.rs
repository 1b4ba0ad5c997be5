use std::future::Future;

use serde_json::Value;
use tracing::{debug, info, warn};

use super::endpoints::TaskEndpoints;
use super::outcome::{OperationKind, RequestOutcome};
use crate::config::ApiConfig;
use crate::models::{NewTask, Task, TaskUpdate};
use crate::request::{RequestClient, RequestOptions, TransportError};

/// Caches the latest result of each remote task operation.
///
/// Every operation goes pending -> fulfilled | rejected. Pending does not
/// touch the store; fulfilled overwrites the operation's slot and clears its
/// error flag; rejected sets the flag, keeps the stale data and hands the
/// error back to the caller. Operations are not ordered against each other:
/// callers that need the list to reflect a mutation must await the mutation
/// and then call [`TaskStore::fetch_items`].
pub struct TaskStore {
    client: RequestClient,
    endpoints: TaskEndpoints,
    items: RequestOutcome<Vec<Task>>,
    posted: RequestOutcome<Task>,
    updated: RequestOutcome<Task>,
    deleted: RequestOutcome<Value>,
    completed: RequestOutcome<Task>,
}

impl TaskStore {
    pub fn new(client: RequestClient, endpoints: TaskEndpoints) -> Self {
        Self {
            client,
            endpoints,
            items: RequestOutcome::default(),
            posted: RequestOutcome::default(),
            updated: RequestOutcome::default(),
            deleted: RequestOutcome::default(),
            completed: RequestOutcome::default(),
        }
    }

    pub fn from_config(client: RequestClient, config: &ApiConfig) -> Self {
        Self::new(client, TaskEndpoints::from_config(config))
    }

    pub fn items(&self) -> &RequestOutcome<Vec<Task>> {
        &self.items
    }

    pub fn posted(&self) -> &RequestOutcome<Task> {
        &self.posted
    }

    pub fn updated(&self) -> &RequestOutcome<Task> {
        &self.updated
    }

    pub fn deleted(&self) -> &RequestOutcome<Value> {
        &self.deleted
    }

    pub fn completed(&self) -> &RequestOutcome<Task> {
        &self.completed
    }

    /// Whether the latest attempt of any operation failed.
    pub fn is_error(&self) -> bool {
        self.failed_operations().next().is_some()
    }

    pub fn failed_operations(&self) -> impl Iterator<Item = OperationKind> + '_ {
        [
            (OperationKind::List, self.items.is_error),
            (OperationKind::Create, self.posted.is_error),
            (OperationKind::Update, self.updated.is_error),
            (OperationKind::Delete, self.deleted.is_error),
            (OperationKind::Complete, self.completed.is_error),
        ]
        .into_iter()
        .filter_map(|(kind, is_error)| is_error.then_some(kind))
    }

    /// `GET {get_tasks}/{owner_id}`: every task owned by `owner_id`.
    pub async fn fetch_items(&mut self, owner_id: &str) -> Result<Vec<Task>, TransportError> {
        let endpoints = &self.endpoints;
        let client = &self.client;
        let request = async {
            let url = endpoints.list_url(owner_id)?;
            client.get(&url, RequestOptions::default()).await
        };
        settle(OperationKind::List, &mut self.items, request).await
    }

    /// `POST {post_task}`: creates a task; the server assigns its id.
    pub async fn post_item(&mut self, task: &NewTask) -> Result<Task, TransportError> {
        let url = &self.endpoints.post_task;
        let client = &self.client;
        let request = async {
            let options = RequestOptions::json(task)?;
            client.post(url, options).await
        };
        settle(OperationKind::Create, &mut self.posted, request).await
    }

    /// `PUT {update_task}`: replaces a task wholesale.
    pub async fn put_item(&mut self, task: &TaskUpdate) -> Result<Task, TransportError> {
        let url = &self.endpoints.update_task;
        let client = &self.client;
        let request = async {
            let options = RequestOptions::json(task)?;
            client.put(url, options).await
        };
        settle(OperationKind::Update, &mut self.updated, request).await
    }

    /// `DELETE {delete_task}/{id}`; returns the server's acknowledgement as is.
    pub async fn delete_item(&mut self, id: &str) -> Result<Value, TransportError> {
        let endpoints = &self.endpoints;
        let client = &self.client;
        let request = async {
            let url = endpoints.delete_url(id)?;
            client.delete(&url, RequestOptions::default()).await
        };
        settle(OperationKind::Delete, &mut self.deleted, request).await
    }

    /// `PATCH {update_completed_task}` with caller-supplied options; see
    /// [`RequestOptions::completion`] for the usual body.
    pub async fn update_completed(
        &mut self,
        options: RequestOptions,
    ) -> Result<Task, TransportError> {
        let url = &self.endpoints.update_completed_task;
        let client = &self.client;
        let request = async { client.patch(url, options).await };
        settle(OperationKind::Complete, &mut self.completed, request).await
    }
}

/// Drives one request through its lifecycle and records the result in `slot`.
async fn settle<T, F>(
    kind: OperationKind,
    slot: &mut RequestOutcome<T>,
    request: F,
) -> Result<T, TransportError>
where
    T: Clone,
    F: Future<Output = Result<T, TransportError>>,
{
    debug!(
        event_name = "tasks.request.pending",
        event_domain = "tasks",
        operation = kind.as_str(),
        "task request pending"
    );

    match request.await {
        Ok(data) => {
            info!(
                event_name = "tasks.request.fulfilled",
                event_domain = "tasks",
                operation = kind.as_str(),
                "task request fulfilled"
            );
            slot.fulfill(data.clone());
            Ok(data)
        }
        Err(e) => {
            warn!(
                event_name = "tasks.request.rejected",
                event_domain = "tasks",
                operation = kind.as_str(),
                error = %e,
                "task request rejected"
            );
            slot.reject();
            Err(e)
        }
    }
}
