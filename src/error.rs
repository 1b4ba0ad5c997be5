//! The error type returned by application-level operations.

use crate::dialog::ValidationError;
use crate::request::TransportError;
use crate::storage::StorageError;

/// Everything an [`App`](crate::app::App) operation can fail with. Keeps the
/// cause apart so callers can tell a rejected request from a form that was
/// never sent.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("not signed in")]
    NotSignedIn,

    #[error("the task dialog is not open")]
    DialogClosed,

    #[error("no task with id '{0}'")]
    TaskNotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
