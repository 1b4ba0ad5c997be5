use super::store::DialogMode;
use crate::models::{Identity, NewTask, TaskUpdate};

/// A required field was missing; the submission is never dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("sign in before saving tasks")]
    NotSignedIn,
    #[error("enter a title")]
    MissingTitle,
    #[error("enter a description")]
    MissingDescription,
    #[error("enter a date")]
    MissingDate,
}

/// A validated request ready for the task store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(NewTask),
    Update(TaskUpdate),
}

/// The editable fields of the task dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub date: String,
    pub is_completed: bool,
    pub is_important: bool,
}

impl TaskForm {
    /// Blank for create, a copy of the target for update and details.
    pub fn for_mode(mode: &DialogMode) -> Self {
        match mode.target() {
            Some(task) => Self {
                title: task.title.clone(),
                description: task.description.clone(),
                date: task.date.clone(),
                is_completed: task.is_completed,
                is_important: task.is_important,
            },
            None => Self::default(),
        }
    }

    /// Checks the signed-in user and the required fields in that order and
    /// builds the request matching `mode`. Whitespace-only text counts as
    /// missing.
    pub fn submit(
        &self,
        mode: &DialogMode,
        identity: Option<&Identity>,
    ) -> Result<Submission, ValidationError> {
        let identity = identity
            .filter(|i| !i.sub.is_empty())
            .ok_or(ValidationError::NotSignedIn)?;
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingDescription);
        }
        if self.date.trim().is_empty() {
            return Err(ValidationError::MissingDate);
        }

        Ok(match mode.target() {
            Some(task) => Submission::Update(TaskUpdate {
                id: task.id.clone(),
                title: self.title.clone(),
                description: self.description.clone(),
                date: self.date.clone(),
                is_completed: self.is_completed,
                is_important: self.is_important,
            }),
            None => Submission::Create(NewTask {
                title: self.title.clone(),
                description: self.description.clone(),
                date: self.date.clone(),
                is_completed: self.is_completed,
                is_important: self.is_important,
                user_id: identity.sub.clone(),
            }),
        })
    }
}
