pub mod form;
pub mod store;

pub use form::{Submission, TaskForm, ValidationError};
pub use store::{DialogMode, DialogStore};
