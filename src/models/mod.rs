pub mod identity;
pub mod task;

pub use identity::{AuthDecodeError, Identity};
pub use task::{NewTask, Task, TaskFilter, TaskUpdate};
