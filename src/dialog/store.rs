use crate::models::Task;

/// What the task dialog is doing. Update and details always carry the task
/// they target; create never does.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogMode {
    #[default]
    Create,
    Update(Task),
    Details(Task),
}

impl DialogMode {
    pub fn target(&self) -> Option<&Task> {
        match self {
            DialogMode::Create => None,
            DialogMode::Update(task) | DialogMode::Details(task) => Some(task),
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            DialogMode::Create => "Add task",
            DialogMode::Update(_) => "Edit task",
            DialogMode::Details(_) => "Task details",
        }
    }

    /// Label of the submit button; details has none.
    pub fn submit_label(&self) -> Option<&'static str> {
        match self {
            DialogMode::Create => Some("Add task"),
            DialogMode::Update(_) => Some("Save changes"),
            DialogMode::Details(_) => None,
        }
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self, DialogMode::Details(_))
    }
}

/// Open/closed flag plus the mode of the last open. Closing keeps the mode
/// around; the next `open` overwrites it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogStore {
    is_open: bool,
    mode: DialogMode,
}

impl DialogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, mode: DialogMode) {
        self.is_open = true;
        self.mode = mode;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn mode(&self) -> &DialogMode {
        &self.mode
    }

    /// The mode, if the dialog is currently open.
    pub fn active(&self) -> Option<&DialogMode> {
        self.is_open.then_some(&self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task() -> Task {
        Task {
            id: "t1".to_string(),
            title: "Buy milk".to_string(),
            ..Task::default()
        }
    }

    #[test]
    fn test_starts_closed_in_create_mode() {
        let dialog = DialogStore::new();
        assert!(!dialog.is_open());
        assert_eq!(dialog.mode(), &DialogMode::Create);
        assert_eq!(dialog.active(), None);
    }

    #[test]
    fn test_close_keeps_mode_and_target() {
        let mut dialog = DialogStore::new();
        dialog.open(DialogMode::Update(task()));
        assert_eq!(dialog.active().and_then(DialogMode::target), Some(&task()));

        dialog.close();
        assert!(!dialog.is_open());
        assert_eq!(dialog.mode(), &DialogMode::Update(task()));

        dialog.open(DialogMode::Create);
        assert_eq!(dialog.mode().target(), None);
    }

    #[test]
    fn test_mode_presentation() {
        assert_eq!(DialogMode::Create.submit_label(), Some("Add task"));
        assert_eq!(DialogMode::Details(task()).submit_label(), None);
        assert!(DialogMode::Details(task()).is_read_only());
        assert!(!DialogMode::Update(task()).is_read_only());
        assert_eq!(DialogMode::Update(task()).heading(), "Edit task");
    }
}
