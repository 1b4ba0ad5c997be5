use std::fmt;

/// The five remote task operations, each with its own outcome slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    List,
    Create,
    Update,
    Delete,
    Complete,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::List => "list",
            OperationKind::Create => "create",
            OperationKind::Update => "update",
            OperationKind::Delete => "delete",
            OperationKind::Complete => "complete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Last known result of one kind of operation. Each new invocation
/// overwrites it; there is no history.
///
/// `is_error` means the most recent attempt failed and `data` is whatever
/// the last success left behind, i.e. stale.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOutcome<T> {
    pub data: Option<T>,
    pub is_error: bool,
}

impl<T> Default for RequestOutcome<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_error: false,
        }
    }
}

impl<T> RequestOutcome<T> {
    pub fn fulfill(&mut self, data: T) {
        self.data = Some(data);
        self.is_error = false;
    }

    pub fn reject(&mut self) {
        self.is_error = true;
    }

    /// The data, but only if the latest attempt succeeded.
    pub fn current(&self) -> Option<&T> {
        if self.is_error {
            None
        } else {
            self.data.as_ref()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_keeps_stale_data() {
        let mut outcome = RequestOutcome::default();
        outcome.fulfill(vec![1, 2]);
        assert_eq!(outcome.current(), Some(&vec![1, 2]));

        outcome.reject();
        assert!(outcome.is_error);
        assert_eq!(outcome.data, Some(vec![1, 2]));
        assert_eq!(outcome.current(), None);

        outcome.fulfill(vec![3]);
        assert!(!outcome.is_error);
        assert_eq!(outcome.current(), Some(&vec![3]));
    }
}
