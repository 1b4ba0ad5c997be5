use serde::{Deserialize, Deserializer, Serialize};

/// A task as returned by the backend.
///
/// The backend is inconsistent about field casing (`_id`, `iscompleted`, ...),
/// so both spellings are accepted when decoding. It is also loose about
/// types: numeric ids are read as text and `null` reads as empty.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Task {
    #[serde(alias = "_id", deserialize_with = "loose_string")]
    pub id: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub title: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub description: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub date: String,
    #[serde(
        rename = "isCompleted",
        alias = "iscompleted",
        default,
        deserialize_with = "null_as_default"
    )]
    pub is_completed: bool,
    #[serde(
        rename = "isImportant",
        alias = "isimportant",
        default,
        deserialize_with = "null_as_default"
    )]
    pub is_important: bool,
    #[serde(
        rename = "userId",
        alias = "userid",
        default,
        deserialize_with = "loose_string"
    )]
    pub owner_id: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

fn loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<TextOrNumber>::deserialize(deserializer)? {
        Some(TextOrNumber::Text(text)) => text,
        Some(TextOrNumber::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of a create request; the server assigns the id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub date: String,
    pub is_completed: bool,
    pub is_important: bool,
    pub user_id: String,
}

/// Body of a full-replace update request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub is_completed: bool,
    pub is_important: bool,
}

/// The four task views: everything, done, still open, flagged important.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TaskFilter {
    #[default]
    Home,
    Completed,
    Proceeding,
    Important,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::Home => true,
            TaskFilter::Completed => task.is_completed,
            TaskFilter::Proceeding => !task.is_completed,
            TaskFilter::Important => task.is_important,
        }
    }

    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskFilter::Home => "Home",
            TaskFilter::Completed => "Completed",
            TaskFilter::Proceeding => "Proceeding",
            TaskFilter::Important => "Important",
        }
    }
}
