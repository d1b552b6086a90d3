//! Task record and its storage encoding

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single study task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique, immutable identifier
    pub id: String,

    /// Display text, set at creation
    pub title: String,

    /// Free-text due date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,

    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Completion flag, flipped only by toggle
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create a pending task with a fresh id
    pub fn new(title: impl Into<String>, due: Option<String>, notes: Option<String>) -> Self {
        Self {
            id: generate_id(),
            title: title.into(),
            due,
            notes,
            completed: false,
        }
    }

    /// Checkbox marker used when listing tasks
    pub fn marker(&self) -> &'static str {
        if self.completed { "✅" } else { "⬜" }
    }
}

/// Generate a fresh task id
pub fn generate_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// Serialize a task list to the storage format
pub fn encode_tasks(tasks: &[Task]) -> serde_json::Result<String> {
    serde_json::to_string(tasks)
}

/// Parse the storage format
///
/// Returns None when the value is not a JSON array of tasks.
pub fn decode_tasks(raw: &str) -> Option<Vec<Task>> {
    match serde_json::from_str::<Vec<Task>>(raw) {
        Ok(tasks) => Some(tasks),
        Err(e) => {
            debug!(error = %e, "decode_tasks: parse failed");
            None
        }
    }
}
