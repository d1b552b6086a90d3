//! TaskStore - in-memory task list mirrored to a storage slot

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::storage::Storage;
use crate::task::{Task, decode_tasks, encode_tasks};
use crate::{STORAGE_KEY, percent};

/// Event broadcast after every store mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A task was prepended to the list
    Added { task: Task },
    /// A task's completion flag flipped
    Toggled { id: String, completed: bool },
}

/// Ordered task list, most recent first
///
/// Every mutation persists the full list to the storage slot and notifies
/// subscribers. Loading never fails: an absent or unreadable slot starts
/// an empty list.
pub struct TaskStore {
    tasks: Vec<Task>,
    storage: Box<dyn Storage>,
    event_tx: broadcast::Sender<StoreEvent>,
}

impl TaskStore {
    /// Open the store, rehydrating from the storage slot
    pub fn open(storage: impl Storage + 'static) -> Self {
        let tasks = load_tasks(&storage);
        info!(count = tasks.len(), "TaskStore opened");

        let (event_tx, _) = broadcast::channel(64);

        Self {
            tasks,
            storage: Box::new(storage),
            event_tx,
        }
    }

    /// All tasks in display order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Alias of [`TaskStore::tasks`]
    pub fn get(&self) -> &[Task] {
        self.tasks()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of completed tasks
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Completion percentage, 0 when there are no tasks
    pub fn progress(&self) -> u8 {
        percent(self.completed_count(), self.tasks.len())
    }

    /// Add a task at the head of the list
    ///
    /// The title is stored as given; callers validate it.
    pub fn add(&mut self, title: impl Into<String>, due: Option<String>, notes: Option<String>) -> Task {
        let task = Task::new(title, due, notes);
        debug!(id = %task.id, title = %task.title, "add: called");

        self.tasks.insert(0, task.clone());
        self.persist_or_warn();
        let _ = self.event_tx.send(StoreEvent::Added { task: task.clone() });

        task
    }

    /// Flip the completion flag of the task with `id`
    ///
    /// Returns the updated task, or None (and changes nothing) if absent.
    pub fn toggle(&mut self, id: &str) -> Option<&Task> {
        debug!(id, "toggle: called");
        let index = match self.tasks.iter().position(|t| t.id == id) {
            Some(index) => index,
            None => {
                debug!(id, "toggle: no such task");
                return None;
            }
        };

        self.tasks[index].completed = !self.tasks[index].completed;
        let completed = self.tasks[index].completed;
        self.persist_or_warn();
        let _ = self.event_tx.send(StoreEvent::Toggled {
            id: id.to_string(),
            completed,
        });

        self.tasks.get(index)
    }

    /// Find a task by exact id or unique id prefix
    pub fn resolve(&self, needle: &str) -> Option<&Task> {
        if let Some(task) = self.tasks.iter().find(|t| t.id == needle) {
            return Some(task);
        }
        if needle.is_empty() {
            return None;
        }

        let mut matches = self.tasks.iter().filter(|t| t.id.starts_with(needle));
        match (matches.next(), matches.next()) {
            (Some(task), None) => Some(task),
            _ => None,
        }
    }

    /// Subscribe to mutation events
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.event_tx.subscribe()
    }

    /// Write the full list to the storage slot
    pub fn persist(&mut self) -> eyre::Result<()> {
        let raw = encode_tasks(&self.tasks)?;
        self.storage.set(STORAGE_KEY, &raw)
    }

    fn persist_or_warn(&mut self) {
        if let Err(e) = self.persist() {
            warn!(error = %e, "Failed to persist task list");
        }
    }
}

fn load_tasks(storage: &dyn Storage) -> Vec<Task> {
    let raw = match storage.get(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("load_tasks: no stored list");
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "Failed to read stored task list, starting empty");
            return Vec::new();
        }
    };

    decode_tasks(&raw).unwrap_or_else(|| {
        warn!("Stored task list is malformed, starting empty");
        Vec::new()
    })
}
