//! StudyStore - persistent task list for the study planner
//!
//! Holds an ordered list of study tasks (most recent first), mirrors it to a
//! single key-value storage slot after every mutation, and lets consumers
//! subscribe to changes.
//!
//! # Layout
//!
//! ```text
//! {data_dir}/
//! ├── study_planner_tasks_v1.json   # JSON array of tasks
//! └── study_planner_tasks_v1.lock   # advisory write lock
//! ```
//!
//! # Example
//!
//! ```ignore
//! use studystore::{FileStorage, TaskStore};
//!
//! let mut store = TaskStore::open(FileStorage::open("/tmp/planner")?);
//! let task = store.add("Prepare exam", None, None);
//! store.toggle(&task.id);
//! assert_eq!(store.progress(), 100);
//! ```

mod storage;
mod store;
mod task;

pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{StoreEvent, TaskStore};
pub use task::{Task, decode_tasks, encode_tasks, generate_id};

/// Storage slot key holding the serialized task list
pub const STORAGE_KEY: &str = "study_planner_tasks_v1";

/// Compute the rounded completion percentage
///
/// Half-up rounding in integer arithmetic; an empty list is 0%.
pub fn percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total) as u64;
    let total = total as u64;
    ((200 * completed + total) / (2 * total)) as u8
}
