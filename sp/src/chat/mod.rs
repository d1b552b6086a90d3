//! Chat command interpreter
//!
//! Recognizes a handful of local commands (help, add, progress, list) and
//! answers them from the task store; anything else goes to the model.

mod command;
mod session;

pub use command::Command;
pub use session::{ChatMessage, ChatSession, Speaker};
