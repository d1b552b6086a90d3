//! Study Planner - study tasks with a chat-style assistant
//!
//! A task list persisted to a storage slot, and an assistant that answers
//! a few local commands itself and forwards everything else to a language
//! model (through a backend relay, the provider API, or canned offline
//! replies).
//!
//! # Modules
//!
//! - [`assistant`] - Model query adapter and its three strategies
//! - [`chat`] - Local command interpreter and chat session
//! - [`repl`] - Interactive terminal chat
//! - [`config`] - Configuration types and loading
//! - [`messages`] - User-facing reply text
//! - [`cli`] - Command-line interface

pub mod assistant;
pub mod chat;
pub mod cli;
pub mod config;
pub mod messages;
pub mod repl;

// Re-export commonly used types
pub use assistant::{AssistantError, OfflineResponder, Responder, create_responder};
pub use chat::{ChatMessage, ChatSession, Command, Speaker};
pub use config::{AssistantConfig, Config, StorageConfig, Transport};
pub use studystore::{FileStorage, MemoryStorage, StoreEvent, Task, TaskStore};
