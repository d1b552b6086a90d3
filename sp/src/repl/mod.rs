//! Interactive REPL for the study planner
//!
//! Line-edited chat with the assistant, plus slash commands for the
//! progress view.

mod session;

pub use session::{ReplSession, progress_bar};

use eyre::{Context, Result};
use studystore::TaskStore;

use crate::assistant::create_responder;
use crate::chat::ChatSession;
use crate::config::Config;

/// Run the interactive REPL
///
/// This is the main entry point for `sp chat`.
pub async fn run_interactive(config: &Config, store: TaskStore, initial_message: Option<String>) -> Result<()> {
    let responder = create_responder(&config.assistant).context("Failed to create assistant")?;

    let chat = ChatSession::new(store, responder);
    let mut session = ReplSession::new(chat);
    session.run(initial_message).await
}
