//! Chat session: local commands first, the model otherwise

use std::sync::Arc;

use studystore::TaskStore;
use tracing::{debug, info};

use super::Command;
use crate::assistant::Responder;
use crate::messages;

/// Who wrote a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Bot,
}

/// One line of the chat transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub from: Speaker,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            from: Speaker::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            from: Speaker::Bot,
            text: text.into(),
        }
    }
}

/// A conversation over an injected task store and responder
pub struct ChatSession {
    store: TaskStore,
    responder: Arc<dyn Responder>,
    transcript: Vec<ChatMessage>,
}

impl ChatSession {
    /// Create a session; the transcript opens with the greeting
    pub fn new(store: TaskStore, responder: Arc<dyn Responder>) -> Self {
        info!(responder = responder.name(), tasks = store.len(), "ChatSession created");
        Self {
            store,
            responder,
            transcript: vec![ChatMessage::bot(messages::GREETING)],
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TaskStore {
        &mut self.store
    }

    /// Name of the strategy answering unknown input
    pub fn responder_name(&self) -> &'static str {
        self.responder.name()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Drop everything but the greeting
    pub fn clear_transcript(&mut self) {
        self.transcript.truncate(1);
    }

    /// Answer one user message
    ///
    /// Returns None for blank input. Local commands mutate the store
    /// synchronously; only unrecognized input awaits the responder.
    pub async fn handle(&mut self, input: &str) -> Option<String> {
        if input.trim().is_empty() {
            return None;
        }
        self.transcript.push(ChatMessage::user(input));

        let command = Command::parse(input);
        debug!(?command, "handle: parsed");

        let reply = match self.run_local(&command) {
            Some(reply) => reply,
            None => {
                let reply = self.responder.reply(input).await;
                if reply.trim().is_empty() {
                    messages::NOT_UNDERSTOOD.to_string()
                } else {
                    reply
                }
            }
        };

        self.transcript.push(ChatMessage::bot(reply.clone()));
        Some(reply)
    }

    /// Execute a local command; None means the model must answer
    pub fn run_local(&mut self, command: &Command) -> Option<String> {
        match command {
            Command::Help => Some(messages::COMMANDS_HELP.to_string()),
            Command::MissingTitle => Some(messages::MISSING_TITLE.to_string()),
            Command::Add { title } => {
                self.store.add(title.clone(), None, None);
                Some(messages::task_added(title))
            }
            Command::Progress => Some(messages::progress_report(
                self.store.progress(),
                self.store.completed_count(),
                self.store.len(),
            )),
            Command::List => Some(messages::task_list(self.store.tasks())),
            Command::Unknown => None,
        }
    }
}
