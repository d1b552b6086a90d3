//! Rule-based responder used when no remote transport is configured

use async_trait::async_trait;
use tracing::debug;

use super::Responder;
use crate::messages;

/// Keywords that mark a progress question
const PROGRESS_WORDS: [&str; 3] = ["avancement", "progress", "progrès"];

/// Canned replies, no network
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineResponder;

impl OfflineResponder {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Responder for OfflineResponder {
    async fn reply(&self, prompt: &str) -> String {
        canned_reply(prompt)
    }

    fn name(&self) -> &'static str {
        "offline"
    }
}

/// Match the prompt against the fixed keyword rules
pub fn canned_reply(prompt: &str) -> String {
    let t = prompt.trim().to_lowercase();
    debug!(%t, "canned_reply: called");

    if t == "aide" || t == "help" {
        return messages::COMMANDS_HELP.to_string();
    }
    if t.starts_with("ajouter ") {
        return messages::OFFLINE_ADD_HINT.to_string();
    }
    if PROGRESS_WORDS.iter().any(|w| t.contains(w)) {
        return messages::OFFLINE_PROGRESS_HINT.to_string();
    }
    messages::offline_echo(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_is_verbatim() {
        assert_eq!(
            canned_reply("aide"),
            "Commandes: `ajouter <titre>` ; `avancement` ; `liste` ; `aide`"
        );
        assert_eq!(canned_reply("  HELP "), messages::COMMANDS_HELP);
    }

    #[test]
    fn test_add_hint() {
        assert_eq!(canned_reply("Ajouter réviser"), messages::OFFLINE_ADD_HINT);
    }

    #[test]
    fn test_progress_hint() {
        assert_eq!(canned_reply("Quel est mon PROGRÈS ?"), messages::OFFLINE_PROGRESS_HINT);
        assert_eq!(canned_reply("show progress"), messages::OFFLINE_PROGRESS_HINT);
    }

    #[test]
    fn test_echo_keeps_original_prompt() {
        assert_eq!(
            canned_reply("Qu'est-ce qu'une Dérivée ?"),
            "Je suis en mode hors-ligne. Tu as dit: \"Qu'est-ce qu'une Dérivée ?\""
        );
    }

    #[tokio::test]
    async fn test_responder_never_touches_network() {
        let responder = OfflineResponder::new();
        assert_eq!(responder.reply("help").await, messages::COMMANDS_HELP);
        assert_eq!(responder.name(), "offline");
    }
}
