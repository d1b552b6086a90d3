//! User-facing reply text
//!
//! The assistant speaks French; every canned string lives here so the chat
//! interpreter and the offline responder stay in agreement.

use studystore::Task;

/// First message shown when a chat session starts
pub const GREETING: &str = "Bonjour ! Je suis ton assistant d'étude. Tape `aide` pour voir les commandes.";

/// Reply to `aide` / `help`
pub const COMMANDS_HELP: &str = "Commandes: `ajouter <titre>` ; `avancement` ; `liste` ; `aide`";

/// Reply to an add command without a title
pub const MISSING_TITLE: &str = "Donne un titre : `ajouter Préparer examen`";

/// Reply to a list command on an empty store
pub const NO_TASKS: &str = "Aucune tâche pour le moment. Ajoute-en avec `ajouter <titre>`.";

/// Reply when nothing else produced an answer
pub const NOT_UNDERSTOOD: &str = "Je n'ai pas compris. Tape `aide` pour les commandes.";

/// Placeholder when the provider returned no text
pub const EMPTY_MODEL_REPLY: &str = "Réponse vide du modèle.";

/// Offline reply to an add request
pub const OFFLINE_ADD_HINT: &str = "Je peux enregistrer cette tâche pour toi. Exemple: ajouter Préparer examen";

/// Offline reply to a progress question
pub const OFFLINE_PROGRESS_HINT: &str =
    "Je ne suis pas connecté à un modèle externe — ton avancement est calculé localement.";

/// Indicator shown while a model reply is pending
pub const PENDING: &str = "...";

/// Confirmation after adding a task
pub fn task_added(title: &str) -> String {
    format!("Tâche ajoutée : \"{}\"", title)
}

/// Progress summary
pub fn progress_report(progress: u8, completed: usize, total: usize) -> String {
    format!("Ton avancement est de {}% ({}/{})", progress, completed, total)
}

/// Task enumeration with checkbox markers
pub fn task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return NO_TASKS.to_string();
    }
    let lines: Vec<String> = tasks.iter().map(|t| format!("{} {}", t.marker(), t.title)).collect();
    format!("Voici tes tâches:\n{}", lines.join("\n"))
}

/// Offline echo of an unrecognized prompt
pub fn offline_echo(prompt: &str) -> String {
    format!("Je suis en mode hors-ligne. Tu as dit: \"{}\"", prompt)
}

/// Model failure rendered for display
pub fn connection_error(message: &str) -> String {
    format!("Erreur de connexion au modèle: {}", message)
}
