//! Local chat command matching

/// Words that introduce a new task
const ADD_WORDS: [&str; 2] = ["ajouter", "add"];

/// Substrings that ask for progress
const PROGRESS_WORDS: [&str; 3] = ["avancement", "progress", "progrès"];

/// Substrings that ask for the task list
const LIST_WORDS: [&str; 3] = ["liste", "tâche", "tache"];

/// A chat input recognized as a local command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `aide` / `help`
    Help,
    /// `ajouter <titre>` / `add <title>`
    Add { title: String },
    /// Add command with nothing after it
    MissingTitle,
    /// Any input mentioning progress
    Progress,
    /// Any input mentioning the task list
    List,
    /// Everything else; answered by the model
    Unknown,
}

impl Command {
    /// Classify raw input, first matching rule wins
    ///
    /// Matching is case-insensitive on the trimmed input. The task title
    /// keeps its original case.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        let t = trimmed.to_lowercase();

        if t == "aide" || t == "help" {
            return Command::Help;
        }

        if t.split_whitespace().next().is_some_and(|w| ADD_WORDS.contains(&w)) {
            let title = trimmed
                .split_once(char::is_whitespace)
                .map(|(_, rest)| rest.trim())
                .unwrap_or("");
            if title.is_empty() {
                return Command::MissingTitle;
            }
            return Command::Add {
                title: title.to_string(),
            };
        }

        if PROGRESS_WORDS.iter().any(|w| t.contains(w)) {
            return Command::Progress;
        }

        if LIST_WORDS.iter().any(|w| t.contains(w)) {
            return Command::List;
        }

        Command::Unknown
    }

    /// Whether the input must be sent to the model
    pub fn is_unknown(&self) -> bool {
        matches!(self, Command::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(title: &str) -> Command {
        Command::Add {
            title: title.to_string(),
        }
    }

    #[test]
    fn test_help_exact_only() {
        assert_eq!(Command::parse("aide"), Command::Help);
        assert_eq!(Command::parse("  HELP  "), Command::Help);
        assert_eq!(Command::parse("aide moi"), Command::Unknown);
    }

    #[test]
    fn test_add_extracts_title() {
        assert_eq!(Command::parse("ajouter Préparer examen"), add("Préparer examen"));
        assert_eq!(Command::parse("Add   Devoir math  "), add("Devoir math"));
        assert_eq!(Command::parse("  ajouter\tRéviser"), add("Réviser"));
    }

    #[test]
    fn test_add_without_title() {
        assert_eq!(Command::parse("ajouter "), Command::MissingTitle);
        assert_eq!(Command::parse("ajouter"), Command::MissingTitle);
        assert_eq!(Command::parse("add    "), Command::MissingTitle);
    }

    #[test]
    fn test_add_needs_whole_word() {
        assert_eq!(Command::parse("addition de fractions"), Command::Unknown);
    }

    #[test]
    fn test_progress_synonyms() {
        assert_eq!(Command::parse("mon avancement ?"), Command::Progress);
        assert_eq!(Command::parse("Progress please"), Command::Progress);
        assert_eq!(Command::parse("quels PROGRÈS"), Command::Progress);
    }

    #[test]
    fn test_list_synonyms() {
        assert_eq!(Command::parse("liste"), Command::List);
        assert_eq!(Command::parse("mes tâches"), Command::List);
        assert_eq!(Command::parse("Quelle TACHE ?"), Command::List);
    }

    #[test]
    fn test_progress_checked_before_list() {
        assert_eq!(Command::parse("liste et avancement"), Command::Progress);
    }

    #[test]
    fn test_add_checked_before_list() {
        assert_eq!(Command::parse("ajouter tâche de lecture"), add("tâche de lecture"));
    }

    #[test]
    fn test_unknown() {
        let cmd = Command::parse("Explique le théorème de Pythagore");
        assert_eq!(cmd, Command::Unknown);
        assert!(cmd.is_unknown());
        assert!(!Command::Help.is_unknown());
    }
}
