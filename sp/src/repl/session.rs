//! REPL session management

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use studystore::{StoreEvent, TaskStore};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::debug;

use crate::chat::{ChatSession, Command, Speaker};
use crate::messages;

/// Width of the progress bar in cells
const BAR_WIDTH: usize = 20;

/// Interactive chat over a [`ChatSession`]
pub struct ReplSession {
    chat: ChatSession,
    events: broadcast::Receiver<StoreEvent>,
}

impl ReplSession {
    /// Create a new REPL session
    pub fn new(chat: ChatSession) -> Self {
        let events = chat.store().subscribe();
        Self { chat, events }
    }

    /// Run the REPL main loop
    pub async fn run(&mut self, initial_message: Option<String>) -> Result<()> {
        self.print_welcome();

        // If an initial message was provided, process it first
        if let Some(message) = initial_message {
            println!("{} {}", ">".bright_green(), message);
            self.process_user_input(&message).await;
        }

        // Create readline editor for proper line editing
        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let readline = rl.readline(&format!("{} ", ">".bright_green()));

            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(input);

                    if input.starts_with('/') {
                        match self.handle_slash_command(input) {
                            SlashResult::Continue => continue,
                            SlashResult::Quit => break,
                        }
                    } else {
                        self.process_user_input(input).await;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C - just show new prompt
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D - exit
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("À bientôt !");
        Ok(())
    }

    /// Print welcome message
    fn print_welcome(&self) {
        println!();
        println!("{}", "Study Planner".bright_cyan().bold());
        println!(
            "Assistant: {}  Tâches: {}  Avancement: {}%",
            self.chat.responder_name().yellow(),
            self.chat.store().len(),
            self.chat.store().progress()
        );
        println!("Type {} for help, {} to quit", "/help".yellow(), "/quit".yellow());
        println!();
        print_bot(messages::GREETING);
    }

    /// Handle slash commands
    fn handle_slash_command(&mut self, input: &str) -> SlashResult {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or("");

        match cmd {
            "/help" | "/h" => {
                self.print_help();
                SlashResult::Continue
            }
            "/quit" | "/q" | "/exit" => SlashResult::Quit,
            "/tasks" | "/t" => {
                print_progress_view(self.chat.store());
                SlashResult::Continue
            }
            "/toggle" => {
                match parts.get(1) {
                    Some(arg) => self.toggle(arg),
                    None => println!("{} Usage: /toggle <n|id>", "?".yellow()),
                }
                SlashResult::Continue
            }
            "/clear" | "/c" => {
                self.chat.clear_transcript();
                println!("{}", "Conversation cleared.".dimmed());
                SlashResult::Continue
            }
            "/history" => {
                self.print_history();
                SlashResult::Continue
            }
            _ => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
                SlashResult::Continue
            }
        }
    }

    /// Print help message
    fn print_help(&self) {
        println!();
        println!("{}", "Chat Commands:".bright_cyan());
        println!("  {:20} Add a task", "ajouter <titre>".yellow());
        println!("  {:20} Show progress", "avancement".yellow());
        println!("  {:20} List tasks", "liste".yellow());
        println!("  {:20} Show chat commands", "aide".yellow());
        println!("  {:20} Anything else goes to the assistant", "...".yellow());
        println!();
        println!("{}", "Slash Commands:".bright_cyan());
        println!("  {:20} Show this help", "/help".yellow());
        println!("  {:20} Exit the REPL", "/quit".yellow());
        println!("  {:20} Show progress bar and numbered tasks", "/tasks".yellow());
        println!("  {:20} Mark a task done or not done", "/toggle <n|id>".yellow());
        println!("  {:20} Clear conversation history", "/clear".yellow());
        println!("  {:20} Show conversation history", "/history".yellow());
        println!();
    }

    /// Print conversation history
    fn print_history(&self) {
        println!();
        println!("{}", "Conversation History:".bright_cyan());
        for (i, msg) in self.chat.transcript().iter().enumerate() {
            let from = match msg.from {
                Speaker::User => "Toi".bright_green(),
                Speaker::Bot => "IA".bright_blue(),
            };
            let preview: String = msg.text.chars().take(50).collect();
            let preview = if msg.text.chars().count() > 50 {
                format!("{}...", preview)
            } else {
                preview
            };
            println!("  {}. {}: {}", i + 1, from, preview.replace('\n', " "));
        }
        println!();
    }

    /// Toggle by 1-based position in the list, or by id / id prefix
    fn toggle(&mut self, arg: &str) {
        let store = self.chat.store();
        let id = match arg.parse::<usize>() {
            Ok(n) if n >= 1 && n <= store.len() => Some(store.tasks()[n - 1].id.clone()),
            _ => store.resolve(arg).map(|t| t.id.clone()),
        };

        match id {
            Some(id) => {
                if let Some(task) = self.chat.store_mut().toggle(&id) {
                    println!("{} {}", task.marker(), task.title);
                }
                self.render_store_changes();
            }
            None => println!("{} No task matches: {}", "?".yellow(), arg),
        }
    }

    /// Send one message through the chat session and print the reply
    async fn process_user_input(&mut self, input: &str) {
        let pending = Command::parse(input).is_unknown();
        if pending {
            println!("{}", messages::PENDING.dimmed());
        }

        if let Some(reply) = self.chat.handle(input).await {
            print_bot(&reply);
        }
        self.render_store_changes();
    }

    /// Redraw the progress bar if the store changed since the last check
    fn render_store_changes(&mut self) {
        let mut changed = false;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    debug!(?event, "render_store_changes: event");
                    changed = true;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    debug!(skipped, "render_store_changes: lagged");
                    changed = true;
                }
                Err(_) => break,
            }
        }

        if changed {
            println!("{}", progress_bar(self.chat.store().progress()).dimmed());
        }
    }
}

/// Result of handling a slash command
enum SlashResult {
    Continue,
    Quit,
}

fn print_bot(text: &str) {
    for line in text.lines() {
        println!("{} {}", "IA".bright_blue().bold(), line);
    }
    println!();
}

/// Render the progress view: bar, then a numbered task list
fn print_progress_view(store: &TaskStore) {
    println!();
    println!("{}", "Avancement".bright_cyan());
    println!("{}", progress_bar(store.progress()));
    println!("{}% terminé", store.progress());
    println!();
    println!("{}", "Liste des tâches".bright_cyan());
    if store.is_empty() {
        println!("  {}", "Aucune tâche".dimmed());
    }
    for (i, task) in store.tasks().iter().enumerate() {
        let title = if task.completed {
            task.title.dimmed().to_string()
        } else {
            task.title.clone()
        };
        let short_id: String = task.id.chars().take(8).collect();
        println!("  {:>2}. {} {} {}", i + 1, task.marker(), title, short_id.dimmed());
    }
    println!();
}

/// Text progress bar like `[██████░░░░] 60%`
pub fn progress_bar(percent: u8) -> String {
    let percent = percent.min(100) as usize;
    let filled = (percent * BAR_WIDTH + 50) / 100;
    format!(
        "[{}{}] {}%",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        percent
    )
}
