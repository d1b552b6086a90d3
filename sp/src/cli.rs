//! CLI command definitions and subcommands

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Study Planner - tasks and a chat assistant in the terminal
#[derive(Parser, Debug)]
#[command(
    name = "sp",
    version,
    about = "Study planner with a chat-style assistant",
    after_help = "Logs are written to: ~/.local/share/studyplanner/logs/studyplanner.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Directory holding the task list (overrides config)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Chat with the assistant (default)
    Chat {
        /// Message to send before the prompt appears
        #[arg(value_name = "MESSAGE")]
        initial_message: Vec<String>,
    },

    /// Send one message and print the reply
    Ask {
        /// The message
        #[arg(required = true)]
        prompt: Vec<String>,
    },

    /// Add a task
    Add {
        /// Task title
        #[arg(required = true)]
        title: Vec<String>,

        /// Due date (free text)
        #[arg(short, long)]
        due: Option<String>,

        /// Notes (free text)
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Mark a task done, or not done
    Toggle {
        /// Task id or unique id prefix
        #[arg(required = true)]
        id: String,
    },

    /// List tasks, most recent first
    List {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show completion progress
    Progress,

    /// Show recent log lines
    Logs {
        /// Number of lines to show
        #[arg(short = 'n', long, default_value = "50")]
        lines: usize,
    },
}

/// Output format for listings
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Join trailing words into one string
pub fn join_words(words: &[String]) -> String {
    words.join(" ").trim().to_string()
}

/// Get the path to the log file
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("studyplanner")
        .join("logs")
        .join("studyplanner.log")
}
