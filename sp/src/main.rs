//! Study Planner - CLI entry point

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::info;

use studyplanner::assistant::create_responder;
use studyplanner::chat::ChatSession;
use studyplanner::cli::{Cli, Command, OutputFormat, get_log_path, join_words};
use studyplanner::config::Config;
use studyplanner::repl::{self, progress_bar};
use studystore::{FileStorage, TaskStore};

fn setup_logging(verbose: bool) -> Result<()> {
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Write to the log file, never to the terminal the chat runs in
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .context("Failed to open log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir;
    }

    info!(
        "Study planner loaded config: model={}, data_dir={}",
        config.assistant.model,
        config.storage.data_dir.display()
    );

    match cli.command {
        None => cmd_chat(&config, None).await,
        Some(Command::Chat { initial_message }) => {
            let message = Some(join_words(&initial_message)).filter(|m| !m.is_empty());
            cmd_chat(&config, message).await
        }
        Some(Command::Ask { prompt }) => cmd_ask(&config, &join_words(&prompt)).await,
        Some(Command::Add { title, due, notes }) => cmd_add(&config, &join_words(&title), due, notes),
        Some(Command::Toggle { id }) => cmd_toggle(&config, &id),
        Some(Command::List { format }) => cmd_list(&config, format),
        Some(Command::Progress) => cmd_progress(&config),
        Some(Command::Logs { lines }) => cmd_logs(lines),
    }
}

/// Open the task store under the configured data directory
fn open_store(data_dir: &Path) -> Result<TaskStore> {
    let storage = FileStorage::open(data_dir).context("Failed to open task storage")?;
    Ok(TaskStore::open(storage))
}

/// Run the interactive chat
async fn cmd_chat(config: &Config, initial_message: Option<String>) -> Result<()> {
    let store = open_store(&config.storage.data_dir)?;
    repl::run_interactive(config, store, initial_message).await
}

/// Answer a single message
async fn cmd_ask(config: &Config, prompt: &str) -> Result<()> {
    let store = open_store(&config.storage.data_dir)?;
    let responder = create_responder(&config.assistant).context("Failed to create assistant")?;
    let mut chat = ChatSession::new(store, responder);

    if let Some(reply) = chat.handle(prompt).await {
        println!("{}", reply);
    }
    Ok(())
}

/// Add a task
fn cmd_add(config: &Config, title: &str, due: Option<String>, notes: Option<String>) -> Result<()> {
    if title.is_empty() {
        return Err(eyre::eyre!("Task title must not be empty"));
    }

    let mut store = open_store(&config.storage.data_dir)?;
    let task = store.add(title, due, notes);
    println!("{} Added: {} {}", "✓".green(), task.title, task.id.dimmed());
    Ok(())
}

/// Flip a task's completion flag
fn cmd_toggle(config: &Config, id: &str) -> Result<()> {
    let mut store = open_store(&config.storage.data_dir)?;

    let Some(full_id) = store.resolve(id).map(|t| t.id.clone()) else {
        println!("No task matches: {}", id);
        return Ok(());
    };

    if let Some(task) = store.toggle(&full_id) {
        let state = if task.completed { "done".green() } else { "not done".yellow() };
        println!("{} {} ({})", task.marker(), task.title, state);
    }
    println!("{}", progress_bar(store.progress()));
    Ok(())
}

/// List tasks
fn cmd_list(config: &Config, format: OutputFormat) -> Result<()> {
    let store = open_store(&config.storage.data_dir)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(store.tasks())?);
        }
        OutputFormat::Text => {
            if store.is_empty() {
                println!("No tasks");
                return Ok(());
            }
            for task in store.tasks() {
                let mut line = format!("{} {} {}", task.marker(), task.id.dimmed(), task.title);
                if let Some(due) = &task.due {
                    line.push_str(&format!(" (due: {})", due.cyan()));
                }
                println!("{}", line);
                if let Some(notes) = &task.notes {
                    println!("    {}", notes.dimmed());
                }
            }
        }
    }

    Ok(())
}

/// Show progress
fn cmd_progress(config: &Config) -> Result<()> {
    let store = open_store(&config.storage.data_dir)?;
    println!("{}", progress_bar(store.progress()));
    println!("{}/{} completed", store.completed_count(), store.len());
    Ok(())
}

/// Show the tail of the log file
fn cmd_logs(lines: usize) -> Result<()> {
    let log_path: PathBuf = get_log_path();

    if !log_path.exists() {
        println!("No log file found at: {}", log_path.display());
        return Ok(());
    }

    let file = fs::File::open(&log_path).context("Failed to open log file")?;
    let reader = BufReader::new(file);
    let all_lines: Vec<String> = reader.lines().map_while(std::result::Result::ok).collect();

    let start = all_lines.len().saturating_sub(lines);
    for line in &all_lines[start..] {
        println!("{}", line);
    }

    Ok(())
}
