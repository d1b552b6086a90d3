//! Binary tests for the non-interactive subcommands

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `sp` isolated from the user's home, config and provider credentials
fn sp(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sp").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("NO_COLOR", "1")
        .env_remove("GEMINI_API_KEY")
        .env_remove("GEMINI_PROXY_URL")
        .env_remove("GEMINI_MODEL")
        .arg("--data-dir")
        .arg(home.path().join("tasks"));
    cmd
}

#[test]
fn help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    sp(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("progress"));
}

#[test]
fn empty_list() {
    let home = TempDir::new().unwrap();
    sp(&home).arg("list").assert().success().stdout(predicate::str::contains("No tasks"));
}

#[test]
fn add_persists_to_slot_file() {
    let home = TempDir::new().unwrap();
    sp(&home)
        .args(["add", "Réviser", "chapitre", "3", "--due", "vendredi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added: Réviser chapitre 3"));

    let slot = home.path().join("tasks").join("study_planner_tasks_v1.json");
    let raw = std::fs::read_to_string(slot).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[0]["title"], "Réviser chapitre 3");
    assert_eq!(json[0]["due"], "vendredi");
    assert_eq!(json[0]["completed"], false);
}

#[test]
fn list_json_is_most_recent_first() {
    let home = TempDir::new().unwrap();
    sp(&home).args(["add", "Premier"]).assert().success();
    sp(&home).args(["add", "Second"]).assert().success();

    let output = sp(&home).args(["list", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let tasks: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tasks[0]["title"], "Second");
    assert_eq!(tasks[1]["title"], "Premier");
}

#[test]
fn toggle_by_id_prefix_updates_progress() {
    let home = TempDir::new().unwrap();
    sp(&home).args(["add", "Lire Candide"]).assert().success();

    let output = sp(&home).args(["list", "-f", "json"]).output().unwrap();
    let tasks: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let id = tasks[0]["id"].as_str().unwrap().to_string();

    sp(&home)
        .args(["toggle", &id[..8]])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lire Candide"))
        .stdout(predicate::str::contains("100%"));

    sp(&home)
        .arg("progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("1/1 completed"));
}

#[test]
fn toggle_unknown_id_reports_no_match() {
    let home = TempDir::new().unwrap();
    sp(&home)
        .args(["toggle", "does-not-exist"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No task matches: does-not-exist"));
}

#[test]
fn ask_help_offline() {
    let home = TempDir::new().unwrap();
    sp(&home)
        .args(["ask", "aide"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Commandes: `ajouter <titre>` ; `avancement` ; `liste` ; `aide`",
        ));
}

#[test]
fn ask_add_then_progress() {
    let home = TempDir::new().unwrap();
    sp(&home)
        .args(["ask", "ajouter", "Fiche", "de", "lecture"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tâche ajoutée : \"Fiche de lecture\""));

    sp(&home)
        .args(["ask", "avancement"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ton avancement est de 0% (0/1)"));
}

#[test]
fn ask_unknown_offline_echoes() {
    let home = TempDir::new().unwrap();
    sp(&home)
        .args(["ask", "Bonjour"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tu as dit: \"Bonjour\""));
}

#[test]
fn add_requires_title() {
    let home = TempDir::new().unwrap();
    sp(&home).arg("add").assert().failure();
}
