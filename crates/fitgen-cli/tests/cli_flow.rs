use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::{Result, bail};

fn fitgen(args: &[&str]) -> Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_fitgen"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()?;
    Ok(output)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn workspace() -> PathBuf {
    std::env::temp_dir().join(format!("fitgen_cli_{}", uuid::Uuid::new_v4()))
}

fn catalog_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../queries/health_fitness_app_queries.sql")
}

#[test]
fn generate_then_audit_and_query() -> Result<()> {
    let dir = workspace();
    std::fs::create_dir_all(&dir)?;
    let db = format!("sqlite://{}", dir.join("app.db").display());
    let runs = dir.join("runs");
    let runs_arg = runs.display().to_string();

    let generated = fitgen(&[
        "generate",
        "--db",
        &db,
        "--users",
        "2",
        "--per-user",
        "3",
        "--seed",
        "5",
        "--today",
        "2026-10-19",
        "--run-dir",
        &runs_arg,
    ])?;
    if !generated.status.success() {
        bail!("generate failed: {}", String::from_utf8_lossy(&generated.stderr));
    }
    assert!(stdout(&generated).contains("seed 5"));

    let run_root = std::fs::read_dir(&runs)?
        .next()
        .transpose()?
        .map(|entry| entry.path())
        .ok_or_else(|| anyhow::anyhow!("no run directory"))?;
    for artifact in ["config.json", "logs.ndjson", "generation_report.json"] {
        assert!(run_root.join(artifact).exists(), "{artifact}");
    }
    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(run_root.join("generation_report.json"))?)?;
    assert_eq!(report["rows_committed"]["FoodItems"], 60);

    let audit = fitgen(&["audit", "--db", &db, "--strict"])?;
    assert!(audit.status.success(), "{}", String::from_utf8_lossy(&audit.stderr));

    let catalog = catalog_path().display().to_string();
    let query = fitgen(&[
        "query",
        "--db",
        &db,
        "--file",
        &catalog,
        "--label",
        "Sleep logs for a user",
        "--user-id",
        "1",
    ])?;
    assert!(query.status.success());
    assert_eq!(stdout(&query).matches(" | ").count(), 3 * 5);

    let empty = fitgen(&[
        "query",
        "--db",
        &db,
        "--file",
        &catalog,
        "--sql",
        "SELECT * FROM Users WHERE UserID = 0",
    ])?;
    assert_eq!(stdout(&empty), "No results found.\n");
    Ok(())
}

#[test]
fn invalid_options_are_rejected_before_writing() -> Result<()> {
    let dir = workspace();
    let db = format!("sqlite://{}", dir.join("app.db").display());
    let run_dir = dir.display().to_string();
    let output = fitgen(&[
        "generate",
        "--db",
        &db,
        "--users",
        "0",
        "--run-dir",
        &run_dir,
    ])?;
    assert!(!output.status.success());
    assert!(!dir.join("app.db").exists());
    Ok(())
}
