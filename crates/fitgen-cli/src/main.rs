mod config;
mod registry;

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{ArgGroup, Args, Parser, Subcommand};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;
use uuid::Uuid;

use config::{ConfigError, Overrides, load_options};
use fitgen_core::{SCHEMA_STATEMENTS, split_statements};
use fitgen_eval::{AuditEngine, EvalError, render_report, write_report};
use fitgen_generate::{GenerationEngine, GenerationError, SqliteStore, StoreError, apply_schema};
use fitgen_query::{QueryCatalog, QueryError, QueryRunner, render_rows};
use registry::{RunContext, init_logging, start_run, write_generation_report};

const DEFAULT_DB: &str = "sqlite:health_fitness_app.db";
const DEFAULT_QUERIES: &str = "queries/health_fitness_app_queries.sql";

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("query error: {0}")]
    Query(#[from] QueryError),
    #[error("audit error: {0}")]
    Eval(#[from] EvalError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "fitgen", version, about = "Synthetic health and fitness data for SQLite")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drop and recreate the schema.
    Init(InitArgs),
    /// Recreate the schema and populate it.
    Generate(GenerateArgs),
    /// Run a labeled or ad-hoc query.
    Query(QueryArgs),
    /// Check a populated database against the dataset invariants.
    Audit(AuditArgs),
}

#[derive(Args, Debug)]
struct InitArgs {
    /// SQLite connection string.
    #[arg(long, default_value = DEFAULT_DB)]
    db: String,
    /// Semicolon-separated schema script replacing the built-in schema.
    #[arg(long)]
    schema_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[arg(long, default_value = DEFAULT_DB)]
    db: String,
    /// TOML file with generation options.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    users: Option<u32>,
    /// Rows per user for each per-user table.
    #[arg(long)]
    per_user: Option<u32>,
    /// Reference date (YYYY-MM-DD) for trailing date windows.
    #[arg(long)]
    today: Option<NaiveDate>,
    #[arg(long)]
    schema_file: Option<PathBuf>,
    /// Output directory for runs.
    #[arg(long, default_value = "runs")]
    run_dir: PathBuf,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("mode").required(true).args(["list", "label", "sql"])))]
struct QueryArgs {
    #[arg(long, default_value = DEFAULT_DB)]
    db: String,
    /// Labeled query file.
    #[arg(long, default_value = DEFAULT_QUERIES)]
    file: PathBuf,
    /// Print the available labels.
    #[arg(long, default_value_t = false)]
    list: bool,
    #[arg(long)]
    label: Option<String>,
    /// Bound to the query's `?` placeholders.
    #[arg(long)]
    user_id: Option<i64>,
    /// Ad-hoc SQL without parameters.
    #[arg(long)]
    sql: Option<String>,
}

#[derive(Args, Debug)]
struct AuditArgs {
    #[arg(long, default_value = DEFAULT_DB)]
    db: String,
    /// Optional output path for the JSON report.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Exit with an error when any check fails.
    #[arg(long, default_value_t = false)]
    strict: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Init(args) => run_init(args).await,
        Command::Generate(args) => run_generate(args).await,
        Command::Query(args) => run_query(args).await,
        Command::Audit(args) => run_audit(args).await,
    }
}

async fn run_init(args: InitArgs) -> Result<(), CliError> {
    init_logging(None)?;
    let statements = schema_statements(args.schema_file.as_deref())?;
    let store = SqliteStore::connect(&args.db).await?;
    let applied = apply_schema(&store, &statements).await?;
    store.close().await;
    println!("schema applied: {applied} statements");
    Ok(())
}

async fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let GenerateArgs {
        db,
        config,
        seed,
        users,
        per_user,
        today,
        schema_file,
        run_dir,
    } = args;

    let mut options = load_options(config.as_deref())?;
    Overrides {
        users,
        per_user,
        seed,
        today,
    }
    .apply(&mut options);
    options.validate()?;

    let run_id = Uuid::new_v4().to_string();
    let run_ctx = RunContext {
        run_id: run_id.clone(),
        started_at: chrono::Utc::now(),
        run_dir,
        database: db.clone(),
        schema_source: schema_file
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "builtin".to_string()),
        options: options.clone(),
    };
    let run_paths = start_run(&run_ctx)?;
    init_logging(Some(&run_paths.logs_path))?;

    tracing::info!(event = "run_started", run_id = %run_id, db = %db);

    let statements = schema_statements(schema_file.as_deref())?;
    let store = SqliteStore::connect(&db).await?;
    let applied = apply_schema(&store, &statements).await?;
    tracing::info!(event = "schema_applied", statements = applied);

    let report = GenerationEngine::new(options).run_as(&store, run_id).await?;
    store.close().await;

    write_generation_report(&run_paths, &report)?;
    tracing::info!(
        event = "report_written",
        path = %run_paths.report_path.display()
    );

    println!(
        "seed {} | {} units committed | {} failed | {} ms",
        report.seed,
        report.units_committed,
        report.failures.len(),
        report.duration_ms
    );
    for (table, rows) in &report.rows_committed {
        println!("  {:<16} {rows}", table.name());
    }
    for failure in &report.failures {
        println!(
            "  failed {} (user {}): {}",
            failure.unit,
            failure
                .user_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
            failure.error
        );
    }
    println!("run directory: {}", run_paths.root.display());
    Ok(())
}

async fn run_query(args: QueryArgs) -> Result<(), CliError> {
    init_logging(None)?;
    let catalog = QueryCatalog::load(&args.file)?;

    if args.list {
        for label in catalog.labels() {
            println!("{label}");
        }
        return Ok(());
    }

    let pool = open_existing(&args.db).await?;
    let runner = QueryRunner::new(pool.clone());
    let output = match (args.label, args.sql) {
        (Some(label), _) => runner.run_labeled(&catalog, &label, args.user_id).await?,
        (None, Some(sql)) => runner.run_sql(&sql).await?,
        (None, None) => return Ok(()),
    };
    pool.close().await;

    print!("{}", render_rows(&output));
    Ok(())
}

async fn run_audit(args: AuditArgs) -> Result<(), CliError> {
    init_logging(None)?;
    let pool = open_existing(&args.db).await?;
    let report = AuditEngine::new(pool.clone()).run().await?;
    pool.close().await;

    print!("{}", render_report(&report));
    if let Some(out) = args.out.as_deref() {
        write_report(out, &report)?;
        tracing::info!(event = "audit_written", path = %out.display());
    }

    if args.strict && !report.is_clean() {
        return Err(EvalError::Violations(report.total_violations()).into());
    }
    Ok(())
}

fn schema_statements(schema_file: Option<&Path>) -> Result<Vec<String>, CliError> {
    match schema_file {
        Some(path) => {
            let script = std::fs::read_to_string(path)?;
            Ok(split_statements(&script, ';'))
        }
        None => Ok(SCHEMA_STATEMENTS.iter().map(|sql| sql.to_string()).collect()),
    }
}

/// Connect without creating the database file.
async fn open_existing(url: &str) -> Result<SqlitePool, CliError> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(false);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await?;
    Ok(pool)
}
