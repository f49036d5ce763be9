//! # AYN CLI Library
//!
//! Everything behind the `ayn` binary: argument parsing, configuration,
//! and one function per command. `main.rs` only calls [`run`].
//!
//! ## Module Organization
//! ```text
//! ayn_cli/
//! ├── lib.rs          ◄─── You are here (logging, dispatch, output)
//! ├── cli.rs          ◄─── clap argument tree
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState (store + AI client + config)
//! │   └── config.rs   ◄─── TOML / env / flag configuration
//! ├── commands/       ◄─── One module per command group
//! └── error.rs        ◄─── AppError, JSON on stderr, exit status
//! ```
//!
//! ## Invocation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cli::parse()  ──►  init_tracing()  ──►  AppConfig::load(--config)     │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                                  AppState::open(config, --db)          │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                                  execute(&mut state, command)          │
//! │                                      │                 │                │
//! │                                    Ok(json)          Err(AppError)      │
//! │                                      │                 │                │
//! │                                      ▼                 ▼                │
//! │                               stdout, exit 0    stderr, exit 1/2/3     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Logs go to stderr so stdout stays valid JSON. `RUST_LOG` overrides the
//! default filter.

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{
    Cli, Command, InvoiceCommand, RecipeCommand, StockCommand, TaskCommand, WasteCommand,
};
use commands::{backup, dashboard, insights, invoice, recipe, session, stock, task, waste};
use error::AppResult;
use state::{AppConfig, AppState};

/// Parses arguments, runs one command and prints its result.
pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting AYN");

    match run_cli(cli).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err.to_json());
            ExitCode::from(err.code.exit_status())
        }
    }
}

async fn run_cli(cli: Cli) -> AppResult<String> {
    let config = AppConfig::load(cli.config)?;
    let mut state = AppState::open(config, cli.db).await?;

    let result = execute(&mut state, cli.command).await;
    state.close().await;

    Ok(serde_json::to_string_pretty(&result?)?)
}

/// Runs one command against an open state.
pub async fn execute(state: &mut AppState, command: Command) -> AppResult<Value> {
    debug!(?command, "Executing command");

    match command {
        Command::Login { passphrase } => json(session::login(state, &passphrase).await?),
        Command::Logout => json(session::logout(state).await?),
        Command::Whoami => json(session::whoami(state)),

        Command::Stock(args) => match args.command {
            StockCommand::List { category, search } => {
                json(stock::list(state, category.as_deref(), search.as_deref())?)
            }
            StockCommand::Add(fields) => json(stock::add(state, fields).await?),
            StockCommand::Adjust { id, delta } => json(stock::adjust(state, &id, delta).await?),
        },

        Command::Recipe(args) => match args.command {
            RecipeCommand::List => json(recipe::list(state)?),
            RecipeCommand::Add(fields) => json(recipe::add(state, fields).await?),
            RecipeCommand::Sell { id } => json(recipe::sell(state, &id).await?),
            RecipeCommand::Cost { id } => json(recipe::cost(state, &id)?),
        },

        Command::Waste(args) => match args.command {
            WasteCommand::List => json(waste::list(state)?),
            WasteCommand::Record {
                stock_id,
                quantity,
                reason,
                date,
            } => json(waste::record(state, &stock_id, quantity, reason, date).await?),
        },

        Command::Task(args) => match args.command {
            TaskCommand::List => json(task::list(state)?),
            TaskCommand::Add {
                title,
                description,
                category,
                urgent,
            } => json(task::add(state, title, description, category, urgent).await?),
            TaskCommand::Complete { id } => json(task::complete(state, &id).await?),
        },

        Command::Invoice(args) => match args.command {
            InvoiceCommand::Scan { image, mime, apply } => json(invoice::scan(state, &image, mime, apply).await?),
        },

        Command::Insights => json(insights::insights(state).await?),
        Command::Dashboard => json(dashboard::dashboard(state)?),
        Command::Export { out } => json(backup::export(state, out).await?),
        Command::Import { file } => json(backup::import(state, &file).await?),
        Command::Reset { yes } => json(backup::reset(state, yes).await?),
    }
}

fn json<T: Serialize>(value: T) -> AppResult<Value> {
    Ok(serde_json::to_value(value)?)
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Verbose output for development
/// - `RUST_LOG=info` - Normal operation
/// - `RUST_LOG=ayn=trace` - Detailed output for AYN crates only
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,ayn=debug,sqlx=warn"));

    // Ignore the error when a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use ayn_db::{Database, DbConfig};

    async fn state() -> AppState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        AppState::with_database(AppConfig::default(), db).await.unwrap()
    }

    async fn exec(state: &mut AppState, args: &[&str]) -> AppResult<Value> {
        let argv = std::iter::once("ayn").chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv).unwrap();
        execute(state, cli.command).await
    }

    async fn logged_in() -> AppState {
        let mut state = state().await;
        exec(&mut state, &["login", "1234"]).await.unwrap();
        state
    }

    fn stock_units(rows: &Value, id: &str) -> f64 {
        rows.as_array()
            .unwrap()
            .iter()
            .find(|r| r["id"] == id)
            .map(|r| r["units"].as_f64().unwrap())
            .unwrap()
    }

    #[tokio::test]
    async fn test_commands_require_login() {
        let mut state = state().await;

        let err = exec(&mut state, &["stock", "list"]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);

        let err = exec(&mut state, &["login", "0000"]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);

        let who = exec(&mut state, &["whoami"]).await.unwrap();
        assert_eq!(who["loggedIn"], false);

        let who = exec(&mut state, &["login", "1234"]).await.unwrap();
        assert_eq!(who["operator"]["name"], "Admin Ayn");

        exec(&mut state, &["logout"]).await.unwrap();
        let err = exec(&mut state, &["dashboard"]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);
    }

    #[tokio::test]
    async fn test_sale_deducts_ingredients() {
        let mut state = logged_in().await;

        let outcome = exec(&mut state, &["recipe", "sell", "r1"]).await.unwrap();
        assert_eq!(outcome["status"], "applied");

        let rows = exec(&mut state, &["stock", "list"]).await.unwrap();
        assert_eq!(stock_units(&rows, "1"), 44.5);
        assert_eq!(stock_units(&rows, "2"), 119.0);
        assert!((stock_units(&rows, "3") - 11.9).abs() < 1e-9);

        let outcome = exec(&mut state, &["recipe", "sell", "r99"]).await.unwrap();
        assert_eq!(outcome["status"], "recipeNotFound");
    }

    #[tokio::test]
    async fn test_adjust_clamps_and_search() {
        let mut state = logged_in().await;

        exec(&mut state, &["stock", "adjust", "5", "-100"]).await.unwrap();
        let rows = exec(&mut state, &["stock", "list", "--search", "toci"]).await.unwrap();
        assert_eq!(rows.as_array().unwrap().len(), 1);
        assert_eq!(stock_units(&rows, "5"), 0.0);
        assert_eq!(rows[0]["isLow"], true);
    }

    #[tokio::test]
    async fn test_waste_record_and_unknown_item() {
        let mut state = logged_in().await;

        let recorded = exec(&mut state, &["waste", "record", "4", "2", "--date", "2024-05-20"])
            .await
            .unwrap();
        assert_eq!(recorded["item"]["name"], "Leche Entera");

        let list = exec(&mut state, &["waste", "list"]).await.unwrap();
        assert_eq!(list["records"].as_array().unwrap().len(), 2);

        let err = exec(&mut state, &["waste", "record", "99", "2"]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_tasks_add_and_complete() {
        let mut state = logged_in().await;

        let task = exec(&mut state, &["task", "add", "--title", "Limpiar campana", "--urgent"])
            .await
            .unwrap();
        let id = task["id"].as_str().unwrap().to_string();

        let tasks = exec(&mut state, &["task", "list"]).await.unwrap();
        assert_eq!(tasks[0]["id"], id.as_str());

        let done = exec(&mut state, &["task", "complete", id.as_str()]).await.unwrap();
        assert_eq!(done["removed"], true);
        let again = exec(&mut state, &["task", "complete", id.as_str()]).await.unwrap();
        assert_eq!(again["removed"], false);
    }

    #[tokio::test]
    async fn test_insights_fall_back_without_key() {
        let mut state = logged_in().await;

        let tips = exec(&mut state, &["insights"]).await.unwrap();
        assert_eq!(tips.as_array().unwrap().len(), 3);
        assert_eq!(tips[0]["title"], "Stock Inteligente");
    }

    #[tokio::test]
    async fn test_recipe_cost_and_missing() {
        let mut state = logged_in().await;

        let view = exec(&mut state, &["recipe", "cost", "r1"]).await.unwrap();
        assert_eq!(view["ingredients"][0]["name"], "Aguacates");

        let err = exec(&mut state, &["recipe", "cost", "r9"]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_export_import_and_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.json");
        let path_str = path.to_str().unwrap();
        let mut state = logged_in().await;

        let exported = exec(&mut state, &["export", "--out", path_str]).await.unwrap();
        assert_eq!(exported["stock"], 5);

        exec(&mut state, &["recipe", "sell", "r2"]).await.unwrap();
        let imported = exec(&mut state, &["import", path_str]).await.unwrap();
        assert_eq!(imported["recipes"], 2);

        let rows = exec(&mut state, &["stock", "list"]).await.unwrap();
        assert_eq!(stock_units(&rows, "2"), 120.0);

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "not json").unwrap();
        let err = exec(&mut state, &["import", bad.to_str().unwrap()]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidBackup);

        let negative = dir.path().join("negative.json");
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::write(&negative, text.replace("\"units\": 45", "\"units\": -7.5")).unwrap();
        let err = exec(&mut state, &["import", negative.to_str().unwrap()]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidBackup);
        let rows = exec(&mut state, &["stock", "list"]).await.unwrap();
        assert_eq!(stock_units(&rows, "1"), 45.0);

        let err = exec(&mut state, &["reset"]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        exec(&mut state, &["reset", "--yes"]).await.unwrap();
        let who = exec(&mut state, &["whoami"]).await.unwrap();
        assert_eq!(who["loggedIn"], false);
    }
}
