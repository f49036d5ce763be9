//! # AYN Command-Line Entry Point
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          `ayn` binary                                   │
//! │                                                                         │
//! │  main.rs ────► starts the runtime, hands off to lib.rs                 │
//! │                                                                         │
//! │  lib.rs ─────► logging, config, store, dispatch                        │
//! │                                                                         │
//! │  cli.rs ─────► clap argument tree                                      │
//! │                                                                         │
//! │  commands/ ──► login, stock, recipe, waste, task, invoice, insights,   │
//! │                dashboard, export, import, reset                         │
//! │                                                                         │
//! │  state/ ─────► AppConfig, AppState (store + AI client)                 │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                         SQLite Database                          │  │
//! │  │  ayn.db (local file, WAL mode, one JSON snapshot per key)        │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    ayn_cli::run().await
}
