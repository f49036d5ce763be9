//! # State Module
//!
//! Everything a command can touch, opened once per invocation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  AppConfig::load(--config)  +  --db flag                               │
//! │                              │                                          │
//! │                              ▼                                          │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                         AppState                                │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────────────┐ ┌──────────────────┐ ┌────────────────┐  │   │
//! │  │  │ InventoryStore   │ │ GeminiClient     │ │ AppConfig      │  │   │
//! │  │  │ (collections +   │ │ (insights, scan) │ │ (read-only)    │  │   │
//! │  │  │  session, SQLite)│ │                  │ │                │  │   │
//! │  │  └──────────────────┘ └──────────────────┘ └────────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  One command runs against it, then the pool is closed.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;

pub use config::{AppConfig, DatabaseSettings, OperatorSettings};

use ayn_assist::GeminiClient;
use ayn_core::Session;
use ayn_db::{Database, DbConfig, InventoryStore};
use std::path::PathBuf;
use tracing::info;

use crate::error::AppResult;

pub struct AppState {
    pub config: AppConfig,
    pub store: InventoryStore,
    pub assist: GeminiClient,
}

impl AppState {
    /// Opens the database at the configured path (or `db_override`) and
    /// loads the store.
    pub async fn open(mut config: AppConfig, db_override: Option<PathBuf>) -> AppResult<Self> {
        if let Some(path) = db_override {
            config.database.path = Some(path);
        }

        let db_path = config.database_path()?;
        info!(?db_path, "Database path determined");

        let db = Database::new(DbConfig::new(db_path)).await?;
        Self::with_database(config, db).await
    }

    /// Loads the store from an already-open database.
    pub async fn with_database(config: AppConfig, db: Database) -> AppResult<Self> {
        let store = InventoryStore::open(db, config.gate()).await?;
        let assist = GeminiClient::new(config.ai.clone());

        Ok(AppState { config, store, assist })
    }

    /// The current session, owned so it can be passed while the store is
    /// borrowed mutably.
    pub fn session(&self) -> AppResult<Session> {
        let session = ayn_core::session::require(self.store.session())?;
        Ok(session.clone())
    }

    pub async fn close(self) {
        self.store.close().await;
    }
}
