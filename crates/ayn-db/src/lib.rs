//! # ayn-db: Local Storage for AYN
//!
//! This crate keeps AYN's state on disk. It uses SQLite through sqlx and
//! stores each collection as one JSON snapshot under a fixed key.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          AYN Data Flow                                  │
//! │                                                                         │
//! │  `ayn recipe sell r1`                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     ayn-db (THIS CRATE)                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │InventoryStore │    │  Snapshot     │    │  Migrations  │  │   │
//! │  │   │  (store.rs)   │───►│  Repository   │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ Inventory     │    │ ayn_stock     │    │ 001_initial  │  │   │
//! │  │   │ Session       │    │ ayn_recipes   │    │ _schema.sql  │  │   │
//! │  │   │ ChangeSet     │    │ ayn_waste ... │    │              │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │  Database (pool.rs)           │   │
//! │  └────────────────────────────────┼────────────────────────────────┘   │
//! │                                   ▼                                     │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/ayn/ayn.db  (kv_store)                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database and store error types
//! - [`repository`] - Key/value snapshot access
//! - [`store`] - The persisting inventory store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ayn_core::session::PassphraseGate;
//! use ayn_db::{Database, DbConfig, InventoryStore};
//!
//! let db = Database::new(DbConfig::new("path/to/ayn.db")).await?;
//! let mut store = InventoryStore::open(db, PassphraseGate::default()).await?;
//!
//! store.authenticate("1234").await?;
//! let session = store.session().cloned().ok_or(ayn_core::CoreError::NotAuthenticated)?;
//! store.apply_sale(&session, "r1").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult, StoreError, StoreResult};
pub use pool::{Database, DbConfig};
pub use repository::snapshot::{Loaded, SnapshotKey, SnapshotRepository};
pub use store::InventoryStore;
