//! # ayn-core: Pure Business Logic for AYN
//!
//! This crate is the **heart** of AYN ("All You Need"), a kitchen inventory
//! manager. It contains all business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          AYN Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    `ayn` CLI (apps/cli)                          │   │
//! │  │    stock ── recipe ── waste ── task ── invoice ── insights      │   │
//! │  └───────────────┬─────────────────────────────────┬───────────────┘   │
//! │                  │                                 │                    │
//! │  ┌───────────────▼──────────────┐   ┌──────────────▼───────────────┐   │
//! │  │  ayn-db: InventoryStore      │   │  ayn-assist: Gemini client   │   │
//! │  │  SQLite snapshots per key    │   │  insights, invoice scanning  │   │
//! │  └───────────────┬──────────────┘   └──────────────┬───────────────┘   │
//! │                  │                                 │                    │
//! │  ┌───────────────▼─────────────────────────────────▼───────────────┐   │
//! │  │               ★ ayn-core (THIS CRATE) ★                          │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ inventory │  │   sale    │  │   waste   │  │ reconcile │  │   │
//! │  │   │ adjust    │  │ apply     │  │ record    │  │ match     │  │   │
//! │  │   │ add/done  │  │ costing   │  │ total     │  │ apply     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (StockItem, Recipe, WasteItem, Task, ...)
//! - [`money`] / [`quantity`] - Integer cents and integer milli-units
//! - [`inventory`] - The four collections and `adjust_stock`
//! - [`session`] - Passphrase login/logout transitions
//! - [`sale`] - Recipe sale cascade and live costing
//! - [`waste`] - Waste recording with frozen cost
//! - [`reconcile`] - Invoice line to stock item matching
//! - [`report`] - Dashboard and stock list projections
//! - [`seed`] - First-run dataset
//! - [`backup`] - Export/import document
//! - [`error`] / [`validation`] - Typed errors and input rules
//!
//! ## Example Usage
//!
//! ```rust
//! use ayn_core::sale::apply_sale;
//! use ayn_core::seed::seed_inventory;
//!
//! let mut inventory = seed_inventory();
//! apply_sale(&mut inventory, "r1"); // Avocado Toast Deluxe
//!
//! let avocados = inventory.find_stock("1").unwrap();
//! assert_eq!(avocados.units.to_string(), "44.5");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backup;
pub mod error;
pub mod inventory;
pub mod money;
pub mod quantity;
pub mod reconcile;
pub mod report;
pub mod sale;
pub mod seed;
pub mod session;
pub mod types;
pub mod validation;
pub mod waste;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::{ChangeSet, Inventory, StockAdjustment};
pub use money::Money;
pub use quantity::Quantity;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Passphrase accepted when none is configured.
pub const DEFAULT_PASSPHRASE: &str = "1234";

/// Operator identity the passphrase unlocks by default.
pub const DEFAULT_OPERATOR_NAME: &str = "Admin Ayn";
pub const DEFAULT_OPERATOR_ROLE: &str = "Gerente";

/// Shown in place of an ingredient whose stock item does not exist.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Written into every backup document.
pub const APP_NAME: &str = "AYN - All You Need";
