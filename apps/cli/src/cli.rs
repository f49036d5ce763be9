//! Argument tree for the `ayn` binary.

use ayn_core::{Quantity, RecipeCategory, TaskCategory, WasteReason};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ayn")]
#[command(about = "AYN - All You Need: kitchen stock, recipes, waste and tasks")]
#[command(version)]
pub struct Cli {
    /// Config file (default: ayn.toml in the platform config directory).
    #[arg(long, global = true, env = "AYN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Database file; overrides the config file and AYN_DB_PATH.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start a session with the passphrase.
    Login { passphrase: String },
    /// End the session.
    Logout,
    /// Show the current operator, if any.
    Whoami,
    /// Stock items.
    Stock(StockArgs),
    /// Recipes, sales and costing.
    Recipe(RecipeArgs),
    /// Waste records.
    Waste(WasteArgs),
    /// Kitchen tasks.
    Task(TaskArgs),
    /// Invoice photo extraction and stock reconciliation.
    Invoice(InvoiceArgs),
    /// Three short AI tips from stock and waste.
    Insights,
    /// Headline figures.
    Dashboard,
    /// Write all collections to a backup file.
    Export {
        /// Output file (default: ayn_backup_<date>.json in the current directory).
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Replace all collections with a backup file's.
    Import { file: PathBuf },
    /// Erase local data and start over from the sample dataset.
    Reset {
        /// Required; there is no undo.
        #[arg(long)]
        yes: bool,
    },
}

// =============================================================================
// Stock
// =============================================================================

#[derive(Args, Debug)]
pub struct StockArgs {
    #[command(subcommand)]
    pub command: StockCommand,
}

#[derive(Subcommand, Debug)]
pub enum StockCommand {
    /// List stock with value, low-stock flag and suggested order.
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long, short)]
        search: Option<String>,
    },
    Add(NewStockArgs),
    /// Change units by a signed amount; the result never goes below zero.
    Adjust {
        id: String,
        #[arg(allow_hyphen_values = true)]
        delta: Quantity,
    },
}

#[derive(Args, Debug)]
pub struct NewStockArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub units: Quantity,
    #[arg(long)]
    pub unit_type: String,
    #[arg(long)]
    pub min_stock: Quantity,
    #[arg(long)]
    pub price_cents: i64,
}

// =============================================================================
// Recipes
// =============================================================================

#[derive(Args, Debug)]
pub struct RecipeArgs {
    #[command(subcommand)]
    pub command: RecipeCommand,
}

#[derive(Subcommand, Debug)]
pub enum RecipeCommand {
    /// List recipes with live cost and ingredient names.
    List,
    Add(NewRecipeArgs),
    /// Record one sale; deducts every ingredient from stock.
    Sell { id: String },
    /// Live cost and margin of one recipe.
    Cost { id: String },
}

#[derive(Args, Debug)]
pub struct NewRecipeArgs {
    #[arg(long)]
    pub name: String,
    /// Desayuno, Comida or Panadería (English names accepted).
    #[arg(long)]
    pub category: RecipeCategory,
    #[arg(long)]
    pub price_cents: i64,
    /// `<stock id>=<quantity>`, repeatable.
    #[arg(long = "ingredient", short = 'i')]
    pub ingredients: Vec<String>,
}

// =============================================================================
// Waste
// =============================================================================

#[derive(Args, Debug)]
pub struct WasteArgs {
    #[command(subcommand)]
    pub command: WasteCommand,
}

#[derive(Subcommand, Debug)]
pub enum WasteCommand {
    /// List waste records, newest first, with total cost.
    List,
    /// Record discarded stock; the cost is frozen at today's price.
    Record {
        stock_id: String,
        quantity: Quantity,
        /// SPOILED, EXPIRED or OTHER.
        #[arg(long, default_value = "SPOILED")]
        reason: WasteReason,
        /// Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

// =============================================================================
// Tasks
// =============================================================================

#[derive(Args, Debug)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommand,
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    List,
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// KITCHEN, CLEANING or INVENTORY.
        #[arg(long, default_value = "KITCHEN")]
        category: TaskCategory,
        #[arg(long)]
        urgent: bool,
    },
    /// Completing a task removes it.
    Complete { id: String },
}

// =============================================================================
// Invoices
// =============================================================================

#[derive(Args, Debug)]
pub struct InvoiceArgs {
    #[command(subcommand)]
    pub command: InvoiceCommand,
}

#[derive(Subcommand, Debug)]
pub enum InvoiceCommand {
    /// Extract lines from a photo and match them against stock.
    Scan {
        image: PathBuf,
        /// Defaults from the file extension.
        #[arg(long)]
        mime: Option<String>,
        /// Add matched quantities to stock.
        #[arg(long)]
        apply: bool,
    },
}
