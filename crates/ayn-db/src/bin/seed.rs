//! # Seed Data Loader
//!
//! Resets a database to the first-run dataset.
//!
//! ## Usage
//! ```bash
//! # Seed ./ayn_dev.db (refuses if it already holds data)
//! cargo run -p ayn-db --bin seed
//!
//! # Specify database path
//! cargo run -p ayn-db --bin seed -- --db ./data/ayn.db
//!
//! # Overwrite whatever is there
//! cargo run -p ayn-db --bin seed -- --force
//! ```
//!
//! ## Seeded Data
//! - 5 stock items (Aguacates, Huevos, Pan Sourdough, Leche Entera, Tocino)
//! - 2 recipes (Avocado Toast Deluxe, Huevos con Tocino)
//! - 1 waste record
//! - 2 open tasks

use ayn_core::session::PassphraseGate;
use ayn_db::{Database, DbConfig, InventoryStore, SnapshotKey};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./ayn_dev.db");
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("AYN Seed Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./ayn_dev.db)");
                println!("  -f, --force        Clear existing data first");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 AYN Seed Data Loader");
    println!("=======================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let snapshots = db.snapshots();
    let mut existing = 0;
    for key in SnapshotKey::ALL {
        if snapshots.get_raw(key).await?.is_some() {
            existing += 1;
        }
    }

    if existing > 0 {
        if !force {
            println!("⚠ Database already has {} stored keys", existing);
            println!("  Skipping seed to avoid overwriting data.");
            println!("  Re-run with --force to reset it.");
            return Ok(());
        }
        let removed = snapshots.clear().await?;
        println!("✓ Cleared {} keys", removed);
    }

    // Opening an empty store writes the seed collections.
    let store = InventoryStore::open(db, PassphraseGate::default()).await?;
    store.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
