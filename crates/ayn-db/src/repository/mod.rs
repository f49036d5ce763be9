//! # Repository Module
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  InventoryStore                                                        │
//! │       │                                                                 │
//! │       │  db.snapshots().load::<Vec<StockItem>>(SnapshotKey::Stock)      │
//! │       ▼                                                                 │
//! │  SnapshotRepository                                                    │
//! │  ├── load / get_raw                                                    │
//! │  ├── put / put_all (one transaction)                                   │
//! │  └── clear                                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  kv_store (key, value, updated_at)                                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod snapshot;
