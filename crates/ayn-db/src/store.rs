//! # Inventory Store
//!
//! The persisting state store: ayn-core's `Inventory` plus the session,
//! written through to SQLite after every change.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  InventoryStore::open(db, gate)                                        │
//! │       │                                                                 │
//! │       ├── ayn_stock    missing / malformed → seed stock   (written)    │
//! │       ├── ayn_recipes  missing / malformed → seed recipes (written)    │
//! │       ├── ayn_waste    missing / malformed → seed waste   (written)    │
//! │       ├── ayn_tasks    missing / malformed → seed tasks   (written)    │
//! │       └── ayn_user     missing / malformed → no session                │
//! │                                                                         │
//! │  store.record_waste(&session, "1", 3, SPOILED, today).await            │
//! │       │                                                                 │
//! │       ├── authorize(&session)        stale or foreign → NotAuthenticated│
//! │       ├── waste::record_waste(..)    pure, in memory                   │
//! │       └── persist(STOCK ∪ WASTE)     one transaction, awaited          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each operation returns only after its writes have committed. If a write
//! fails the in-memory state has already moved; the next successful write
//! of that collection brings storage back in line.

use ayn_core::backup::BackupDocument;
use ayn_core::inventory::{ChangeSet, Inventory, StockAdjustment};
use ayn_core::reconcile::{self, ReconciledLine};
use ayn_core::sale::{self, RecipeCosting, SaleOutcome};
use ayn_core::seed;
use ayn_core::session::{self, PassphraseGate};
use ayn_core::validation::validate_stock_item;
use ayn_core::waste::{self, WasteRecorded};
use ayn_core::{
    CoreError, NewRecipe, NewStockItem, NewTask, Quantity, Recipe, ScannedLine, Session, StockItem,
    Task, WasteReason,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{DbError, StoreResult};
use crate::pool::Database;
use crate::repository::snapshot::{Loaded, SnapshotKey, SnapshotRepository};

/// The single owner of all collections and the session.
#[derive(Debug)]
pub struct InventoryStore {
    db: Database,
    gate: PassphraseGate,
    inventory: Inventory,
    session: Option<Session>,
}

impl InventoryStore {
    /// Loads every key from storage, falling back to seed data per key.
    pub async fn open(db: Database, gate: PassphraseGate) -> StoreResult<Self> {
        let snapshots = db.snapshots();
        let mut fell_back = ChangeSet::NONE;

        let stock = load_or_seed(
            &snapshots,
            SnapshotKey::Stock,
            seed::seed_stock,
            check_stock,
            &mut fell_back.stock,
        )
        .await?;
        let recipes = load_or_seed(
            &snapshots,
            SnapshotKey::Recipes,
            seed::seed_recipes,
            accept_any,
            &mut fell_back.recipes,
        )
        .await?;
        let waste = load_or_seed(
            &snapshots,
            SnapshotKey::Waste,
            seed::seed_waste,
            accept_any,
            &mut fell_back.waste,
        )
        .await?;
        let tasks = load_or_seed(
            &snapshots,
            SnapshotKey::Tasks,
            seed::seed_tasks,
            accept_any,
            &mut fell_back.tasks,
        )
        .await?;

        let session = match snapshots.load::<Option<Session>>(SnapshotKey::User).await? {
            Loaded::Value(session) => session,
            Loaded::Missing => None,
            Loaded::Malformed(_) => {
                warn!("Stored session is malformed, starting logged out");
                None
            }
        };

        let store = InventoryStore {
            db,
            gate,
            inventory: Inventory::from_parts(stock, recipes, waste, tasks),
            session,
        };

        if !fell_back.is_empty() {
            store.persist(fell_back).await?;
        }

        info!(
            stock = store.inventory.stock().len(),
            recipes = store.inventory.recipes().len(),
            waste = store.inventory.waste().len(),
            tasks = store.inventory.tasks().len(),
            logged_in = store.session.is_some(),
            "Inventory store opened"
        );

        Ok(store)
    }

    // =========================================================================
    // Session
    // =========================================================================

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Tries the passphrase. On success the session is stored; on failure
    /// the current session is left as it was.
    pub async fn authenticate(&mut self, secret: &str) -> StoreResult<bool> {
        match session::login(&self.gate, secret) {
            Some(new_session) => {
                info!(operator = %new_session.name, role = %new_session.role, "Logged in");
                self.session = Some(new_session);
                self.persist_session().await?;
                Ok(true)
            }
            None => {
                warn!("Login rejected: wrong passphrase");
                Ok(false)
            }
        }
    }

    pub async fn end_session(&mut self) -> StoreResult<()> {
        self.session = session::logout(self.session.take());
        info!("Logged out");
        self.persist_session().await
    }

    /// The session must be the one currently held; a copy kept across a
    /// logout no longer authorizes anything.
    fn authorize(&self, session: &Session) -> StoreResult<()> {
        match &self.session {
            Some(current) if current == session => Ok(()),
            _ => Err(CoreError::NotAuthenticated.into()),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Read-only view of the four collections.
    pub fn snapshot(&self, session: &Session) -> StoreResult<&Inventory> {
        self.authorize(session)?;
        Ok(&self.inventory)
    }

    pub fn recipe_costing(&self, session: &Session, recipe_id: &str) -> StoreResult<Option<RecipeCosting>> {
        self.authorize(session)?;
        Ok(self
            .inventory
            .find_recipe(recipe_id)
            .map(|r| sale::recipe_costing(self.inventory.stock(), r)))
    }

    /// Labels scanned invoice lines against current stock without applying.
    pub fn reconcile(&self, session: &Session, candidates: Vec<ScannedLine>) -> StoreResult<Vec<ReconciledLine>> {
        self.authorize(session)?;
        Ok(reconcile::reconcile(self.inventory.stock(), candidates))
    }

    pub fn export_backup(&self, session: &Session, exported_at: DateTime<Utc>) -> StoreResult<BackupDocument> {
        self.authorize(session)?;
        Ok(BackupDocument::from_inventory(&self.inventory, exported_at))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub async fn adjust_stock(
        &mut self,
        session: &Session,
        stock_id: &str,
        delta: Quantity,
    ) -> StoreResult<StockAdjustment> {
        self.authorize(session)?;
        let adjustment = self.inventory.adjust_stock(stock_id, delta);
        if adjustment.is_applied() {
            self.persist(ChangeSet::STOCK).await?;
        }
        Ok(adjustment)
    }

    pub async fn add_stock_item(&mut self, session: &Session, fields: NewStockItem) -> StoreResult<StockItem> {
        self.authorize(session)?;
        let item = self.inventory.add_stock_item(fields)?;
        self.persist(ChangeSet::STOCK).await?;
        info!(id = %item.id, name = %item.name, operator = %session.name, "Stock item created");
        Ok(item)
    }

    pub async fn add_recipe(&mut self, session: &Session, fields: NewRecipe) -> StoreResult<Recipe> {
        self.authorize(session)?;
        let recipe = self.inventory.add_recipe(fields)?;
        self.persist(ChangeSet::RECIPES).await?;
        info!(id = %recipe.id, name = %recipe.name, operator = %session.name, "Recipe created");
        Ok(recipe)
    }

    pub async fn add_task(&mut self, session: &Session, fields: NewTask) -> StoreResult<Task> {
        self.authorize(session)?;
        let task = self.inventory.add_task(fields)?;
        self.persist(ChangeSet::TASKS).await?;
        info!(id = %task.id, title = %task.title, operator = %session.name, "Task created");
        Ok(task)
    }

    /// Returns whether a task was removed. Unknown ids change nothing.
    pub async fn complete_task(&mut self, session: &Session, task_id: &str) -> StoreResult<bool> {
        self.authorize(session)?;
        let removed = self.inventory.complete_task(task_id);
        if removed {
            self.persist(ChangeSet::TASKS).await?;
        }
        Ok(removed)
    }

    pub async fn record_waste(
        &mut self,
        session: &Session,
        stock_id: &str,
        quantity: Quantity,
        reason: WasteReason,
        date: NaiveDate,
    ) -> StoreResult<WasteRecorded> {
        self.authorize(session)?;
        let recorded = waste::record_waste(&mut self.inventory, stock_id, quantity, reason, date)?;
        self.persist(ChangeSet::STOCK.union(ChangeSet::WASTE)).await?;
        Ok(recorded)
    }

    pub async fn apply_sale(&mut self, session: &Session, recipe_id: &str) -> StoreResult<SaleOutcome> {
        self.authorize(session)?;
        let outcome = sale::apply_sale(&mut self.inventory, recipe_id);
        if outcome.changed_stock() {
            self.persist(ChangeSet::STOCK).await?;
        }
        Ok(outcome)
    }

    pub async fn apply_reconciliation(
        &mut self,
        session: &Session,
        lines: &[ReconciledLine],
    ) -> StoreResult<Vec<StockAdjustment>> {
        self.authorize(session)?;
        let adjustments = reconcile::apply_reconciliation(&mut self.inventory, lines);
        if adjustments.iter().any(StockAdjustment::is_applied) {
            self.persist(ChangeSet::STOCK).await?;
        }
        Ok(adjustments)
    }

    /// Replaces the four collections with a backup's. The session stays.
    ///
    /// A document that fails validation changes nothing.
    pub async fn import_backup(&mut self, session: &Session, document: BackupDocument) -> StoreResult<()> {
        self.authorize(session)?;
        document.validate()?;
        info!(
            exported_at = %document.exported_at,
            stock = document.stock.len(),
            recipes = document.recipes.len(),
            "Importing backup"
        );
        self.inventory.replace_all(document.into_inventory());
        self.persist(ChangeSet::ALL).await
    }

    /// Wipes storage and starts over from the seed dataset, logged out.
    pub async fn reset(&mut self, session: &Session) -> StoreResult<()> {
        self.authorize(session)?;
        let removed = self.snapshots().clear().await?;
        warn!(keys = removed, operator = %session.name, "Local data cleared");

        self.inventory = seed::seed_inventory();
        self.session = None;
        self.persist(ChangeSet::ALL).await?;
        self.persist_session().await
    }

    pub async fn close(self) {
        self.db.close().await;
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    fn snapshots(&self) -> SnapshotRepository {
        self.db.snapshots()
    }

    /// Writes every collection flagged in `changes`, in one transaction.
    async fn persist(&self, changes: ChangeSet) -> StoreResult<()> {
        let mut entries = Vec::with_capacity(4);

        if changes.stock {
            entries.push(encode(SnapshotKey::Stock, self.inventory.stock())?);
        }
        if changes.recipes {
            entries.push(encode(SnapshotKey::Recipes, self.inventory.recipes())?);
        }
        if changes.waste {
            entries.push(encode(SnapshotKey::Waste, self.inventory.waste())?);
        }
        if changes.tasks {
            entries.push(encode(SnapshotKey::Tasks, self.inventory.tasks())?);
        }

        self.snapshots().put_all(&entries).await?;
        debug!(?changes, "Collections persisted");
        Ok(())
    }

    async fn persist_session(&self) -> StoreResult<()> {
        self.snapshots().put(SnapshotKey::User, &self.session).await?;
        Ok(())
    }
}

fn encode<T: Serialize + ?Sized>(key: SnapshotKey, value: &T) -> Result<(SnapshotKey, String), DbError> {
    serde_json::to_string(value)
        .map(|json| (key, json))
        .map_err(|e| DbError::serialization(key.as_str(), e))
}

/// Stored stock must satisfy the same level rules as new input.
#[allow(clippy::ptr_arg)]
fn check_stock(stock: &Vec<StockItem>) -> Result<(), String> {
    stock
        .iter()
        .try_for_each(|item| validate_stock_item(item).map_err(|e| format!("stock item {}: {}", item.id, e)))
}

fn accept_any<T>(_: &T) -> Result<(), String> {
    Ok(())
}

/// Loads one key. A missing, unparseable or invalid value falls back to
/// the seed for that key only.
async fn load_or_seed<T: DeserializeOwned>(
    snapshots: &SnapshotRepository,
    key: SnapshotKey,
    seed: fn() -> T,
    check: fn(&T) -> Result<(), String>,
    fell_back: &mut bool,
) -> StoreResult<T> {
    match snapshots.load::<T>(key).await? {
        Loaded::Value(value) => match check(&value) {
            Ok(()) => Ok(value),
            Err(reason) => {
                warn!(key = %key, reason = %reason, "Stored data invalid, using seed data");
                *fell_back = true;
                Ok(seed())
            }
        },
        Loaded::Missing => {
            info!(key = %key, "No stored data, using seed data");
            *fell_back = true;
            Ok(seed())
        }
        Loaded::Malformed(reason) => {
            warn!(key = %key, reason = %reason, "Stored data unreadable, using seed data");
            *fell_back = true;
            Ok(seed())
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use ayn_core::{Ingredient, RecipeCategory, TaskCategory};

    async fn open_memory() -> InventoryStore {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        InventoryStore::open(db, PassphraseGate::default()).await.unwrap()
    }

    async fn logged_in() -> (InventoryStore, Session) {
        let mut store = open_memory().await;
        assert!(store.authenticate("1234").await.unwrap());
        let session = store.session().cloned().unwrap();
        (store, session)
    }

    fn units(store: &InventoryStore, session: &Session, id: &str) -> Quantity {
        store.snapshot(session).unwrap().find_stock(id).unwrap().units
    }

    async fn stored<T: DeserializeOwned>(store: &InventoryStore, key: SnapshotKey) -> T {
        match store.snapshots().load::<T>(key).await.unwrap() {
            Loaded::Value(v) => v,
            Loaded::Missing => panic!("{} missing", key),
            Loaded::Malformed(e) => panic!("{} malformed: {}", key, e),
        }
    }

    #[tokio::test]
    async fn test_cold_start_uses_and_writes_seed() {
        let store = open_memory().await;
        assert!(store.session().is_none());

        let stock: Vec<StockItem> = stored(&store, SnapshotKey::Stock).await;
        assert_eq!(stock.len(), 5);
        let tasks: Vec<Task> = stored(&store, SnapshotKey::Tasks).await;
        assert_eq!(tasks[0].id, "t1");
    }

    #[tokio::test]
    async fn test_malformed_key_falls_back_per_key() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.snapshots()
            .put_all(&[
                (SnapshotKey::Stock, "{broken".to_string()),
                (SnapshotKey::Tasks, "[]".to_string()),
            ])
            .await
            .unwrap();

        let mut store = InventoryStore::open(db, PassphraseGate::default()).await.unwrap();
        store.authenticate("1234").await.unwrap();
        let session = store.session().cloned().unwrap();
        let inv = store.snapshot(&session).unwrap();

        assert_eq!(inv.stock().len(), 5);
        assert!(inv.tasks().is_empty());
    }

    #[tokio::test]
    async fn test_negative_stored_units_fall_back_to_seed() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut bad = seed::seed_stock();
        bad[0].units = Quantity::from_milli(-7_500);
        db.snapshots().put(SnapshotKey::Stock, &bad).await.unwrap();
        db.snapshots().put(SnapshotKey::Tasks, &Vec::<Task>::new()).await.unwrap();

        let (store, session) = {
            let mut store = InventoryStore::open(db, PassphraseGate::default()).await.unwrap();
            store.authenticate("1234").await.unwrap();
            let session = store.session().cloned().unwrap();
            (store, session)
        };

        assert_eq!(units(&store, &session, "1"), Quantity::from_units(45));
        assert!(store.snapshot(&session).unwrap().tasks().is_empty());

        let rewritten: Vec<StockItem> = stored(&store, SnapshotKey::Stock).await;
        assert_eq!(rewritten[0].units, Quantity::from_units(45));
    }

    #[tokio::test]
    async fn test_authentication_gates_operations() {
        let mut store = open_memory().await;
        assert!(!store.authenticate("0000").await.unwrap());
        assert!(store.session().is_none());

        let forged = Session {
            name: "Admin Ayn".to_string(),
            role: "Gerente".to_string(),
        };
        let result = store.apply_sale(&forged, "r1").await;
        assert!(matches!(result, Err(crate::StoreError::Core(CoreError::NotAuthenticated))));

        assert!(store.authenticate("1234").await.unwrap());
        let session = store.session().cloned().unwrap();
        assert!(store.snapshot(&session).is_ok());

        store.end_session().await.unwrap();
        assert!(store.session().is_none());
        assert!(store.snapshot(&session).is_err());

        let persisted: Option<Session> = stored(&store, SnapshotKey::User).await;
        assert!(persisted.is_none());
    }

    #[tokio::test]
    async fn test_avocado_toast_scenario_persists() {
        let (mut store, session) = logged_in().await;

        store.apply_sale(&session, "r1").await.unwrap();

        assert_eq!(units(&store, &session, "1").to_string(), "44.5");
        assert_eq!(units(&store, &session, "2").to_string(), "119");
        assert_eq!(units(&store, &session, "3").to_string(), "11.9");

        let stock: Vec<StockItem> = stored(&store, SnapshotKey::Stock).await;
        assert_eq!(stock[0].units, Quantity::from_milli(44_500));
        assert_eq!(stock[2].units, Quantity::from_milli(11_900));
    }

    #[tokio::test]
    async fn test_unknown_recipe_and_stock_are_noops() {
        let (mut store, session) = logged_in().await;
        let before = store.snapshot(&session).unwrap().clone();

        let outcome = store.apply_sale(&session, "nope").await.unwrap();
        assert!(matches!(outcome, SaleOutcome::RecipeNotFound { .. }));

        let adj = store.adjust_stock(&session, "nope", Quantity::from_units(5)).await.unwrap();
        assert!(!adj.is_applied());

        assert_eq!(store.snapshot(&session).unwrap(), &before);
    }

    #[tokio::test]
    async fn test_record_waste_persists_both_collections() {
        let (mut store, session) = logged_in().await;
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let recorded = store
            .record_waste(&session, "4", Quantity::from_units(2), WasteReason::Expired, today)
            .await
            .unwrap();
        assert_eq!(recorded.item.cost_cents, 240);

        let waste: Vec<ayn_core::WasteItem> = stored(&store, SnapshotKey::Waste).await;
        assert_eq!(waste[0].id, recorded.item.id);
        let stock: Vec<StockItem> = stored(&store, SnapshotKey::Stock).await;
        assert_eq!(stock[3].units, Quantity::from_units(13));

        let err = store
            .record_waste(&session, "99", Quantity::from_units(1), WasteReason::Other, today)
            .await;
        assert!(matches!(err, Err(crate::StoreError::Core(CoreError::StockItemNotFound(_)))));
        assert_eq!(store.snapshot(&session).unwrap().waste().len(), 2);
    }

    #[tokio::test]
    async fn test_add_and_complete() {
        let (mut store, session) = logged_in().await;

        let recipe = store
            .add_recipe(
                &session,
                NewRecipe {
                    name: "Tostada simple".to_string(),
                    category: RecipeCategory::Bakery,
                    price_cents: 400,
                    ingredients: vec![Ingredient {
                        stock_item_id: "3".to_string(),
                        quantity: Quantity::from_milli(100),
                    }],
                },
            )
            .await
            .unwrap();
        let recipes: Vec<Recipe> = stored(&store, SnapshotKey::Recipes).await;
        assert_eq!(recipes.last().unwrap().id, recipe.id);

        let task = store
            .add_task(
                &session,
                NewTask {
                    title: "Descongelar".to_string(),
                    description: String::new(),
                    category: TaskCategory::Kitchen,
                    is_urgent: false,
                },
            )
            .await
            .unwrap();
        assert!(store.complete_task(&session, &task.id).await.unwrap());
        assert!(!store.complete_task(&session, &task.id).await.unwrap());

        let tasks: Vec<Task> = stored(&store, SnapshotKey::Tasks).await;
        assert_eq!(tasks.len(), 2);
    }

    #[tokio::test]
    async fn test_reconcile_and_apply() {
        let (mut store, session) = logged_in().await;
        let lines = store
            .reconcile(
                &session,
                vec![
                    ScannedLine {
                        name: "leche".to_string(),
                        quantity: Quantity::from_units(6),
                        price_cents: 110,
                    },
                    ScannedLine {
                        name: "Queso Manchego".to_string(),
                        quantity: Quantity::from_units(2),
                        price_cents: 1800,
                    },
                ],
            )
            .unwrap();

        let adjustments = store.apply_reconciliation(&session, &lines).await.unwrap();
        assert_eq!(adjustments.len(), 1);
        assert_eq!(units(&store, &session, "4"), Quantity::from_units(21));
        assert_eq!(store.snapshot(&session).unwrap().stock().len(), 5);
    }

    #[tokio::test]
    async fn test_export_import_round_trip() {
        let (mut store, session) = logged_in().await;
        store.apply_sale(&session, "r2").await.unwrap();

        let doc = store.export_backup(&session, Utc::now()).unwrap();
        let text = doc.to_pretty_json().unwrap();
        let stock_before: String = store.snapshots().get_raw(SnapshotKey::Stock).await.unwrap().unwrap();

        store.reset(&session).await.unwrap();
        assert!(store.session().is_none());
        store.authenticate("1234").await.unwrap();
        let session = store.session().cloned().unwrap();
        assert_eq!(units(&store, &session, "5"), Quantity::from_units(5));

        store
            .import_backup(&session, BackupDocument::from_json(&text).unwrap())
            .await
            .unwrap();

        let stock_after = store.snapshots().get_raw(SnapshotKey::Stock).await.unwrap().unwrap();
        assert_eq!(stock_before, stock_after);
        assert!(store.session().is_some());
    }

    #[tokio::test]
    async fn test_import_rejects_negative_units_without_changes() {
        let (mut store, session) = logged_in().await;
        let mut doc = store.export_backup(&session, Utc::now()).unwrap();
        doc.stock[0].units = Quantity::from_milli(-7_500);
        doc.recipes.clear();

        let result = store.import_backup(&session, doc).await;
        assert!(matches!(
            result,
            Err(crate::StoreError::Core(CoreError::InvalidBackup(_)))
        ));

        assert_eq!(units(&store, &session, "1"), Quantity::from_units(45));
        assert_eq!(store.snapshot(&session).unwrap().recipes().len(), 2);
        let persisted: Vec<StockItem> = stored(&store, SnapshotKey::Stock).await;
        assert_eq!(persisted[0].units, Quantity::from_units(45));
    }

    #[tokio::test]
    async fn test_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ayn.db");

        {
            let db = Database::new(DbConfig::new(&path)).await.unwrap();
            let mut store = InventoryStore::open(db, PassphraseGate::default()).await.unwrap();
            store.authenticate("1234").await.unwrap();
            let session = store.session().cloned().unwrap();
            store.apply_sale(&session, "r1").await.unwrap();
            store.close().await;
        }

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        let store = InventoryStore::open(db, PassphraseGate::default()).await.unwrap();
        let session = store.session().cloned().expect("session persisted");
        assert_eq!(units(&store, &session, "1"), Quantity::from_milli(44_500));
    }
}
