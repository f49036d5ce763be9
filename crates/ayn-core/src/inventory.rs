//! # Inventory State
//!
//! The four collections and the primitive every cascade goes through.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   sale::apply_sale ──────┐                                              │
//! │   (one per ingredient)   │                                              │
//! │                          ▼                                              │
//! │   waste::record_waste ──► Inventory::adjust_stock(id, delta)           │
//! │                          ▲        │                                     │
//! │   reconcile::apply ──────┘        ├── id unknown → NotFound (no-op)    │
//! │   (one per Existing line)         └── units = max(0, units + delta)    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation is pure and in-memory. The caller decides what to persist;
//! the `ChangeSet` returned alongside tells it which collections moved.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::CoreResult;
use crate::quantity::Quantity;
use crate::types::{NewRecipe, NewStockItem, NewTask, Recipe, StockItem, Task, WasteItem};
use crate::validation::{validate_new_recipe, validate_new_stock_item, validate_new_task};

// =============================================================================
// Change Tracking
// =============================================================================

/// Which collections an operation touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub stock: bool,
    pub recipes: bool,
    pub waste: bool,
    pub tasks: bool,
}

impl ChangeSet {
    pub const NONE: ChangeSet = ChangeSet {
        stock: false,
        recipes: false,
        waste: false,
        tasks: false,
    };

    pub const ALL: ChangeSet = ChangeSet {
        stock: true,
        recipes: true,
        waste: true,
        tasks: true,
    };

    pub const STOCK: ChangeSet = ChangeSet {
        stock: true,
        ..ChangeSet::NONE
    };

    pub const RECIPES: ChangeSet = ChangeSet {
        recipes: true,
        ..ChangeSet::NONE
    };

    pub const WASTE: ChangeSet = ChangeSet {
        waste: true,
        ..ChangeSet::NONE
    };

    pub const TASKS: ChangeSet = ChangeSet {
        tasks: true,
        ..ChangeSet::NONE
    };

    pub fn union(self, other: ChangeSet) -> ChangeSet {
        ChangeSet {
            stock: self.stock || other.stock,
            recipes: self.recipes || other.recipes,
            waste: self.waste || other.waste,
            tasks: self.tasks || other.tasks,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ChangeSet::NONE
    }
}

// =============================================================================
// Stock Adjustment
// =============================================================================

/// What a single `adjust_stock` call did.
///
/// A miss is a value, not an error: sales and reconciliations keep going
/// past ingredients or invoice lines that point at nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum StockAdjustment {
    #[serde(rename_all = "camelCase")]
    Applied {
        stock_id: String,
        before: Quantity,
        after: Quantity,
        /// The raw result was negative and was floored at zero.
        clamped: bool,
    },
    #[serde(rename_all = "camelCase")]
    NotFound { stock_id: String },
}

impl StockAdjustment {
    pub fn is_applied(&self) -> bool {
        matches!(self, StockAdjustment::Applied { .. })
    }

    pub fn stock_id(&self) -> &str {
        match self {
            StockAdjustment::Applied { stock_id, .. } => stock_id,
            StockAdjustment::NotFound { stock_id } => stock_id,
        }
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// The whole working state: stock, recipes, waste and tasks.
///
/// Collection order is meaningful. Stock and recipes are in insertion order;
/// waste and tasks are newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    stock: Vec<StockItem>,
    recipes: Vec<Recipe>,
    waste: Vec<WasteItem>,
    tasks: Vec<Task>,
}

impl Inventory {
    pub fn from_parts(
        stock: Vec<StockItem>,
        recipes: Vec<Recipe>,
        waste: Vec<WasteItem>,
        tasks: Vec<Task>,
    ) -> Self {
        Inventory {
            stock,
            recipes,
            waste,
            tasks,
        }
    }

    pub fn stock(&self) -> &[StockItem] {
        &self.stock
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn waste(&self) -> &[WasteItem] {
        &self.waste
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn find_stock(&self, id: &str) -> Option<&StockItem> {
        self.stock.iter().find(|s| s.id == id)
    }

    pub fn find_recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Adds `delta` to a stock item's units, flooring the result at zero.
    ///
    /// ## Behavior
    /// ```text
    /// units=12, delta=-0.1 → Applied { before: 12, after: 11.9 }
    /// units=5,  delta=-8   → Applied { before: 5,  after: 0, clamped }
    /// id="99"              → NotFound (nothing changes)
    /// ```
    pub fn adjust_stock(&mut self, stock_id: &str, delta: Quantity) -> StockAdjustment {
        let Some(item) = self.stock.iter_mut().find(|s| s.id == stock_id) else {
            debug!(stock_id = %stock_id, delta = %delta, "Stock adjustment skipped: unknown item");
            return StockAdjustment::NotFound {
                stock_id: stock_id.to_string(),
            };
        };

        let before = item.units;
        let (after, clamped) = before.apply_delta(delta);
        item.units = after;

        if clamped {
            warn!(
                stock_id = %stock_id,
                name = %item.name,
                before = %before,
                delta = %delta,
                "Stock adjustment clamped to the allowed range"
            );
        } else {
            debug!(stock_id = %stock_id, before = %before, after = %after, "Stock adjusted");
        }

        StockAdjustment::Applied {
            stock_id: stock_id.to_string(),
            before,
            after,
            clamped,
        }
    }

    /// Appends a new stock item with a fresh id.
    pub fn add_stock_item(&mut self, fields: NewStockItem) -> CoreResult<StockItem> {
        validate_new_stock_item(&fields)?;

        let item = StockItem {
            id: Uuid::new_v4().to_string(),
            name: fields.name.trim().to_string(),
            category: fields.category.trim().to_string(),
            units: fields.units,
            unit_type: fields.unit_type.trim().to_string(),
            min_stock: fields.min_stock,
            price_per_unit_cents: fields.price_per_unit_cents,
        };

        debug!(id = %item.id, name = %item.name, "Stock item added");
        self.stock.push(item.clone());
        Ok(item)
    }

    /// Appends a new recipe with a fresh id.
    pub fn add_recipe(&mut self, fields: NewRecipe) -> CoreResult<Recipe> {
        validate_new_recipe(&fields)?;

        let recipe = Recipe {
            id: Uuid::new_v4().to_string(),
            name: fields.name.trim().to_string(),
            category: fields.category,
            price_cents: fields.price_cents,
            ingredients: fields.ingredients,
        };

        debug!(id = %recipe.id, name = %recipe.name, ingredients = recipe.ingredients.len(), "Recipe added");
        self.recipes.push(recipe.clone());
        Ok(recipe)
    }

    /// Prepends a new, not-yet-completed task.
    pub fn add_task(&mut self, fields: NewTask) -> CoreResult<Task> {
        validate_new_task(&fields)?;

        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: fields.title.trim().to_string(),
            description: fields.description,
            category: fields.category,
            is_urgent: fields.is_urgent,
            is_completed: false,
        };

        debug!(id = %task.id, title = %task.title, "Task added");
        self.tasks.insert(0, task.clone());
        Ok(task)
    }

    /// Removes a task. Returns whether one was removed; completing an
    /// unknown or already-completed task is a no-op.
    pub fn complete_task(&mut self, task_id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != task_id);
        let removed = self.tasks.len() != before;
        debug!(task_id = %task_id, removed, "Task completion");
        removed
    }

    /// Newest waste record goes first.
    pub(crate) fn push_waste(&mut self, item: WasteItem) {
        self.waste.insert(0, item);
    }

    /// Replaces all four collections (backup import).
    pub fn replace_all(&mut self, other: Inventory) {
        *self = other;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
