//! # Recipe Sale & Costing
//!
//! Selling a recipe depletes every ingredient it lists. Costing a recipe
//! prices those same ingredients at today's stock prices.
//!
//! ## Sale
//! ```text
//! apply_sale("r1")   Avocado Toast Deluxe
//!      │
//!      ├── adjust_stock("1", -0.5)   Aguacates      45  → 44.5
//!      ├── adjust_stock("3", -0.1)   Pan Sourdough  12  → 11.9
//!      └── adjust_stock("2", -1)     Huevos         120 → 119
//! ```
//!
//! Ingredients are applied in list order and independently. One that points
//! at a missing stock item is reported as `NotFound` and the rest still go
//! through. There is no rollback.

use serde::Serialize;
use tracing::{info, warn};

use crate::inventory::{Inventory, StockAdjustment};
use crate::money::Money;
use crate::types::{Ingredient, Recipe, StockItem};
use crate::UNKNOWN_LABEL;

// =============================================================================
// Sale
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SaleOutcome {
    /// Nothing happened.
    #[serde(rename_all = "camelCase")]
    RecipeNotFound { recipe_id: String },
    /// One adjustment per ingredient, in recipe order.
    #[serde(rename_all = "camelCase")]
    Applied {
        recipe_id: String,
        recipe_name: String,
        adjustments: Vec<StockAdjustment>,
    },
}

impl SaleOutcome {
    /// Whether any stock actually moved.
    pub fn changed_stock(&self) -> bool {
        match self {
            SaleOutcome::RecipeNotFound { .. } => false,
            SaleOutcome::Applied { adjustments, .. } => adjustments.iter().any(|a| a.is_applied()),
        }
    }
}

/// Records one sale of a recipe against stock.
pub fn apply_sale(inventory: &mut Inventory, recipe_id: &str) -> SaleOutcome {
    let Some(recipe) = inventory.find_recipe(recipe_id).cloned() else {
        warn!(recipe_id = %recipe_id, "Sale ignored: unknown recipe");
        return SaleOutcome::RecipeNotFound {
            recipe_id: recipe_id.to_string(),
        };
    };

    let adjustments: Vec<StockAdjustment> = recipe
        .ingredients
        .iter()
        .map(|ing| inventory.adjust_stock(&ing.stock_item_id, -ing.quantity))
        .collect();

    let missing = adjustments.iter().filter(|a| !a.is_applied()).count();
    info!(
        recipe_id = %recipe.id,
        recipe = %recipe.name,
        ingredients = adjustments.len(),
        missing,
        "Recipe sold"
    );

    SaleOutcome::Applied {
        recipe_id: recipe.id,
        recipe_name: recipe.name,
        adjustments,
    }
}

// =============================================================================
// Costing
// =============================================================================

/// Live cost breakdown of a recipe. Computed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCosting {
    pub recipe_id: String,
    pub price_cents: i64,
    /// Sum over ingredients that resolve to a stock item.
    pub ingredient_cost_cents: i64,
    /// Price minus ingredient cost. Negative when the dish loses money.
    pub margin_cents: i64,
    /// Ingredients whose stock item does not exist; they add nothing to cost.
    pub unresolved_ingredients: usize,
}

impl RecipeCosting {
    pub fn ingredient_cost(&self) -> Money {
        Money::from_cents(self.ingredient_cost_cents)
    }

    pub fn margin(&self) -> Money {
        Money::from_cents(self.margin_cents)
    }
}

pub fn recipe_costing(stock: &[StockItem], recipe: &Recipe) -> RecipeCosting {
    let mut cost = Money::zero();
    let mut unresolved = 0;

    for ing in &recipe.ingredients {
        match stock.iter().find(|s| s.id == ing.stock_item_id) {
            Some(item) => cost += item.price_per_unit().for_quantity(ing.quantity),
            None => unresolved += 1,
        }
    }

    RecipeCosting {
        recipe_id: recipe.id.clone(),
        price_cents: recipe.price_cents,
        ingredient_cost_cents: cost.cents(),
        margin_cents: (recipe.price() - cost).cents(),
        unresolved_ingredients: unresolved,
    }
}

/// The stock item's name, or the "Unknown" placeholder for a dangling id.
pub fn ingredient_label<'a>(stock: &'a [StockItem], ingredient: &Ingredient) -> &'a str {
    stock
        .iter()
        .find(|s| s.id == ingredient.stock_item_id)
        .map(|s| s.name.as_str())
        .unwrap_or(UNKNOWN_LABEL)
}

// =============================================================================
// Unit Tests
// =============================================================================
