//! # Recipe Commands
//!
//! ## Sale Cascade
//! ```text
//! ayn recipe sell r1   (Avocado Toast Deluxe)
//!      │
//!      ├── Aguacates      45   − 0.5 ──► 44.5
//!      ├── Pan Sourdough  12   − 0.1 ──► 11.9
//!      └── Huevos         120  − 1   ──► 119
//!      │
//!      ▼
//! ayn_stock written once, SaleOutcome printed
//! ```
//!
//! An unknown recipe id is not an error: the outcome says `recipeNotFound`
//! and stock is untouched.

use ayn_core::sale::{ingredient_label, recipe_costing, RecipeCosting, SaleOutcome};
use ayn_core::{Ingredient, NewRecipe, Quantity, Recipe, RecipeCategory, StockItem, ValidationError};
use serde::Serialize;

use crate::cli::NewRecipeArgs;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientLine {
    pub stock_item_id: String,
    /// Stock item name, or "Unknown" when the item no longer exists.
    pub name: String,
    pub quantity: Quantity,
    pub unit_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeView {
    pub id: String,
    pub name: String,
    pub category: RecipeCategory,
    pub price_cents: i64,
    pub ingredients: Vec<IngredientLine>,
    pub costing: RecipeCosting,
}

impl RecipeView {
    fn new(stock: &[StockItem], recipe: &Recipe) -> Self {
        let ingredients = recipe
            .ingredients
            .iter()
            .map(|ing| IngredientLine {
                stock_item_id: ing.stock_item_id.clone(),
                name: ingredient_label(stock, ing).to_string(),
                quantity: ing.quantity,
                unit_type: stock
                    .iter()
                    .find(|s| s.id == ing.stock_item_id)
                    .map(|s| s.unit_type.clone()),
            })
            .collect();

        RecipeView {
            id: recipe.id.clone(),
            name: recipe.name.clone(),
            category: recipe.category,
            price_cents: recipe.price_cents,
            ingredients,
            costing: recipe_costing(stock, recipe),
        }
    }
}

pub fn list(state: &AppState) -> AppResult<Vec<RecipeView>> {
    let session = state.session()?;
    let inventory = state.store.snapshot(&session)?;

    Ok(inventory
        .recipes()
        .iter()
        .map(|r| RecipeView::new(inventory.stock(), r))
        .collect())
}

pub fn cost(state: &AppState, id: &str) -> AppResult<RecipeView> {
    let session = state.session()?;
    let inventory = state.store.snapshot(&session)?;

    inventory
        .find_recipe(id)
        .map(|r| RecipeView::new(inventory.stock(), r))
        .ok_or_else(|| AppError::not_found("Recipe", id))
}

pub async fn sell(state: &mut AppState, id: &str) -> AppResult<SaleOutcome> {
    let session = state.session()?;
    Ok(state.store.apply_sale(&session, id).await?)
}

pub async fn add(state: &mut AppState, args: NewRecipeArgs) -> AppResult<Recipe> {
    let session = state.session()?;
    let ingredients = args
        .ingredients
        .iter()
        .map(|raw| parse_ingredient(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let fields = NewRecipe {
        name: args.name,
        category: args.category,
        price_cents: args.price_cents,
        ingredients,
    };
    Ok(state.store.add_recipe(&session, fields).await?)
}

/// Parses `<stock id>=<quantity>`.
pub fn parse_ingredient(raw: &str) -> Result<Ingredient, ValidationError> {
    let invalid = || ValidationError::InvalidFormat {
        field: "ingredient".to_string(),
        reason: format!("expected <stock id>=<quantity>, got '{}'", raw),
    };

    let (id, qty) = raw.split_once('=').ok_or_else(invalid)?;
    let quantity: Quantity = qty.parse().map_err(|_| invalid())?;

    Ok(Ingredient {
        stock_item_id: id.trim().to_string(),
        quantity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ingredient() {
        let ing = parse_ingredient("3=0.1").unwrap();
        assert_eq!(ing.stock_item_id, "3");
        assert_eq!(ing.quantity, Quantity::from_milli(100));

        assert!(parse_ingredient("3").is_err());
        assert!(parse_ingredient("3=lots").is_err());
    }

    #[test]
    fn test_view_labels_dangling_ingredient() {
        let stock = ayn_core::seed::seed_stock();
        let mut recipe = ayn_core::seed::seed_recipes().remove(1);
        recipe.ingredients[1].stock_item_id = "gone".to_string();

        let view = RecipeView::new(&stock, &recipe);
        assert_eq!(view.ingredients[0].name, "Huevos");
        assert_eq!(view.ingredients[1].name, "Unknown");
        assert_eq!(view.ingredients[1].unit_type, None);
        assert_eq!(view.costing.unresolved_ingredients, 1);
    }
}
