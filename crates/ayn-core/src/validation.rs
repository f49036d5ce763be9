//! # Validation Module
//!
//! Input validation for everything an operator types in.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI argument parsing (clap)                                  │
//! │  ├── Types: numbers are numbers, enums are known values                │
//! │  └── Immediate usage errors                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required names, non-negative prices and levels                    │
//! │  └── Runs before any mutation, so rejected input changes nothing       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Inventory operations                                         │
//! │  └── Clamp to zero, tolerate dangling references                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ayn_core::validation::{validate_name, validate_price_cents};
//!
//! assert!(validate_name("name", "Aguacates").is_ok());
//! assert!(validate_price_cents(-1).is_err());
//! ```

use crate::error::ValidationError;
use crate::quantity::{Quantity, MAX_UNITS};
use crate::types::{NewRecipe, NewStockItem, NewTask, StockItem};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest name or title accepted.
pub const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name or title.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a stock search query. Empty is fine (matches everything).
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents. Zero is allowed.
///
/// ```rust
/// use ayn_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1450).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates an amount that is consumed or discarded.
/// Must be `> 0` and at most [`MAX_UNITS`].
pub fn validate_positive_quantity(field: &str, qty: Quantity) -> ValidationResult<()> {
    if !qty.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    validate_upper_bound(field, qty)
}

/// Validates a stock level or threshold.
/// Must be `>= 0` and at most [`MAX_UNITS`].
pub fn validate_level(field: &str, qty: Quantity) -> ValidationResult<()> {
    if qty.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    validate_upper_bound(field, qty)
}

fn validate_upper_bound(field: &str, qty: Quantity) -> ValidationResult<()> {
    if qty > Quantity::max() {
        return Err(ValidationError::TooLarge {
            field: field.to_string(),
            max: MAX_UNITS,
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Checks the numeric fields of a stock item that came from outside the
/// process (backup file, stored snapshot). Names are not re-checked.
pub fn validate_stock_item(item: &StockItem) -> ValidationResult<()> {
    validate_level("units", item.units)?;
    validate_level("minStock", item.min_stock)?;
    validate_price_cents(item.price_per_unit_cents)
}

pub fn validate_new_stock_item(item: &NewStockItem) -> ValidationResult<()> {
    validate_name("name", &item.name)?;
    validate_name("category", &item.category)?;
    validate_name("unitType", &item.unit_type)?;
    validate_level("units", item.units)?;
    validate_level("minStock", item.min_stock)?;
    validate_price_cents(item.price_per_unit_cents)
}

/// Ingredient stock ids are NOT checked against the stock list; a recipe
/// may reference an item that does not exist yet.
pub fn validate_new_recipe(recipe: &NewRecipe) -> ValidationResult<()> {
    validate_name("name", &recipe.name)?;
    validate_price_cents(recipe.price_cents)?;

    for ingredient in &recipe.ingredients {
        if ingredient.stock_item_id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "stockItemId".to_string(),
            });
        }
        validate_positive_quantity("ingredient quantity", ingredient.quantity)?;
    }

    Ok(())
}

pub fn validate_new_task(task: &NewTask) -> ValidationResult<()> {
    validate_name("title", &task.title)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Ingredient, RecipeCategory, TaskCategory};

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Leche Entera").is_ok());
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", "   ").is_err());
        assert!(validate_name("name", &"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_quantities() {
        assert!(validate_positive_quantity("quantity", Quantity::from_milli(1)).is_ok());
        assert!(validate_positive_quantity("quantity", Quantity::zero()).is_err());
        assert!(validate_level("units", Quantity::zero()).is_ok());
        assert!(validate_level("units", Quantity::from_milli(-1)).is_err());

        assert!(validate_level("minStock", Quantity::max()).is_ok());
        assert!(matches!(
            validate_level("minStock", Quantity::from_milli(4_000_000_000_000_000_000)),
            Err(ValidationError::TooLarge { .. })
        ));
        assert!(validate_positive_quantity("quantity", Quantity::from_units(MAX_UNITS + 1)).is_err());
    }

    #[test]
    fn test_validate_new_stock_item() {
        let mut item = NewStockItem {
            name: "Queso Manchego".to_string(),
            category: "Dairy".to_string(),
            units: Quantity::from_units(3),
            unit_type: "kg".to_string(),
            min_stock: Quantity::from_units(1),
            price_per_unit_cents: 1800,
        };
        assert!(validate_new_stock_item(&item).is_ok());

        item.price_per_unit_cents = -5;
        assert!(matches!(
            validate_new_stock_item(&item),
            Err(ValidationError::Negative { .. })
        ));
    }

    #[test]
    fn test_validate_new_recipe_allows_unknown_ingredient_ids() {
        let recipe = NewRecipe {
            name: "Tostada".to_string(),
            category: RecipeCategory::Breakfast,
            price_cents: 500,
            ingredients: vec![Ingredient {
                stock_item_id: "does-not-exist".to_string(),
                quantity: Quantity::from_milli(250),
            }],
        };
        assert!(validate_new_recipe(&recipe).is_ok());

        let zero = NewRecipe {
            ingredients: vec![Ingredient {
                stock_item_id: "1".to_string(),
                quantity: Quantity::zero(),
            }],
            ..recipe
        };
        assert!(validate_new_recipe(&zero).is_err());
    }

    #[test]
    fn test_validate_new_task() {
        let task = NewTask {
            title: String::new(),
            description: "x".to_string(),
            category: TaskCategory::Cleaning,
            is_urgent: false,
        };
        assert!(validate_new_task(&task).is_err());
    }

    #[test]
    fn test_validate_search_query_trims() {
        assert_eq!(validate_search_query("  leche ").unwrap(), "leche");
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }
}
