//! # Seed Dataset
//!
//! What a fresh install (or a reset) starts with. Ids are short and fixed
//! so recipes can reference the stock items.

use chrono::NaiveDate;

use crate::inventory::Inventory;
use crate::quantity::Quantity;
use crate::types::{
    Ingredient, Recipe, RecipeCategory, StockItem, Task, TaskCategory, WasteItem, WasteReason,
};

fn stock_item(
    id: &str,
    name: &str,
    category: &str,
    units: i64,
    unit_type: &str,
    min_stock: i64,
    price_per_unit_cents: i64,
) -> StockItem {
    StockItem {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        units: Quantity::from_units(units),
        unit_type: unit_type.to_string(),
        min_stock: Quantity::from_units(min_stock),
        price_per_unit_cents,
    }
}

fn ingredient(stock_item_id: &str, milli: i64) -> Ingredient {
    Ingredient {
        stock_item_id: stock_item_id.to_string(),
        quantity: Quantity::from_milli(milli),
    }
}

pub fn seed_stock() -> Vec<StockItem> {
    vec![
        stock_item("1", "Aguacates", "Produce", 45, "uds", 20, 250),
        stock_item("2", "Huevos", "Dairy", 120, "uds", 50, 30),
        stock_item("3", "Pan Sourdough", "Bakery", 12, "hogazas", 10, 450),
        stock_item("4", "Leche Entera", "Dairy", 15, "litros", 10, 120),
        stock_item("5", "Tocino", "Meat", 5, "kg", 8, 1500),
    ]
}

pub fn seed_recipes() -> Vec<Recipe> {
    vec![
        Recipe {
            id: "r1".to_string(),
            name: "Avocado Toast Deluxe".to_string(),
            category: RecipeCategory::Breakfast,
            price_cents: 1450,
            ingredients: vec![
                ingredient("1", 500), // half an avocado
                ingredient("3", 100), // one slice, a tenth of the loaf
                ingredient("2", 1000),
            ],
        },
        Recipe {
            id: "r2".to_string(),
            name: "Huevos con Tocino".to_string(),
            category: RecipeCategory::Breakfast,
            price_cents: 1200,
            ingredients: vec![ingredient("2", 2000), ingredient("5", 150)],
        },
    ]
}

pub fn seed_waste() -> Vec<WasteItem> {
    vec![WasteItem {
        id: "w1".to_string(),
        name: "Aguacates".to_string(),
        reason: WasteReason::Spoiled,
        date: NaiveDate::from_ymd_opt(2024, 5, 19).unwrap_or_default(),
        cost_cents: 750,
    }]
}

pub fn seed_tasks() -> Vec<Task> {
    vec![
        Task {
            id: "t1".to_string(),
            title: "Prep Salsa Holandesa".to_string(),
            description: "Hacer 2 litros".to_string(),
            category: TaskCategory::Kitchen,
            is_urgent: true,
            is_completed: false,
        },
        Task {
            id: "t3".to_string(),
            title: "Inventario Semanal".to_string(),
            description: "Conteo completo de barra".to_string(),
            category: TaskCategory::Inventory,
            is_urgent: true,
            is_completed: false,
        },
    ]
}

pub fn seed_inventory() -> Inventory {
    Inventory::from_parts(seed_stock(), seed_recipes(), seed_waste(), seed_tasks())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_recipes_resolve() {
        let inv = seed_inventory();
        for recipe in inv.recipes() {
            for ing in &recipe.ingredients {
                assert!(inv.find_stock(&ing.stock_item_id).is_some(), "{} dangles", ing.stock_item_id);
            }
        }
    }

    #[test]
    fn test_seed_waste_date() {
        assert_eq!(seed_waste()[0].date.to_string(), "2024-05-19");
    }
}
