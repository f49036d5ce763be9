//! # Domain Types
//!
//! Core domain types used throughout AYN.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   StockItem     │◄──│   Ingredient    │◄──│     Recipe      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  stockItemId    │   │  id             │       │
//! │  │  units (≥ 0)    │   │  (weak, may     │   │  priceCents     │       │
//! │  │  minStock       │   │   dangle)       │   │  ingredients[]  │       │
//! │  │  pricePerUnit   │   │  quantity       │   │  category       │       │
//! │  └────────┬────────┘   └─────────────────┘   └─────────────────┘       │
//! │           │ name + price copied at record time                          │
//! │  ┌────────▼────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   WasteItem     │   │      Task       │   │    Session      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name (copy)    │   │  title          │   │  name           │       │
//! │  │  reason         │   │  category       │   │  role           │       │
//! │  │  costCents      │   │  isUrgent       │   └─────────────────┘       │
//! │  │  (frozen)       │   │  isCompleted    │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Every type serializes with camelCase field names, which is the shape the
//! persisted snapshots and the backup document use.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::quantity::Quantity;

/// Stock categories the dashboard knows how to chart, in display order.
///
/// The stock category itself is an open string; items outside this list
/// still count toward totals but get no chart bucket.
pub const KNOWN_STOCK_CATEGORIES: [&str; 4] = ["Produce", "Dairy", "Bakery", "Meat"];

// =============================================================================
// Stock Item
// =============================================================================

/// Something the kitchen keeps on the shelf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Current level. Never negative after a mutation.
    #[ts(type = "number")]
    pub units: Quantity,
    /// Display label for the unit: "uds", "kg", "litros", "hogazas".
    pub unit_type: String,
    #[ts(type = "number")]
    pub min_stock: Quantity,
    pub price_per_unit_cents: i64,
}

impl StockItem {
    #[inline]
    pub fn price_per_unit(&self) -> Money {
        Money::from_cents(self.price_per_unit_cents)
    }

    /// Current shelf value at the current unit price.
    pub fn value(&self) -> Money {
        self.price_per_unit().for_quantity(self.units)
    }

    /// Strictly below the minimum; sitting exactly at it is fine.
    #[inline]
    pub fn is_low(&self) -> bool {
        self.units < self.min_stock
    }
}

/// Fields for a new stock item. The id is generated on insert.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewStockItem {
    pub name: String,
    pub category: String,
    #[ts(type = "number")]
    pub units: Quantity,
    pub unit_type: String,
    #[ts(type = "number")]
    pub min_stock: Quantity,
    pub price_per_unit_cents: i64,
}

// =============================================================================
// Recipe
// =============================================================================

/// Menu section a recipe belongs to.
///
/// Serialized with the Spanish labels the menu shows. The English names are
/// accepted on input too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RecipeCategory {
    #[serde(rename = "Desayuno", alias = "Breakfast")]
    Breakfast,
    #[serde(rename = "Comida", alias = "Lunch")]
    Lunch,
    #[serde(rename = "Panadería", alias = "Bakery")]
    Bakery,
}

impl RecipeCategory {
    pub const ALL: [RecipeCategory; 3] = [
        RecipeCategory::Breakfast,
        RecipeCategory::Lunch,
        RecipeCategory::Bakery,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            RecipeCategory::Breakfast => "Desayuno",
            RecipeCategory::Lunch => "Comida",
            RecipeCategory::Bakery => "Panadería",
        }
    }
}

impl Default for RecipeCategory {
    fn default() -> Self {
        RecipeCategory::Breakfast
    }
}

impl fmt::Display for RecipeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RecipeCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "desayuno" | "breakfast" => Ok(RecipeCategory::Breakfast),
            "comida" | "lunch" => Ok(RecipeCategory::Lunch),
            "panadería" | "panaderia" | "bakery" => Ok(RecipeCategory::Bakery),
            _ => Err(ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: RecipeCategory::ALL.iter().map(|c| c.label().to_string()).collect(),
            }),
        }
    }
}

/// One line of a recipe: how much of which stock item a single sale uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Weak reference. Nothing stops the stock item from never existing.
    pub stock_item_id: String,
    #[ts(type = "number")]
    pub quantity: Quantity,
}

/// A dish on the menu and what it consumes (an "escandallo").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub category: RecipeCategory,
    pub price_cents: i64,
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// Fields for a new recipe. Ingredient ids are not checked.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub name: String,
    pub category: RecipeCategory,
    pub price_cents: i64,
    pub ingredients: Vec<Ingredient>,
}

// =============================================================================
// Waste
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WasteReason {
    Spoiled,
    Expired,
    Other,
}

impl WasteReason {
    pub const fn as_str(&self) -> &'static str {
        match self {
            WasteReason::Spoiled => "SPOILED",
            WasteReason::Expired => "EXPIRED",
            WasteReason::Other => "OTHER",
        }
    }
}

impl Default for WasteReason {
    fn default() -> Self {
        WasteReason::Spoiled
    }
}

impl fmt::Display for WasteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WasteReason {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SPOILED" => Ok(WasteReason::Spoiled),
            "EXPIRED" => Ok(WasteReason::Expired),
            "OTHER" => Ok(WasteReason::Other),
            _ => Err(ValidationError::NotAllowed {
                field: "reason".to_string(),
                allowed: vec!["SPOILED".into(), "EXPIRED".into(), "OTHER".into()],
            }),
        }
    }
}

/// A record of discarded stock ("merma").
///
/// Name and cost are copies taken when the waste was recorded. Renaming or
/// repricing the stock item later does not touch existing records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WasteItem {
    pub id: String,
    pub name: String,
    pub reason: WasteReason,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub cost_cents: i64,
}

impl WasteItem {
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents)
    }
}

// =============================================================================
// Task
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskCategory {
    Kitchen,
    Cleaning,
    Inventory,
}

impl TaskCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Kitchen => "KITCHEN",
            TaskCategory::Cleaning => "CLEANING",
            TaskCategory::Inventory => "INVENTORY",
        }
    }
}

impl Default for TaskCategory {
    fn default() -> Self {
        TaskCategory::Kitchen
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "KITCHEN" => Ok(TaskCategory::Kitchen),
            "CLEANING" => Ok(TaskCategory::Cleaning),
            "INVENTORY" => Ok(TaskCategory::Inventory),
            _ => Err(ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: vec!["KITCHEN".into(), "CLEANING".into(), "INVENTORY".into()],
            }),
        }
    }
}

/// An operational to-do. Completing a task removes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: TaskCategory,
    pub is_urgent: bool,
    pub is_completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub category: TaskCategory,
    pub is_urgent: bool,
}

// =============================================================================
// Session
// =============================================================================

/// The logged-in operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Session {
    pub name: String,
    pub role: String,
}

// =============================================================================
// AI Results
// =============================================================================

/// One short advice card produced from the stock and waste lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Insight {
    pub title: String,
    pub content: String,
}

impl Insight {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Insight {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// One product line read off an invoice photo.
///
/// The extractor may return lines without a name; those are kept here and
/// skipped during reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ScannedLine {
    #[serde(default)]
    pub name: String,
    #[ts(type = "number")]
    #[serde(default)]
    pub quantity: Quantity,
    #[serde(default)]
    pub price_cents: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
