//! # Dashboard & Stock Projections
//!
//! Read-only figures derived from the collections. Nothing here is stored.

use serde::Serialize;

use crate::inventory::Inventory;
use crate::money::Money;
use crate::quantity::MILLI_PER_UNIT;
use crate::types::{StockItem, KNOWN_STOCK_CATEGORIES};
use crate::waste::total_waste_cost;

/// Value held in one chart bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryValue {
    pub category: String,
    pub value_cents: i64,
}

/// Everything the dashboard header shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_stock_value_cents: i64,
    pub low_stock_count: usize,
    pub value_by_category: Vec<CategoryValue>,
    pub total_waste_cost_cents: i64,
    pub open_tasks: usize,
    pub urgent_tasks: usize,
}

pub fn total_stock_value(stock: &[StockItem]) -> Money {
    stock.iter().map(StockItem::value).sum()
}

pub fn low_stock_count(stock: &[StockItem]) -> usize {
    stock.iter().filter(|s| s.is_low()).count()
}

/// Stock value per known category, in chart order.
///
/// Categories with no items still appear with zero.
pub fn value_by_category(stock: &[StockItem]) -> Vec<CategoryValue> {
    KNOWN_STOCK_CATEGORIES
        .iter()
        .map(|cat| CategoryValue {
            category: cat.to_string(),
            value_cents: total_stock_value_where(stock, |s| s.category == *cat).cents(),
        })
        .collect()
}

fn total_stock_value_where(stock: &[StockItem], pred: impl Fn(&StockItem) -> bool) -> Money {
    stock.iter().filter(|s| pred(s)).map(StockItem::value).sum()
}

/// Whole units to reorder so a low item ends at one and a half times its
/// minimum. Zero when the item is not low.
///
/// ```text
/// Tocino: units 5, min 8 → ceil(8 × 1.5 − 5) = 7
/// ```
pub fn suggested_order(item: &StockItem) -> i64 {
    if !item.is_low() {
        return 0;
    }

    // Work in half-milli steps so min × 1.5 stays an integer. Saturating
    // so a level built with `from_milli` past the validated range cannot
    // overflow.
    let half_steps = item
        .min_stock
        .milli()
        .saturating_mul(3)
        .saturating_sub(item.units.milli().saturating_mul(2));
    let per_unit = MILLI_PER_UNIT * 2;
    let whole = half_steps.div_euclid(per_unit);
    if half_steps.rem_euclid(per_unit) == 0 {
        whole
    } else {
        whole + 1
    }
}

/// Items in `category` (`None` = all) whose name contains `query`,
/// case-insensitively. An empty query matches everything.
pub fn filter_stock<'a>(stock: &'a [StockItem], category: Option<&str>, query: &str) -> Vec<&'a StockItem> {
    let query = query.trim().to_lowercase();

    stock
        .iter()
        .filter(|s| category.map_or(true, |c| s.category == c))
        .filter(|s| s.name.to_lowercase().contains(&query))
        .collect()
}

pub fn dashboard_summary(inventory: &Inventory) -> DashboardSummary {
    let stock = inventory.stock();
    let tasks = inventory.tasks();

    DashboardSummary {
        total_stock_value_cents: total_stock_value(stock).cents(),
        low_stock_count: low_stock_count(stock),
        value_by_category: value_by_category(stock),
        total_waste_cost_cents: total_waste_cost(inventory.waste()).cents(),
        open_tasks: tasks.iter().filter(|t| !t.is_completed).count(),
        urgent_tasks: tasks.iter().filter(|t| t.is_urgent && !t.is_completed).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::Quantity;
    use crate::seed::seed_inventory;

    #[test]
    fn test_seed_totals() {
        let inv = seed_inventory();
        // 45×250 + 120×30 + 12×450 + 15×120 + 5×1500
        // = 11250 + 3600 + 5400 + 1800 + 7500
        assert_eq!(total_stock_value(inv.stock()).cents(), 29_550);
        assert_eq!(low_stock_count(inv.stock()), 1);
    }

    #[test]
    fn test_value_by_category_order() {
        let inv = seed_inventory();
        let buckets = value_by_category(inv.stock());
        let pairs: Vec<(&str, i64)> = buckets.iter().map(|b| (b.category.as_str(), b.value_cents)).collect();
        assert_eq!(
            pairs,
            vec![("Produce", 11_250), ("Dairy", 5_400), ("Bakery", 5_400), ("Meat", 7_500)]
        );
    }

    #[test]
    fn test_suggested_order() {
        let inv = seed_inventory();
        assert_eq!(suggested_order(inv.find_stock("5").unwrap()), 7);
        assert_eq!(suggested_order(inv.find_stock("1").unwrap()), 0);

        let odd = StockItem {
            units: Quantity::from_milli(500),
            min_stock: Quantity::from_units(1),
            ..inv.find_stock("5").unwrap().clone()
        };
        // 1 × 1.5 − 0.5 = 1
        assert_eq!(suggested_order(&odd), 1);

        let fractional = StockItem {
            units: Quantity::from_milli(2_300),
            min_stock: Quantity::from_units(3),
            ..odd
        };
        // 4.5 − 2.3 = 2.2 → 3
        assert_eq!(suggested_order(&fractional), 3);

        let at_limit = StockItem {
            units: Quantity::zero(),
            min_stock: Quantity::max(),
            ..fractional.clone()
        };
        assert_eq!(suggested_order(&at_limit), 1_500_000_000);

        let unchecked = StockItem {
            units: Quantity::zero(),
            min_stock: Quantity::from_milli(i64::MAX),
            ..fractional
        };
        assert!(suggested_order(&unchecked) > 0);
    }

    #[test]
    fn test_filter_stock() {
        let inv = seed_inventory();

        let dairy = filter_stock(inv.stock(), Some("Dairy"), "");
        assert_eq!(dairy.len(), 2);

        let milk = filter_stock(inv.stock(), None, "LECHE");
        assert_eq!(milk.len(), 1);
        assert_eq!(milk[0].id, "4");

        assert!(filter_stock(inv.stock(), Some("Meat"), "leche").is_empty());
        assert_eq!(filter_stock(inv.stock(), None, "").len(), 5);
    }

    #[test]
    fn test_dashboard_summary() {
        let summary = dashboard_summary(&seed_inventory());
        assert_eq!(summary.total_waste_cost_cents, 750);
        assert_eq!(summary.open_tasks, 2);
        assert_eq!(summary.urgent_tasks, 2);
    }
}
