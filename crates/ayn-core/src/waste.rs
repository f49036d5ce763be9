//! # Waste Recording
//!
//! Discarding stock writes a priced record and depletes the item.
//!
//! ```text
//! record_waste("1", 3, SPOILED, 2024-06-01)
//!      │
//!      ├── lookup "1" → Aguacates @ 250¢        (unknown id → error, stop)
//!      ├── cost = 3 × 250¢ = 750¢               (priced BEFORE depletion)
//!      ├── waste.insert(0, WasteItem{..})
//!      └── adjust_stock("1", -3)                45 → 42
//! ```
//!
//! The cost stays frozen on the record. Changing the item's price later
//! leaves recorded losses untouched.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::inventory::{Inventory, StockAdjustment};
use crate::money::Money;
use crate::quantity::Quantity;
use crate::types::{WasteItem, WasteReason};
use crate::validation::validate_positive_quantity;

/// The record written and what it did to stock.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteRecorded {
    pub item: WasteItem,
    pub adjustment: StockAdjustment,
}

/// Records discarded stock.
///
/// ## Errors
/// - `CoreError::StockItemNotFound` when `stock_id` does not exist (nothing
///   is recorded and no stock moves)
/// - `CoreError::Validation` when `quantity` is not positive
pub fn record_waste(
    inventory: &mut Inventory,
    stock_id: &str,
    quantity: Quantity,
    reason: WasteReason,
    date: NaiveDate,
) -> CoreResult<WasteRecorded> {
    validate_positive_quantity("quantity", quantity)?;

    let item = inventory
        .find_stock(stock_id)
        .ok_or_else(|| CoreError::StockItemNotFound(stock_id.to_string()))?;

    let record = WasteItem {
        id: Uuid::new_v4().to_string(),
        name: item.name.clone(),
        reason,
        date,
        cost_cents: item.price_per_unit().for_quantity(quantity).cents(),
    };

    inventory.push_waste(record.clone());
    let adjustment = inventory.adjust_stock(stock_id, -quantity);

    info!(
        stock_id = %stock_id,
        name = %record.name,
        quantity = %quantity,
        reason = %reason,
        cost_cents = record.cost_cents,
        "Waste recorded"
    );

    Ok(WasteRecorded {
        item: record,
        adjustment,
    })
}

/// Sum of recorded losses.
pub fn total_waste_cost(waste: &[WasteItem]) -> Money {
    waste.iter().map(|w| w.cost()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_inventory;

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_record_waste_prices_and_depletes() {
        let mut inv = seed_inventory();
        let recorded = record_waste(
            &mut inv,
            "1",
            Quantity::from_units(3),
            WasteReason::Spoiled,
            june_first(),
        )
        .unwrap();

        assert_eq!(recorded.item.name, "Aguacates");
        assert_eq!(recorded.item.cost_cents, 750);
        assert_eq!(inv.waste()[0].id, recorded.item.id);
        assert_eq!(inv.waste().len(), 2);
        assert_eq!(inv.find_stock("1").unwrap().units, Quantity::from_units(42));
    }

    #[test]
    fn test_cost_uses_full_quantity_even_when_stock_clamps() {
        let mut inv = seed_inventory();
        // Only 5 kg of Tocino on hand; discarding 8 still costs 8 × $15.
        let recorded = record_waste(
            &mut inv,
            "5",
            Quantity::from_units(8),
            WasteReason::Expired,
            june_first(),
        )
        .unwrap();

        assert_eq!(recorded.item.cost_cents, 12_000);
        assert!(matches!(recorded.adjustment, StockAdjustment::Applied { clamped: true, .. }));
        assert_eq!(inv.find_stock("5").unwrap().units, Quantity::zero());
    }

    #[test]
    fn test_unknown_stock_is_rejected_without_changes() {
        let mut inv = seed_inventory();
        let before = inv.clone();

        let result = record_waste(
            &mut inv,
            "99",
            Quantity::from_units(1),
            WasteReason::Other,
            june_first(),
        );

        assert!(matches!(result, Err(CoreError::StockItemNotFound(id)) if id == "99"));
        assert_eq!(inv, before);
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let mut inv = seed_inventory();
        let result = record_waste(&mut inv, "1", Quantity::zero(), WasteReason::Other, june_first());
        assert!(matches!(result, Err(CoreError::Validation(_))));
        assert_eq!(inv.waste().len(), 1);
    }

    #[test]
    fn test_total_waste_cost() {
        let mut inv = seed_inventory();
        assert_eq!(total_waste_cost(inv.waste()).cents(), 750);

        record_waste(&mut inv, "4", Quantity::from_milli(500), WasteReason::Expired, june_first()).unwrap();
        assert_eq!(total_waste_cost(inv.waste()).cents(), 810);
    }
}
