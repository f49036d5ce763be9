//! # Backup Document
//!
//! A single JSON file holding all four collections.
//!
//! ```json
//! {
//!   "stock": [...],
//!   "recipes": [...],
//!   "tasks": [...],
//!   "waste": [...],
//!   "exportedAt": "2024-06-01T09:30:00Z",
//!   "appName": "AYN - All You Need"
//! }
//! ```
//!
//! Importing a document replaces the collections wholesale. The session is
//! not part of a backup. A document whose stock breaks the level rules
//! (negative or oversized units, negative price) is rejected as a whole.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::inventory::Inventory;
use crate::types::{Recipe, StockItem, Task, WasteItem};
use crate::validation::validate_stock_item;
use crate::APP_NAME;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub stock: Vec<StockItem>,
    pub recipes: Vec<Recipe>,
    pub tasks: Vec<Task>,
    pub waste: Vec<WasteItem>,
    #[ts(as = "String")]
    pub exported_at: DateTime<Utc>,
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

fn default_app_name() -> String {
    APP_NAME.to_string()
}

impl BackupDocument {
    pub fn from_inventory(inventory: &Inventory, exported_at: DateTime<Utc>) -> Self {
        BackupDocument {
            stock: inventory.stock().to_vec(),
            recipes: inventory.recipes().to_vec(),
            tasks: inventory.tasks().to_vec(),
            waste: inventory.waste().to_vec(),
            exported_at,
            app_name: APP_NAME.to_string(),
        }
    }

    /// Pretty-printed with two-space indentation.
    pub fn to_pretty_json(&self) -> CoreResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CoreError::InvalidBackup(e.to_string()))
    }

    /// Parses and validates a document.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let document: BackupDocument =
            serde_json::from_str(json).map_err(|e| CoreError::InvalidBackup(e.to_string()))?;
        document.validate()?;
        Ok(document)
    }

    /// Every stock item must hold a level in range and a non-negative price.
    pub fn validate(&self) -> CoreResult<()> {
        for item in &self.stock {
            validate_stock_item(item)
                .map_err(|e| CoreError::InvalidBackup(format!("stock item {}: {}", item.id, e)))?;
        }
        Ok(())
    }

    pub fn into_inventory(self) -> Inventory {
        Inventory::from_parts(self.stock, self.recipes, self.waste, self.tasks)
    }
}

/// `ayn_backup_2024-06-01.json`
pub fn default_file_name(date: NaiveDate) -> String {
    format!("ayn_backup_{}.json", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::Quantity;
    use crate::sale::apply_sale;
    use crate::seed::seed_inventory;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_document_shape() {
        let doc = BackupDocument::from_inventory(&seed_inventory(), at());
        let json: serde_json::Value = serde_json::from_str(&doc.to_pretty_json().unwrap()).unwrap();

        assert_eq!(json["appName"], "AYN - All You Need");
        assert_eq!(json["stock"].as_array().unwrap().len(), 5);
        assert_eq!(json["waste"][0]["id"], "w1");
        assert!(json["exportedAt"].as_str().unwrap().starts_with("2024-06-01T09:30:00"));
    }

    #[test]
    fn test_round_trip_reproduces_collections() {
        let mut inv = seed_inventory();
        apply_sale(&mut inv, "r1");

        let text = BackupDocument::from_inventory(&inv, at()).to_pretty_json().unwrap();
        let restored = BackupDocument::from_json(&text).unwrap().into_inventory();

        assert_eq!(restored, inv);
        assert_eq!(
            serde_json::to_string(restored.stock()).unwrap(),
            serde_json::to_string(inv.stock()).unwrap()
        );
        assert_eq!(restored.find_stock("3").unwrap().units, Quantity::from_milli(11_900));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            BackupDocument::from_json("{\"stock\": 3}"),
            Err(CoreError::InvalidBackup(_))
        ));
    }

    #[test]
    fn test_rejects_negative_units() {
        let text = BackupDocument::from_inventory(&seed_inventory(), at())
            .to_pretty_json()
            .unwrap()
            .replace("\"units\": 45", "\"units\": -7.5");
        assert!(text.contains("-7.5"));

        match BackupDocument::from_json(&text) {
            Err(CoreError::InvalidBackup(reason)) => assert!(reason.contains("stock item 1")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_validate_catches_hand_built_document() {
        let mut doc = BackupDocument::from_inventory(&seed_inventory(), at());
        assert!(doc.validate().is_ok());

        doc.stock[2].min_stock = Quantity::from_milli(-1);
        assert!(matches!(doc.validate(), Err(CoreError::InvalidBackup(_))));
    }

    #[test]
    fn test_default_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(default_file_name(date), "ayn_backup_2024-06-01.json");
    }
}
