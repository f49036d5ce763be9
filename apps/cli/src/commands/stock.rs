//! # Stock Commands
//!
//! ## List Flow
//! ```text
//! ayn stock list --category Dairy --search "le"
//!      │
//!      ▼
//! validate_search_query("le")       (trimmed, max 100 chars)
//!      │
//!      ▼
//! filter_stock(stock, Some("Dairy"), "le")
//!      │
//!      ▼
//! StockRow { ..item, valueCents, isLow, suggestedOrder }
//! ```

use ayn_core::report::{filter_stock, suggested_order};
use ayn_core::validation::validate_search_query;
use ayn_core::{NewStockItem, Quantity, StockAdjustment, StockItem};
use serde::Serialize;
use tracing::debug;

use crate::cli::NewStockArgs;
use crate::error::AppResult;
use crate::state::AppState;

/// One row of the stock table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRow {
    #[serde(flatten)]
    pub item: StockItem,
    pub value_cents: i64,
    pub is_low: bool,
    /// Whole units to order to reach 1.5 × minimum; zero when not low.
    pub suggested_order: i64,
}

impl From<&StockItem> for StockRow {
    fn from(item: &StockItem) -> Self {
        StockRow {
            item: item.clone(),
            value_cents: item.value().cents(),
            is_low: item.is_low(),
            suggested_order: suggested_order(item),
        }
    }
}

/// `category` "all" (any case) means no category filter.
pub fn list(state: &AppState, category: Option<&str>, search: Option<&str>) -> AppResult<Vec<StockRow>> {
    let session = state.session()?;
    let query = validate_search_query(search.unwrap_or_default())?;
    let category = category.filter(|c| !c.eq_ignore_ascii_case("all"));

    let inventory = state.store.snapshot(&session)?;
    let rows: Vec<StockRow> = filter_stock(inventory.stock(), category, &query)
        .into_iter()
        .map(StockRow::from)
        .collect();

    debug!(query = %query, results = rows.len(), "Stock listed");
    Ok(rows)
}

pub async fn add(state: &mut AppState, args: NewStockArgs) -> AppResult<StockItem> {
    let session = state.session()?;
    let fields = NewStockItem {
        name: args.name,
        category: args.category,
        units: args.units,
        unit_type: args.unit_type,
        min_stock: args.min_stock,
        price_per_unit_cents: args.price_cents,
    };
    Ok(state.store.add_stock_item(&session, fields).await?)
}

pub async fn adjust(state: &mut AppState, id: &str, delta: Quantity) -> AppResult<StockAdjustment> {
    let session = state.session()?;
    Ok(state.store.adjust_stock(&session, id, delta).await?)
}
