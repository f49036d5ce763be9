//! # Dashboard Command
//!
//! ```text
//! ┌───────────────────────────┬───────────────────────────┐
//! │ total stock value         │ low stock count           │
//! │ value by category         │ waste cost                │
//! │ open / urgent tasks       │ low stock rows            │
//! └───────────────────────────┴───────────────────────────┘
//! ```

use ayn_core::report::{dashboard_summary, DashboardSummary};
use ayn_core::Session;
use serde::Serialize;

use super::stock::StockRow;
use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDto {
    pub operator: Session,
    #[serde(flatten)]
    pub summary: DashboardSummary,
    pub low_stock: Vec<StockRow>,
}

pub fn dashboard(state: &AppState) -> AppResult<DashboardDto> {
    let session = state.session()?;
    let inventory = state.store.snapshot(&session)?;

    let low_stock = inventory
        .stock()
        .iter()
        .filter(|s| s.is_low())
        .map(StockRow::from)
        .collect();

    Ok(DashboardDto {
        summary: dashboard_summary(inventory),
        low_stock,
        operator: session,
    })
}
