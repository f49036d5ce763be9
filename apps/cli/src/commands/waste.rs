//! # Waste Commands
//!
//! The cost is frozen when the waste is recorded: later price changes do
//! not touch existing records.

use ayn_core::waste::{total_waste_cost, WasteRecorded};
use ayn_core::{Quantity, WasteItem, WasteReason};
use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteList {
    pub records: Vec<WasteItem>,
    pub total_cost_cents: i64,
}

pub fn list(state: &AppState) -> AppResult<WasteList> {
    let session = state.session()?;
    let inventory = state.store.snapshot(&session)?;

    Ok(WasteList {
        records: inventory.waste().to_vec(),
        total_cost_cents: total_waste_cost(inventory.waste()).cents(),
    })
}

pub async fn record(
    state: &mut AppState,
    stock_id: &str,
    quantity: Quantity,
    reason: WasteReason,
    date: Option<NaiveDate>,
) -> AppResult<WasteRecorded> {
    let session = state.session()?;
    let date = date.unwrap_or_else(|| Local::now().date_naive());

    Ok(state
        .store
        .record_waste(&session, stock_id, quantity, reason, date)
        .await?)
}
