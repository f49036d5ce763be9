//! # Invoice Commands
//!
//! ## Scan Flow
//! ```text
//! ayn invoice scan factura.jpg [--apply]
//!      │
//!      ▼
//! read image, MIME from extension
//!      │
//!      ▼
//! scan_or_empty(&gemini, ..)          (any failure ──► no lines)
//!      │
//!      ▼
//! reconcile(stock, lines)
//!      │   "aguacate hass" ──► Existing { "1", "Aguacates" }
//!      │   "harina"        ──► NewProduct
//!      │   ""              ──► Skipped
//!      ▼
//! --apply: matched quantities added to stock, ayn_stock written once
//! ```
//!
//! New products are listed but never created automatically; add them with
//! `ayn stock add`.

use ayn_assist::scan_or_empty;
use ayn_core::reconcile::{MatchStatus, ReconciledLine};
use ayn_core::StockAdjustment;
use serde::Serialize;
use std::path::Path;
use tracing::info;

use super::await_in_view;
use crate::error::AppResult;
use crate::state::AppState;

const DEFAULT_MIME: &str = "image/jpeg";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub lines: Vec<ReconciledLine>,
    /// Empty unless `--apply` was given.
    pub applied: Vec<StockAdjustment>,
    pub new_products: usize,
}

pub async fn scan(state: &mut AppState, image: &Path, mime: Option<String>, apply: bool) -> AppResult<ScanReport> {
    let session = state.session()?;
    let bytes = tokio::fs::read(image).await?;
    let mime = mime.unwrap_or_else(|| mime_from_path(image).to_string());
    info!(path = ?image, bytes = bytes.len(), mime = %mime, "Scanning invoice");

    let scanned = await_in_view(scan_or_empty(&state.assist, &bytes, &mime)).await?;
    let lines = state.store.reconcile(&session, scanned)?;

    let applied = if apply {
        state.store.apply_reconciliation(&session, &lines).await?
    } else {
        Vec::new()
    };

    let new_products = lines
        .iter()
        .filter(|l| l.status == MatchStatus::NewProduct)
        .count();

    Ok(ScanReport {
        lines,
        applied,
        new_products,
    })
}

pub fn mime_from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => DEFAULT_MIME,
    }
}
