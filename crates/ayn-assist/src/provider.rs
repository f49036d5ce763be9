//! The two AI collaborators, as traits.
//!
//! `GeminiClient` implements both. Tests and the fallback wrappers only see
//! the traits.

use async_trait::async_trait;
use ayn_core::{Insight, ScannedLine, StockItem, WasteItem};

use crate::error::AssistResult;

/// Produces short advice cards from the current stock and waste lists.
#[async_trait]
pub trait InsightProvider: Send + Sync {
    async fn insights(&self, stock: &[StockItem], waste: &[WasteItem]) -> AssistResult<Vec<Insight>>;
}

/// Reads product lines off an invoice photo.
#[async_trait]
pub trait InvoiceScanner: Send + Sync {
    /// `mime_type` describes `image`, e.g. `image/jpeg`.
    async fn scan(&self, image: &[u8], mime_type: &str) -> AssistResult<Vec<ScannedLine>>;
}
