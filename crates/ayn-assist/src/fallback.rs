//! # Fallback Policy
//!
//! AI failures never reach the operator.
//!
//! ```text
//! ┌──────────────────────────┬──────────────────────────────────────────┐
//! │ Call                     │ On any error (incl. missing key)         │
//! ├──────────────────────────┼──────────────────────────────────────────┤
//! │ insights_or_fallback     │ the three fixed insights below           │
//! │ scan_or_empty            │ no lines                                 │
//! └──────────────────────────┴──────────────────────────────────────────┘
//! ```

use ayn_core::{Insight, ScannedLine, StockItem, WasteItem};
use tracing::{info, warn};

use crate::error::AssistError;
use crate::provider::{InsightProvider, InvoiceScanner};

/// Shown whenever real insights are unavailable.
pub fn fallback_insights() -> Vec<Insight> {
    vec![
        Insight::new(
            "Stock Inteligente",
            "Los niveles actuales son saludables. Mantén el monitoreo en perecederos.",
        ),
        Insight::new(
            "Control de Mermas",
            "Registra cada merma para que la IA identifique patrones de pérdida semanal.",
        ),
        Insight::new(
            "Recomendación",
            "Considera automatizar pedidos de secos para liberar tiempo en cocina.",
        ),
    ]
}

pub async fn insights_or_fallback(
    provider: &dyn InsightProvider,
    stock: &[StockItem],
    waste: &[WasteItem],
) -> Vec<Insight> {
    match provider.insights(stock, waste).await {
        Ok(insights) => insights,
        Err(e) => {
            log_failure("insights", &e);
            fallback_insights()
        }
    }
}

pub async fn scan_or_empty(scanner: &dyn InvoiceScanner, image: &[u8], mime_type: &str) -> Vec<ScannedLine> {
    match scanner.scan(image, mime_type).await {
        Ok(lines) => lines,
        Err(e) => {
            log_failure("invoice scan", &e);
            Vec::new()
        }
    }
}

fn log_failure(call: &str, error: &AssistError) {
    if error.is_config_error() {
        info!(call, error = %error, "AI unavailable, using fallback");
    } else {
        warn!(call, error = %error, "AI call failed, using fallback");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssistResult;
    use async_trait::async_trait;
    use ayn_core::Quantity;

    struct Failing(fn() -> AssistError);

    #[async_trait]
    impl InsightProvider for Failing {
        async fn insights(&self, _: &[StockItem], _: &[WasteItem]) -> AssistResult<Vec<Insight>> {
            Err((self.0)())
        }
    }

    #[async_trait]
    impl InvoiceScanner for Failing {
        async fn scan(&self, _: &[u8], _: &str) -> AssistResult<Vec<ScannedLine>> {
            Err((self.0)())
        }
    }

    struct Canned;

    #[async_trait]
    impl InsightProvider for Canned {
        async fn insights(&self, stock: &[StockItem], _: &[WasteItem]) -> AssistResult<Vec<Insight>> {
            Ok(vec![Insight::new("Items", stock.len().to_string())])
        }
    }

    #[async_trait]
    impl InvoiceScanner for Canned {
        async fn scan(&self, image: &[u8], _: &str) -> AssistResult<Vec<ScannedLine>> {
            Ok(vec![ScannedLine {
                name: "Leche".to_string(),
                quantity: Quantity::from_units(image.len() as i64),
                price_cents: 110,
            }])
        }
    }

    #[tokio::test]
    async fn test_failures_use_fallbacks() {
        let failing = Failing(|| AssistError::RequestFailed("connection refused".into()));

        let insights = insights_or_fallback(&failing, &[], &[]).await;
        assert_eq!(insights, fallback_insights());
        assert_eq!(insights.len(), 3);
        assert_eq!(insights[0].title, "Stock Inteligente");

        assert!(scan_or_empty(&failing, b"img", "image/jpeg").await.is_empty());

        let no_key = Failing(|| AssistError::MissingApiKey);
        assert_eq!(insights_or_fallback(&no_key, &[], &[]).await, fallback_insights());
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let stock = ayn_core::seed::seed_stock();
        let insights = insights_or_fallback(&Canned, &stock, &[]).await;
        assert_eq!(insights, vec![Insight::new("Items", "5")]);

        let lines = scan_or_empty(&Canned, b"four", "image/png").await;
        assert_eq!(lines[0].quantity, Quantity::from_units(4));
    }
}
