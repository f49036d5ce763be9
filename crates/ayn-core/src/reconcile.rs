//! # Invoice Reconciliation
//!
//! Matches lines read off a supplier invoice to existing stock items by
//! name, then adds the delivered quantities.
//!
//! ## Matching Rule
//! ```text
//! stock "Leche Entera"  vs  invoice "leche"           → match (invoice ⊂ stock)
//! stock "Huevos"        vs  invoice "Huevos camperos" → match (stock ⊂ invoice)
//! stock *               vs  invoice "Queso Manchego"  → NewProduct
//! ```
//! Comparison is case-insensitive substring containment in either
//! direction. The first stock item (in list order) that matches wins, so a
//! short invoice name like "pan" can land on an unexpected item.
//!
//! New products are reported but never created automatically.

use serde::Serialize;
use tracing::{debug, info};

use crate::inventory::{Inventory, StockAdjustment};
use crate::types::{ScannedLine, StockItem};

/// How one invoice line relates to current stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MatchStatus {
    #[serde(rename_all = "camelCase")]
    Existing { stock_id: String, stock_name: String },
    NewProduct,
    /// The line had no usable name.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledLine {
    pub line: ScannedLine,
    pub status: MatchStatus,
}

/// First stock item whose name contains, or is contained in, `candidate`.
///
/// Both names are trimmed and lowercased, so padding the extractor leaves
/// around a name does not block a match. Blank names on either side never
/// match; an empty string would otherwise be contained in everything.
pub fn find_match<'a>(stock: &'a [StockItem], candidate: &str) -> Option<&'a StockItem> {
    let candidate = candidate.trim().to_lowercase();
    if candidate.is_empty() {
        return None;
    }

    stock.iter().find(|item| {
        let name = item.name.trim().to_lowercase();
        !name.is_empty() && (name.contains(&candidate) || candidate.contains(&name))
    })
}

/// Labels every scanned line against current stock.
pub fn reconcile(stock: &[StockItem], candidates: Vec<ScannedLine>) -> Vec<ReconciledLine> {
    candidates
        .into_iter()
        .map(|line| {
            let status = if line.name.trim().is_empty() {
                MatchStatus::Skipped
            } else {
                match find_match(stock, &line.name) {
                    Some(item) => MatchStatus::Existing {
                        stock_id: item.id.clone(),
                        stock_name: item.name.clone(),
                    },
                    None => MatchStatus::NewProduct,
                }
            };
            debug!(candidate = %line.name, status = ?status, "Invoice line reconciled");
            ReconciledLine { line, status }
        })
        .collect()
}

/// Adds each matched line's quantity to its stock item.
///
/// Only `Existing` lines move stock. Returns one adjustment per applied line.
pub fn apply_reconciliation(inventory: &mut Inventory, lines: &[ReconciledLine]) -> Vec<StockAdjustment> {
    let adjustments: Vec<StockAdjustment> = lines
        .iter()
        .filter_map(|l| match &l.status {
            MatchStatus::Existing { stock_id, .. } => Some(inventory.adjust_stock(stock_id, l.line.quantity)),
            MatchStatus::NewProduct | MatchStatus::Skipped => None,
        })
        .collect();

    let new_products = lines
        .iter()
        .filter(|l| l.status == MatchStatus::NewProduct)
        .count();
    info!(
        applied = adjustments.len(),
        new_products,
        "Invoice reconciliation applied"
    );

    adjustments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::Quantity;
    use crate::seed::seed_inventory;

    fn line(name: &str, qty: i64) -> ScannedLine {
        ScannedLine {
            name: name.to_string(),
            quantity: Quantity::from_units(qty),
            price_cents: 0,
        }
    }

    #[test]
    fn test_find_match_both_directions() {
        let inv = seed_inventory();
        assert_eq!(find_match(inv.stock(), "leche").unwrap().id, "4");
        assert_eq!(find_match(inv.stock(), "LECHE ENTERA 1L").unwrap().id, "4");
        assert_eq!(find_match(inv.stock(), "Huevos camperos").unwrap().id, "2");
        assert!(find_match(inv.stock(), "Queso Manchego").is_none());
        assert!(find_match(inv.stock(), "   ").is_none());
    }

    #[test]
    fn test_find_match_ignores_padding() {
        let inv = seed_inventory();
        assert_eq!(find_match(inv.stock(), " leche ").unwrap().id, "4");
        assert_eq!(find_match(inv.stock(), "\tTocino\n").unwrap().id, "5");
    }

    #[test]
    fn test_first_match_wins() {
        let inv = seed_inventory();
        // Huevos and Pan Sourdough both contain "o"; Huevos comes first.
        assert_eq!(find_match(inv.stock(), "o").unwrap().id, "2");
    }

    #[test]
    fn test_reconcile_labels_lines() {
        let inv = seed_inventory();
        let lines = reconcile(
            inv.stock(),
            vec![line("leche", 12), line("Queso Manchego", 2), line("", 4)],
        );

        assert_eq!(
            lines[0].status,
            MatchStatus::Existing {
                stock_id: "4".to_string(),
                stock_name: "Leche Entera".to_string(),
            }
        );
        assert_eq!(lines[1].status, MatchStatus::NewProduct);
        assert_eq!(lines[2].status, MatchStatus::Skipped);
    }

    #[test]
    fn test_apply_only_touches_existing() {
        let mut inv = seed_inventory();
        let lines = reconcile(
            inv.stock(),
            vec![line("leche", 12), line("Queso Manchego", 2), line("", 4)],
        );

        let adjustments = apply_reconciliation(&mut inv, &lines);

        assert_eq!(adjustments.len(), 1);
        assert_eq!(inv.find_stock("4").unwrap().units, Quantity::from_units(27));
        assert_eq!(inv.stock().len(), 5);
    }
}
