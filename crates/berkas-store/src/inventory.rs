//! # Inventory Reconciliation
//!
//! In/out stock summary derived from the purchase-order history.
//!
//! Incoming orders add to stock, outgoing orders take from it; cancelled
//! orders count for nothing. Lines are matched case-insensitively on
//! name plus specification, so "Keripik Singkong / 250g" accumulates
//! into one row regardless of how the operator typed it.

use std::collections::BTreeMap;

use serde::Serialize;

use berkas_core::{PoStatus, PoType, PurchaseOrder};

/// One reconciled item line across the whole order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLine {
    /// Item name as first seen.
    pub name: String,
    /// Item specification as first seen.
    pub specification: String,
    /// Units received via incoming orders.
    pub total_in: i64,
    /// Units shipped via outgoing orders.
    pub total_out: i64,
    /// total_in - total_out. Negative means more shipped than received.
    pub remaining: i64,
}

/// Summarizes stock movement across all purchase orders.
///
/// ## Rules
/// - Cancelled orders are skipped entirely
/// - Matching key: lowercased, trimmed `name | specification`
/// - Output is sorted by the matching key, so it is stable across runs
pub fn summarize(orders: &[PurchaseOrder]) -> Vec<InventoryLine> {
    let mut lines: BTreeMap<String, InventoryLine> = BTreeMap::new();

    for order in orders {
        if order.status == PoStatus::Cancelled {
            continue;
        }

        for item in &order.items {
            let key = format!(
                "{}|{}",
                item.name.trim().to_lowercase(),
                item.specification.trim().to_lowercase()
            );

            let line = lines.entry(key).or_insert_with(|| InventoryLine {
                name: item.name.trim().to_string(),
                specification: item.specification.trim().to_string(),
                total_in: 0,
                total_out: 0,
                remaining: 0,
            });

            match order.po_type {
                PoType::Incoming => line.total_in += item.quantity,
                PoType::Outgoing => line.total_out += item.quantity,
            }
        }
    }

    lines
        .into_values()
        .map(|mut line| {
            line.remaining = line.total_in - line.total_out;
            line
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use berkas_core::LineItem;

    fn order(po_type: PoType, status: PoStatus, items: Vec<(&str, &str, i64)>) -> PurchaseOrder {
        PurchaseOrder {
            po_type,
            status,
            items: items
                .into_iter()
                .map(|(name, spec, qty)| LineItem {
                    name: name.to_string(),
                    specification: spec.to_string(),
                    quantity: qty,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_in_and_out_reconcile() {
        let orders = vec![
            order(
                PoType::Incoming,
                PoStatus::Approved,
                vec![("Keripik Singkong", "250g", 100)],
            ),
            order(
                PoType::Outgoing,
                PoStatus::Completed,
                vec![("Keripik Singkong", "250g", 30)],
            ),
        ];

        let summary = summarize(&orders);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].total_in, 100);
        assert_eq!(summary[0].total_out, 30);
        assert_eq!(summary[0].remaining, 70);
    }

    #[test]
    fn test_cancelled_orders_are_skipped() {
        let orders = vec![
            order(
                PoType::Incoming,
                PoStatus::Cancelled,
                vec![("Keripik Pisang", "500g", 999)],
            ),
            order(
                PoType::Incoming,
                PoStatus::Approved,
                vec![("Keripik Pisang", "500g", 10)],
            ),
        ];

        let summary = summarize(&orders);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].total_in, 10);
    }

    #[test]
    fn test_matching_ignores_case_and_whitespace() {
        let orders = vec![
            order(
                PoType::Incoming,
                PoStatus::Approved,
                vec![("Keripik Singkong", "250g", 50)],
            ),
            order(
                PoType::Incoming,
                PoStatus::Approved,
                vec![("  keripik singkong ", " 250G", 25)],
            ),
        ];

        let summary = summarize(&orders);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].total_in, 75);
        // First-seen casing wins for display
        assert_eq!(summary[0].name, "Keripik Singkong");
    }

    #[test]
    fn test_oversold_goes_negative() {
        let orders = vec![order(
            PoType::Outgoing,
            PoStatus::Completed,
            vec![("Keripik Talas", "100g", 40)],
        )];

        let summary = summarize(&orders);
        assert_eq!(summary[0].remaining, -40);
    }

    #[test]
    fn test_distinct_specifications_stay_separate() {
        let orders = vec![order(
            PoType::Incoming,
            PoStatus::Approved,
            vec![("Keripik Singkong", "250g", 10), ("Keripik Singkong", "500g", 20)],
        )];

        let summary = summarize(&orders);
        assert_eq!(summary.len(), 2);
    }
}
