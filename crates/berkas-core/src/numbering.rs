//! # Sequence Numbering
//!
//! Generates the next human-readable document number for a collection,
//! scoped by record type and calendar year.
//!
//! ## Number Formats (bit-exact)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Purchase orders:   PO-IN-YYYY-NNN   /  PO-OUT-YYYY-NNN                │
//! │  Invoices:          INV/YYYY/NNN                                       │
//! │  Delivery orders:   SJ/YYYY/NNN                                        │
//! │                                                                         │
//! │  NNN is zero-padded to 3 digits and keeps growing past 999. The year  │
//! │  is embedded in the string, so a new year naturally restarts the      │
//! │  sequence: last year's numbers can never collide with this year's.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Algorithm
//! The running counter starts at `count(records in the same scope) + 1`,
//! then the candidate is checked against every existing number and bumped
//! until free. Deletions leave gaps the count does not see, which is why
//! the collision check exists: the count is a starting guess, never a
//! guarantee. Nothing is persisted; the counter is recomputed from the
//! live collection on every call.

use std::collections::HashSet;

use crate::types::{DeliveryOrder, Invoice, PoType, PurchaseOrder};

/// Next purchase-order number for the given direction and year.
///
/// The counter is seeded from the count of same-direction orders, but
/// the uniqueness check runs against every order's number regardless of
/// direction.
///
/// ## Example
/// ```rust
/// use berkas_core::numbering::next_po_number;
/// use berkas_core::types::PoType;
///
/// assert_eq!(next_po_number(&[], PoType::Incoming, 2026), "PO-IN-2026-001");
/// ```
pub fn next_po_number(existing: &[PurchaseOrder], direction: PoType, year: i32) -> String {
    let prefix = match direction {
        PoType::Incoming => "IN",
        PoType::Outgoing => "OUT",
    };
    let start = existing.iter().filter(|p| p.po_type == direction).count() + 1;
    let taken: HashSet<&str> = existing.iter().map(|p| p.po_number.as_str()).collect();

    next_free(start, &taken, |n| format!("PO-{prefix}-{year}-{n:03}"))
}

/// Next invoice number for the given year, counted over the whole
/// collection.
pub fn next_invoice_number(existing: &[Invoice], year: i32) -> String {
    let taken: HashSet<&str> = existing.iter().map(|i| i.invoice_number.as_str()).collect();
    next_free(existing.len() + 1, &taken, |n| format!("INV/{year}/{n:03}"))
}

/// Next delivery-order (surat jalan) number for the given year.
pub fn next_do_number(existing: &[DeliveryOrder], year: i32) -> String {
    let taken: HashSet<&str> = existing.iter().map(|d| d.do_number.as_str()).collect();
    next_free(existing.len() + 1, &taken, |n| format!("SJ/{year}/{n:03}"))
}

/// Bumps the counter until the formatted candidate is unused.
fn next_free(start: usize, taken: &HashSet<&str>, format: impl Fn(usize) -> String) -> String {
    let mut count = start;
    loop {
        let candidate = format(count);
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        count += 1;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn po(number: &str, direction: PoType) -> PurchaseOrder {
        PurchaseOrder {
            id: number.to_string(),
            po_number: number.to_string(),
            po_type: direction,
            ..Default::default()
        }
    }

    fn invoice(number: &str) -> Invoice {
        Invoice {
            id: number.to_string(),
            invoice_number: number.to_string(),
            ..Default::default()
        }
    }

    fn delivery(number: &str) -> DeliveryOrder {
        DeliveryOrder {
            id: number.to_string(),
            do_number: number.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_first_numbers() {
        assert_eq!(next_po_number(&[], PoType::Incoming, 2026), "PO-IN-2026-001");
        assert_eq!(next_po_number(&[], PoType::Outgoing, 2026), "PO-OUT-2026-001");
        assert_eq!(next_invoice_number(&[], 2026), "INV/2026/001");
        assert_eq!(next_do_number(&[], 2026), "SJ/2026/001");
    }

    #[test]
    fn test_counter_scoped_by_direction() {
        let existing = vec![
            po("PO-IN-2026-001", PoType::Incoming),
            po("PO-IN-2026-002", PoType::Incoming),
            po("PO-OUT-2026-001", PoType::Outgoing),
        ];
        assert_eq!(
            next_po_number(&existing, PoType::Incoming, 2026),
            "PO-IN-2026-003"
        );
        assert_eq!(
            next_po_number(&existing, PoType::Outgoing, 2026),
            "PO-OUT-2026-002"
        );
    }

    #[test]
    fn test_gaps_from_deletion_defended_by_collision_check() {
        // 001 was deleted; the count says "start at 2" but 002 is taken,
        // so the counter bumps past it.
        let existing = vec![
            po("PO-IN-2026-002", PoType::Incoming),
            po("PO-IN-2026-003", PoType::Incoming),
        ];
        assert_eq!(
            next_po_number(&existing, PoType::Incoming, 2026),
            "PO-IN-2026-004"
        );
    }

    #[test]
    fn test_sequence_is_collision_free() {
        let mut existing: Vec<Invoice> = Vec::new();
        for _ in 0..25 {
            let number = next_invoice_number(&existing, 2026);
            assert!(
                existing.iter().all(|i| i.invoice_number != number),
                "duplicate number generated: {number}"
            );
            existing.push(invoice(&number));
        }
        assert_eq!(existing.last().unwrap().invoice_number, "INV/2026/025");
    }

    #[test]
    fn test_year_change_restarts_sequence() {
        // Last year's numbers cannot collide with the new year's prefix,
        // even though the count seeds past 1.
        let existing = vec![
            po("PO-IN-2025-001", PoType::Incoming),
            po("PO-IN-2025-002", PoType::Incoming),
        ];
        assert_eq!(
            next_po_number(&existing, PoType::Incoming, 2026),
            "PO-IN-2026-003"
        );
    }

    #[test]
    fn test_do_numbers_count_whole_collection() {
        let existing = vec![delivery("SJ/2026/001"), delivery("SJ/2026/002")];
        assert_eq!(next_do_number(&existing, 2026), "SJ/2026/003");
    }

    #[test]
    fn test_padding_grows_past_three_digits() {
        let existing: Vec<Invoice> = (1..=999)
            .map(|n| invoice(&format!("INV/2026/{n:03}")))
            .collect();
        assert_eq!(next_invoice_number(&existing, 2026), "INV/2026/1000");
    }
}
