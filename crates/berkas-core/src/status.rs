//! # Status Resolution
//!
//! Derives an invoice's lifecycle status from its financial state, and
//! provides the initial defaults for the manually-driven record types.
//!
//! ## Decision Table (invoices, at save time)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Evaluated in precedence order with freshly derived totals:            │
//! │                                                                         │
//! │  1. remaining <= 0 AND grandTotal > 0   →  Paid                        │
//! │  2. totalPaid > 0 AND remaining > 0     →  Partial                     │
//! │  3. totalPaid == 0                      →  Unpaid                      │
//! │                                                                         │
//! │  Rule 3 is what reverts a Paid/Partial invoice back to Unpaid when    │
//! │  every payment slot is cleared.                                        │
//! │                                                                         │
//! │  EXCEPTION: Draft and Overdue are explicit user choices. The          │
//! │  resolver preserves them verbatim and never recomputes them.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Purchase orders and delivery orders never pass through a resolver:
//! their status is always the user's explicit selection, and the only
//! automatic behavior is the default offered when creating a new record.

use crate::finance::InvoiceTotals;
use crate::types::{DeliveryStatus, InvoiceStatus, PoStatus, PoType};

/// Resolves an invoice's status from its derived totals.
///
/// `selected` is the status carried on the form at save time. A selected
/// Draft or Overdue wins unconditionally; everything else is derived
/// from the payment state by the decision table above.
///
/// ## Example
/// ```rust
/// use berkas_core::finance::InvoiceTotals;
/// use berkas_core::money::Money;
/// use berkas_core::status::resolve_invoice_status;
/// use berkas_core::types::InvoiceStatus;
///
/// let totals = InvoiceTotals {
///     sub_total: Money::from_units(100),
///     grand_total: Money::from_units(100),
///     total_paid: Money::from_units(100),
///     remaining_balance: Money::zero(),
/// };
/// let status = resolve_invoice_status(InvoiceStatus::Unpaid, &totals);
/// assert_eq!(status, InvoiceStatus::Paid);
/// ```
pub fn resolve_invoice_status(selected: InvoiceStatus, totals: &InvoiceTotals) -> InvoiceStatus {
    // Explicit overrides are preserved as entered
    if matches!(selected, InvoiceStatus::Draft | InvoiceStatus::Overdue) {
        return selected;
    }

    if !totals.remaining_balance.is_positive() && totals.grand_total.is_positive() {
        InvoiceStatus::Paid
    } else if totals.total_paid.is_positive() && totals.remaining_balance.is_positive() {
        InvoiceStatus::Partial
    } else if totals.total_paid.is_zero() {
        InvoiceStatus::Unpaid
    } else {
        selected
    }
}

/// Initial status offered when creating a new purchase order.
///
/// Incoming orders arrive already agreed with the supplier, so they
/// start Approved; outgoing orders are recorded after the fact and
/// start Completed. Either can be switched on the form before save.
pub fn default_po_status(direction: PoType) -> PoStatus {
    match direction {
        PoType::Incoming => PoStatus::Approved,
        PoType::Outgoing => PoStatus::Completed,
    }
}

/// Initial status for a new delivery order.
pub fn default_delivery_status() -> DeliveryStatus {
    DeliveryStatus::Preparing
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn totals(grand: i64, paid: i64) -> InvoiceTotals {
        InvoiceTotals {
            sub_total: Money::from_units(grand),
            grand_total: Money::from_units(grand),
            total_paid: Money::from_units(paid),
            remaining_balance: Money::from_units(grand - paid),
        }
    }

    #[test]
    fn test_decision_table_precedence() {
        // grandTotal = 100 throughout
        assert_eq!(
            resolve_invoice_status(InvoiceStatus::Unpaid, &totals(100, 100)),
            InvoiceStatus::Paid
        );
        assert_eq!(
            resolve_invoice_status(InvoiceStatus::Unpaid, &totals(100, 40)),
            InvoiceStatus::Partial
        );
        assert_eq!(
            resolve_invoice_status(InvoiceStatus::Unpaid, &totals(100, 0)),
            InvoiceStatus::Unpaid
        );
    }

    #[test]
    fn test_cleared_payments_revert_paid_to_unpaid() {
        assert_eq!(
            resolve_invoice_status(InvoiceStatus::Paid, &totals(100, 0)),
            InvoiceStatus::Unpaid
        );
        assert_eq!(
            resolve_invoice_status(InvoiceStatus::Partial, &totals(100, 0)),
            InvoiceStatus::Unpaid
        );
    }

    #[test]
    fn test_overpayment_is_paid() {
        assert_eq!(
            resolve_invoice_status(InvoiceStatus::Partial, &totals(100, 150)),
            InvoiceStatus::Paid
        );
    }

    #[test]
    fn test_zero_grand_total_never_becomes_paid() {
        // An empty invoice with no payments stays Unpaid: rule 1 requires
        // a positive grand total.
        assert_eq!(
            resolve_invoice_status(InvoiceStatus::Unpaid, &totals(0, 0)),
            InvoiceStatus::Unpaid
        );
    }

    #[test]
    fn test_draft_and_overdue_are_preserved() {
        assert_eq!(
            resolve_invoice_status(InvoiceStatus::Draft, &totals(100, 100)),
            InvoiceStatus::Draft
        );
        assert_eq!(
            resolve_invoice_status(InvoiceStatus::Overdue, &totals(100, 40)),
            InvoiceStatus::Overdue
        );
    }

    #[test]
    fn test_po_defaults_by_direction() {
        assert_eq!(default_po_status(PoType::Incoming), PoStatus::Approved);
        assert_eq!(default_po_status(PoType::Outgoing), PoStatus::Completed);
        assert_eq!(default_delivery_status(), DeliveryStatus::Preparing);
    }
}
