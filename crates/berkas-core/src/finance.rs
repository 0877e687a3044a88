//! # Financial Derivation
//!
//! Pure functions computing every derived monetary field from line items
//! and payment slots. Deterministic, no side effects, no validation.
//!
//! ## Derivation Chain
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Derived Financial Fields                            │
//! │                                                                         │
//! │  item.totalPrice = quantity * unitPrice        (per line, every edit)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subTotal = Σ item.totalPrice                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  grandTotal = subTotal - discount + tax        (absolute amounts)      │
//! │       │                                                                 │
//! │       ▼  (invoices only)                                               │
//! │  totalPaid = Σ payment.amount (amount > 0)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  remainingBalance = grandTotal - totalPaid     (negative = overpaid)   │
//! │                                                                         │
//! │  FAILURE POLICY: none. Negative or zero quantities and prices are      │
//! │  accepted and the arithmetic result propagates as-is.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::money::Money;
use crate::status::resolve_invoice_status;
use crate::types::{Invoice, LineItem, PaymentDetail, PurchaseOrder};
use crate::MAX_PAYMENT_SLOTS;

// =============================================================================
// Pure Derivation Functions
// =============================================================================

/// Line total for a quantity at a unit price.
#[inline]
pub fn line_total(quantity: i64, unit_price: Money) -> Money {
    unit_price.multiply_quantity(quantity)
}

/// Sum of the stored line totals.
///
/// Callers that just edited quantities or prices should run
/// [`LineItem::recalculate`] on each row first; stored totals are never
/// trusted across an edit.
pub fn sub_total(items: &[LineItem]) -> Money {
    items.iter().map(|item| item.total_price).sum()
}

/// `subTotal - discount + tax`, with discount and tax as absolute amounts.
#[inline]
pub fn grand_total(sub_total: Money, discount: Money, tax: Money) -> Money {
    sub_total - discount + tax
}

/// Paid-to-date: the sum of payment slots with a positive amount.
/// Zeroed or negative slots are unused and do not count.
pub fn total_paid(payments: &[PaymentDetail]) -> Money {
    payments
        .iter()
        .filter(|p| p.amount.is_positive())
        .map(|p| p.amount)
        .sum()
}

/// The full set of derived invoice figures, computed in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceTotals {
    pub sub_total: Money,
    pub grand_total: Money,
    pub total_paid: Money,
    pub remaining_balance: Money,
}

/// Computes subtotal, grand total, paid-to-date and remaining balance
/// from items, absolute discount/tax and the payment slots.
pub fn invoice_totals(
    items: &[LineItem],
    discount: Money,
    tax: Money,
    payments: &[PaymentDetail],
) -> InvoiceTotals {
    let sub = sub_total(items);
    let grand = grand_total(sub, discount, tax);
    let paid = total_paid(payments);
    InvoiceTotals {
        sub_total: sub,
        grand_total: grand,
        total_paid: paid,
        remaining_balance: grand - paid,
    }
}

// =============================================================================
// Save-Time Recalculation
// =============================================================================

impl LineItem {
    /// Recomputes the derived `total_price` from quantity and unit price.
    /// Idempotent; run after any quantity or price edit.
    pub fn recalculate(&mut self) {
        self.total_price = line_total(self.quantity, self.unit_price);
    }
}

impl PurchaseOrder {
    /// Recomputes every derived financial field in place.
    ///
    /// Invariant afterwards: `grand_total = sub_total - discount + tax`
    /// with `sub_total = Σ items[].total_price`.
    pub fn recalculate(&mut self) {
        for item in &mut self.items {
            item.recalculate();
        }
        self.sub_total = sub_total(&self.items);
        self.grand_total = grand_total(self.sub_total, self.discount, self.tax);
    }
}

impl Invoice {
    /// Recomputes every derived field and resolves status in place.
    ///
    /// This is the save-time pass: line totals, subtotal, grand total,
    /// then the payment slots are pruned to the used (positive-amount)
    /// entries capped at [`MAX_PAYMENT_SLOTS`], paid-to-date and the
    /// remaining balance are derived, and the status resolver runs with
    /// the fresh figures.
    pub fn recalculate(&mut self) {
        for item in &mut self.items {
            item.recalculate();
        }

        // Only used slots persist
        self.payment_details.retain(|p| p.amount.is_positive());
        self.payment_details.truncate(MAX_PAYMENT_SLOTS);

        let totals = invoice_totals(&self.items, self.discount, self.tax, &self.payment_details);
        self.sub_total = totals.sub_total;
        self.grand_total = totals.grand_total;
        self.total_paid = totals.total_paid;
        self.remaining_balance = totals.remaining_balance;
        self.status = resolve_invoice_status(self.status, &totals);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InvoiceStatus;

    fn item(quantity: i64, unit_price: i64) -> LineItem {
        let mut item = LineItem {
            id: "1".into(),
            name: "Keripik Singkong".into(),
            specification: "250g".into(),
            quantity,
            unit: "Pcs".into(),
            unit_price: Money::from_units(unit_price),
            total_price: Money::zero(),
        };
        item.recalculate();
        item
    }

    fn payment(amount: i64) -> PaymentDetail {
        PaymentDetail {
            amount: Money::from_units(amount),
            date: "2026-08-01".into(),
        }
    }

    #[test]
    fn test_line_total_recomputed_idempotently() {
        let mut row = item(3, 25_000);
        assert_eq!(row.total_price.units(), 75_000);

        // A stale stored total is overwritten, not trusted
        row.total_price = Money::from_units(1);
        row.recalculate();
        assert_eq!(row.total_price.units(), 75_000);

        row.quantity = 4;
        row.recalculate();
        assert_eq!(row.total_price.units(), 100_000);
    }

    #[test]
    fn test_garbage_in_garbage_out() {
        // Negative quantity is not rejected; the arithmetic propagates
        let row = item(-2, 10_000);
        assert_eq!(row.total_price.units(), -20_000);
        assert_eq!(sub_total(&[row]).units(), -20_000);
    }

    #[test]
    fn test_grand_total_formula() {
        let items = vec![item(2, 50_000), item(1, 30_000)];
        let sub = sub_total(&items);
        assert_eq!(sub.units(), 130_000);

        let grand = grand_total(sub, Money::from_units(10_000), Money::from_units(14_300));
        assert_eq!(grand.units(), 134_300);
    }

    #[test]
    fn test_total_paid_counts_positive_slots_only() {
        let payments = vec![payment(40_000), payment(0), payment(-5_000), payment(10_000)];
        assert_eq!(total_paid(&payments).units(), 50_000);
    }

    #[test]
    fn test_invoice_scenario_from_zero_to_paid() {
        // New invoice: 2 x 50.000, no discount, no tax
        let mut invoice = Invoice {
            items: vec![item(2, 50_000)],
            status: InvoiceStatus::Unpaid,
            ..Default::default()
        };
        invoice.recalculate();
        assert_eq!(invoice.sub_total.units(), 100_000);
        assert_eq!(invoice.grand_total.units(), 100_000);
        assert_eq!(invoice.total_paid.units(), 0);
        assert_eq!(invoice.remaining_balance.units(), 100_000);
        assert_eq!(invoice.status, InvoiceStatus::Unpaid);

        // Full payment arrives
        invoice.payment_details.push(payment(100_000));
        invoice.recalculate();
        assert_eq!(invoice.total_paid.units(), 100_000);
        assert_eq!(invoice.remaining_balance.units(), 0);
        assert_eq!(invoice.status, InvoiceStatus::Paid);
    }

    #[test]
    fn test_recalculate_prunes_and_caps_payment_slots() {
        let mut invoice = Invoice {
            items: vec![item(1, 500_000)],
            payment_details: vec![
                payment(0),
                payment(100_000),
                payment(100_000),
                payment(0),
                payment(100_000),
                payment(100_000),
                payment(100_000),
            ],
            ..Default::default()
        };
        invoice.recalculate();

        // Zero slots dropped, then capped at the four-slot limit
        assert_eq!(invoice.payment_details.len(), MAX_PAYMENT_SLOTS);
        assert_eq!(invoice.total_paid.units(), 400_000);
        assert_eq!(invoice.remaining_balance.units(), 100_000);
        assert_eq!(invoice.status, InvoiceStatus::Partial);
    }

    #[test]
    fn test_overpayment_allowed() {
        let mut invoice = Invoice {
            items: vec![item(1, 80_000)],
            payment_details: vec![payment(100_000)],
            ..Default::default()
        };
        invoice.recalculate();
        assert_eq!(invoice.remaining_balance.units(), -20_000);
        assert_eq!(invoice.status, InvoiceStatus::Paid);
    }

    #[test]
    fn test_po_recalculate() {
        let mut po = PurchaseOrder {
            items: vec![item(10, 12_500)],
            discount: Money::from_units(5_000),
            tax: Money::from_units(13_750),
            ..Default::default()
        };
        // Poison the stored derived fields; recalculate must fix them
        po.sub_total = Money::from_units(1);
        po.grand_total = Money::from_units(1);

        po.recalculate();
        assert_eq!(po.sub_total.units(), 125_000);
        assert_eq!(po.grand_total.units(), 133_750);
    }

    #[test]
    fn test_percentage_entry_resolves_to_absolute() {
        // The form-level convenience: 10% of the subtotal becomes a
        // stored absolute discount; the percentage itself never persists.
        let items = vec![item(2, 50_000)];
        let sub = sub_total(&items);
        let discount = sub.percent_of(10.0);
        assert_eq!(discount.units(), 10_000);
        assert_eq!(grand_total(sub, discount, Money::zero()).units(), 90_000);
    }

    #[test]
    fn test_empty_items_yield_zero_totals() {
        let totals = invoice_totals(&[], Money::zero(), Money::zero(), &[]);
        assert_eq!(totals.sub_total, Money::zero());
        assert_eq!(totals.grand_total, Money::zero());
        assert_eq!(totals.remaining_balance, Money::zero());
    }
}
