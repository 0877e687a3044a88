//! # berkas-core: Pure Business Rules for Berkas
//!
//! This crate is the **heart** of Berkas. It contains the document
//! lifecycle and derived-state rules shared by purchase orders, invoices
//! and delivery orders, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Berkas Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Forms / Document Views (out of scope)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ berkas-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  finance  │  │  status   │  │   │
//! │  │   │  records  │  │  i64 Rp   │  │ derivation│  │ resolver  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                      ┌───────────┐                              │   │
//! │  │                      │ numbering │                              │   │
//! │  │                      └───────────┘                              │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               berkas-store / berkas-sync                        │   │
//! │  │        local collections, backup, remote mirroring              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Record types (PurchaseOrder, Invoice, DeliveryOrder, ...)
//! - [`money`] - Whole-unit integer money (no floating point!)
//! - [`finance`] - Subtotal / grand total / paid / remaining derivation
//! - [`status`] - Invoice status resolver and record defaults
//! - [`numbering`] - Year-scoped human-readable sequence numbers
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output, always
//! 2. **No I/O**: database, network and file system access are FORBIDDEN here
//! 3. **Integer Money**: all amounts are whole-unit i64, never floats
//! 4. **Garbage in, garbage out**: this layer derives, it does not validate
//!
//! ## Example Usage
//!
//! ```rust
//! use berkas_core::money::Money;
//! use berkas_core::types::{Invoice, InvoiceStatus, LineItem, PaymentDetail};
//!
//! let mut invoice = Invoice {
//!     items: vec![LineItem {
//!         quantity: 2,
//!         unit_price: Money::from_units(50_000),
//!         ..Default::default()
//!     }],
//!     payment_details: vec![PaymentDetail {
//!         amount: Money::from_units(100_000),
//!         date: "2026-08-01".into(),
//!     }],
//!     ..Default::default()
//! };
//!
//! invoice.recalculate();
//! assert_eq!(invoice.grand_total.units(), 100_000);
//! assert_eq!(invoice.status, InvoiceStatus::Paid);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod finance;
pub mod money;
pub mod numbering;
pub mod status;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use berkas_core::Money` instead of
// `use berkas_core::money::Money`

pub use finance::InvoiceTotals;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum payment slots carried by an invoice.
///
/// The payment panel is a fixed four-slot grid; only slots with a
/// positive amount count as used and only those are persisted.
pub const MAX_PAYMENT_SLOTS: usize = 4;
