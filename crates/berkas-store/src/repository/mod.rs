//! # Repository Module
//!
//! Collection repositories for the Berkas store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Collection Repository Pattern                        │
//! │                                                                         │
//! │  All four record collections share one storage shape: a JSON document  │
//! │  under a fixed key. One generic repository serves them all.            │
//! │                                                                         │
//! │  Caller                                                                │
//! │       │                                                                 │
//! │       │  store.invoices().save(&invoice)                               │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  CollectionRepository<Invoice>                                         │
//! │  ├── get_all(&self)                                                    │
//! │  ├── save(&self, record)        (upsert by id)                         │
//! │  ├── delete_by_id(&self, id)                                           │
//! │  └── replace_all(&self, records)                                       │
//! │       │                                                                 │
//! │       │  read / rewrite the whole document                             │
//! │       ▼                                                                 │
//! │  collections table (key → payload)                                     │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • One upsert path for every record type                               │
//! │  • A save is visible to the very next read                             │
//! │  • SQL is isolated in one place                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CollectionRepository`] - Generic whole-collection CRUD
//! - [`SettingsRepository`] - The settings singleton

pub mod records;
pub mod settings;

pub use records::CollectionRepository;
pub use settings::SettingsRepository;

use berkas_core::{DeliveryOrder, Invoice, PurchaseOrder, ShippingLabel};
use chrono::Utc;

// =============================================================================
// StoredRecord
// =============================================================================

/// A record type that lives in one of the named collections.
///
/// Implemented for the four record types; the generic repository uses the
/// key to find the document and the id to upsert/delete within it.
pub trait StoredRecord {
    /// Fixed key of the collection document in the `collections` table.
    const COLLECTION_KEY: &'static str;

    /// Human name used in log lines and error messages.
    const RECORD_NAME: &'static str;

    /// The record's unique id within its collection.
    fn record_id(&self) -> &str;
}

impl StoredRecord for PurchaseOrder {
    const COLLECTION_KEY: &'static str = "purchase-orders";
    const RECORD_NAME: &'static str = "purchase order";

    fn record_id(&self) -> &str {
        &self.id
    }
}

impl StoredRecord for Invoice {
    const COLLECTION_KEY: &'static str = "invoices";
    const RECORD_NAME: &'static str = "invoice";

    fn record_id(&self) -> &str {
        &self.id
    }
}

impl StoredRecord for DeliveryOrder {
    const COLLECTION_KEY: &'static str = "delivery-orders";
    const RECORD_NAME: &'static str = "delivery order";

    fn record_id(&self) -> &str {
        &self.id
    }
}

impl StoredRecord for ShippingLabel {
    const COLLECTION_KEY: &'static str = "shipping-labels";
    const RECORD_NAME: &'static str = "shipping label";

    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Generates a fresh record id.
///
/// Ids are millisecond timestamps rendered as decimal strings. Record
/// creation is operator-paced (one form at a time), so collisions don't
/// happen in practice, and the ids sort by creation time for free.
pub fn generate_record_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_keys() {
        assert_eq!(PurchaseOrder::COLLECTION_KEY, "purchase-orders");
        assert_eq!(Invoice::COLLECTION_KEY, "invoices");
        assert_eq!(DeliveryOrder::COLLECTION_KEY, "delivery-orders");
        assert_eq!(ShippingLabel::COLLECTION_KEY, "shipping-labels");
    }

    #[test]
    fn test_generated_ids_are_numeric() {
        let id = generate_record_id();
        assert!(id.parse::<i64>().is_ok());
    }
}
