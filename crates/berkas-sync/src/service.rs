//! # Sync Service
//!
//! The save-then-mirror orchestration layer: local writes first, remote
//! mirroring as a best-effort follow-up.
//!
//! ## Operation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Save-Then-Mirror Flow                               │
//! │                                                                         │
//! │  save_invoice(draft)                                                   │
//! │       │                                                                 │
//! │       ├── 1. Assign id + number if blank                               │
//! │       ├── 2. recalculate()  (totals, payments, status)                 │
//! │       ├── 3. Local save     ← MUST succeed, else the whole op fails    │
//! │       └── 4. Remote push    ← best effort, failure becomes advisory    │
//! │                                                                         │
//! │  The record returned to the caller is the recalculated one that was   │
//! │  actually stored, never the raw input.                                 │
//! │                                                                         │
//! │  Deletes run local-first too: a record the operator removed must      │
//! │  disappear locally even when the mirror is unreachable.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Datelike, Utc};
use tracing::{info, warn};

use berkas_core::{DeliveryOrder, Invoice, PurchaseOrder, ShippingLabel};
use berkas_store::{generate_record_id, Store};

use crate::error::SyncResult;
use crate::gateway::{PushReceipt, SyncGateway};
use crate::protocol::RecordType;

// =============================================================================
// Advisories
// =============================================================================

/// What happened on the remote side of a local operation.
#[derive(Debug, Clone)]
pub enum RemoteAdvisory {
    /// No endpoint configured, mirroring skipped.
    Skipped,
    /// The mirror operation went through; see the receipt's confidence.
    Mirrored(PushReceipt),
    /// The mirror operation failed; local state is still correct.
    Failed(String),
}

impl RemoteAdvisory {
    /// True when the endpoint confirmed the write.
    pub fn is_verified(&self) -> bool {
        matches!(self, RemoteAdvisory::Mirrored(r) if r.is_verified())
    }
}

/// A completed local save plus its remote advisory.
#[derive(Debug, Clone)]
pub struct SaveOutcome<T> {
    /// The record as stored (ids assigned, totals derived).
    pub record: T,
    pub remote: RemoteAdvisory,
}

// =============================================================================
// SyncService
// =============================================================================

/// Orchestrates the store and the gateway.
///
/// ## Usage
/// ```rust,ignore
/// let service = SyncService::new(store, gateway);
///
/// let outcome = service.save_invoice(invoice).await?;
/// if !outcome.remote.is_verified() {
///     // surface the advisory, the local save already happened
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SyncService {
    store: Store,
    gateway: SyncGateway,
}

impl SyncService {
    /// Creates a service over the given store and gateway.
    pub fn new(store: Store, gateway: SyncGateway) -> Self {
        SyncService { store, gateway }
    }

    /// The underlying store handle.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The underlying gateway.
    pub fn gateway(&self) -> &SyncGateway {
        &self.gateway
    }

    // =========================================================================
    // Purchase Orders
    // =========================================================================

    /// Saves a purchase order locally and mirrors it.
    pub async fn save_purchase_order(
        &self,
        mut order: PurchaseOrder,
    ) -> SyncResult<SaveOutcome<PurchaseOrder>> {
        if order.id.is_empty() {
            order.id = generate_record_id();
        }
        if order.po_number.is_empty() {
            order.po_number = self.store.next_po_number(order.po_type).await?;
        }
        order.recalculate();

        self.store.purchase_orders().save(&order).await?;
        info!(id = %order.id, number = %order.po_number, "Purchase order saved");

        let remote = self.mirror(RecordType::PurchaseOrder, &order).await;
        Ok(SaveOutcome { record: order, remote })
    }

    /// Deletes a purchase order locally, then remotely.
    pub async fn delete_purchase_order(&self, id: &str) -> SyncResult<RemoteAdvisory> {
        self.store.purchase_orders().delete_by_id(id).await?;
        info!(id, "Purchase order deleted");

        Ok(self.mirror_delete(RecordType::PurchaseOrder, id).await)
    }

    /// Replaces the local purchase-order collection with the remote one.
    pub async fn refresh_purchase_orders(&self) -> SyncResult<Vec<PurchaseOrder>> {
        let remote: Vec<PurchaseOrder> = self.gateway.pull(RecordType::PurchaseOrder).await?;
        self.store.purchase_orders().replace_all(&remote).await?;
        Ok(remote)
    }

    /// Hands a purchase order to the remote calendar and records the
    /// hand-off on the local copy when the endpoint confirms it.
    pub async fn sync_po_to_calendar(&self, id: &str) -> SyncResult<RemoteAdvisory> {
        let orders = self.store.purchase_orders().get_all().await?;
        let Some(mut order) = orders.into_iter().find(|o| o.id == id) else {
            // Nothing to sync; stay consistent with idempotent deletes
            return Ok(RemoteAdvisory::Skipped);
        };

        let advisory = match self.gateway.push_calendar_event(&order).await {
            Ok(receipt) => RemoteAdvisory::Mirrored(receipt),
            Err(e) => {
                warn!(id, error = %e, "Calendar hand-off failed");
                RemoteAdvisory::Failed(e.to_string())
            }
        };

        if advisory.is_verified() && !order.is_synced_to_calendar {
            order.is_synced_to_calendar = true;
            self.store.purchase_orders().save(&order).await?;
        }

        Ok(advisory)
    }

    // =========================================================================
    // Invoices
    // =========================================================================

    /// Saves an invoice locally and mirrors it.
    pub async fn save_invoice(&self, mut invoice: Invoice) -> SyncResult<SaveOutcome<Invoice>> {
        if invoice.id.is_empty() {
            invoice.id = generate_record_id();
        }
        if invoice.invoice_number.is_empty() {
            invoice.invoice_number = self.store.next_invoice_number().await?;
        }
        invoice.recalculate();

        self.store.invoices().save(&invoice).await?;
        info!(id = %invoice.id, number = %invoice.invoice_number, "Invoice saved");

        let remote = self.mirror(RecordType::Invoice, &invoice).await;
        Ok(SaveOutcome {
            record: invoice,
            remote,
        })
    }

    /// Deletes an invoice locally, then remotely.
    pub async fn delete_invoice(&self, id: &str) -> SyncResult<RemoteAdvisory> {
        self.store.invoices().delete_by_id(id).await?;
        info!(id, "Invoice deleted");

        Ok(self.mirror_delete(RecordType::Invoice, id).await)
    }

    /// Replaces the local invoice collection with the remote one.
    pub async fn refresh_invoices(&self) -> SyncResult<Vec<Invoice>> {
        let remote: Vec<Invoice> = self.gateway.pull(RecordType::Invoice).await?;
        self.store.invoices().replace_all(&remote).await?;
        Ok(remote)
    }

    // =========================================================================
    // Delivery Orders
    // =========================================================================

    /// Saves a delivery order locally and mirrors it.
    pub async fn save_delivery_order(
        &self,
        mut order: DeliveryOrder,
    ) -> SyncResult<SaveOutcome<DeliveryOrder>> {
        if order.id.is_empty() {
            order.id = generate_record_id();
        }
        if order.do_number.is_empty() {
            order.do_number = self.store.next_do_number().await?;
        }

        self.store.delivery_orders().save(&order).await?;
        info!(id = %order.id, number = %order.do_number, "Delivery order saved");

        let remote = self.mirror(RecordType::DeliveryOrder, &order).await;
        Ok(SaveOutcome { record: order, remote })
    }

    /// Deletes a delivery order locally, then remotely.
    pub async fn delete_delivery_order(&self, id: &str) -> SyncResult<RemoteAdvisory> {
        self.store.delivery_orders().delete_by_id(id).await?;
        info!(id, "Delivery order deleted");

        Ok(self.mirror_delete(RecordType::DeliveryOrder, id).await)
    }

    /// Replaces the local delivery-order collection with the remote one.
    pub async fn refresh_delivery_orders(&self) -> SyncResult<Vec<DeliveryOrder>> {
        let remote: Vec<DeliveryOrder> = self.gateway.pull(RecordType::DeliveryOrder).await?;
        self.store.delivery_orders().replace_all(&remote).await?;
        Ok(remote)
    }

    // =========================================================================
    // Shipping Labels (local only)
    // =========================================================================

    /// Saves a shipping label. Labels never cross the gateway.
    pub async fn save_shipping_label(
        &self,
        mut label: ShippingLabel,
    ) -> SyncResult<ShippingLabel> {
        if label.id.is_empty() {
            label.id = generate_record_id();
        }
        if label.date_created.is_empty() {
            let now = Utc::now();
            label.date_created = format!("{:04}-{:02}-{:02}", now.year(), now.month(), now.day());
        }

        self.store.shipping_labels().save(&label).await?;
        info!(id = %label.id, "Shipping label saved");
        Ok(label)
    }

    /// Deletes a shipping label.
    pub async fn delete_shipping_label(&self, id: &str) -> SyncResult<()> {
        self.store.shipping_labels().delete_by_id(id).await?;
        info!(id, "Shipping label deleted");
        Ok(())
    }

    // =========================================================================
    // Mirror Internals
    // =========================================================================

    /// Best-effort push; never propagates the failure.
    async fn mirror<T: serde::Serialize>(
        &self,
        record_type: RecordType,
        record: &T,
    ) -> RemoteAdvisory {
        if !self.gateway.is_configured() {
            return RemoteAdvisory::Skipped;
        }

        match self.gateway.push(record_type, record).await {
            Ok(receipt) => RemoteAdvisory::Mirrored(receipt),
            Err(e) => {
                warn!(record_type = %record_type, error = %e, "Mirror push failed");
                RemoteAdvisory::Failed(e.to_string())
            }
        }
    }

    /// Best-effort remote delete; never propagates the failure.
    async fn mirror_delete(&self, record_type: RecordType, id: &str) -> RemoteAdvisory {
        if !self.gateway.is_configured() {
            return RemoteAdvisory::Skipped;
        }

        match self.gateway.delete(record_type, id).await {
            Ok(receipt) => RemoteAdvisory::Mirrored(receipt),
            Err(e) => {
                warn!(record_type = %record_type, id, error = %e, "Mirror delete failed");
                RemoteAdvisory::Failed(e.to_string())
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
