//! # Backup, Restore and Reset
//!
//! Whole-database export/import as a single portable JSON file, plus the
//! full local reset.
//!
//! ## Backup File Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  {                                                                      │
//! │    "pos":            [...],   ← optional                                │
//! │    "invoices":       [...],   ← optional                                │
//! │    "deliveryOrders": [...],   ← optional                                │
//! │    "shippingLabels": [...],   ← optional                                │
//! │    "settings":       {...},   ← optional                                │
//! │    "timestamp":      "2026-08-26T08:00:00Z"                            │
//! │  }                                                                      │
//! │                                                                         │
//! │  Restore is parse-first: the whole file must deserialize before any    │
//! │  collection is touched. A present key overwrites that collection       │
//! │  wholesale; an absent key leaves it untouched (partial backups are     │
//! │  valid).                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{info, warn};

use berkas_core::{AppSettings, DeliveryOrder, Invoice, PurchaseOrder, ShippingLabel};

use crate::error::{StoreError, StoreResult};
use crate::repository::{CollectionRepository, SettingsRepository};

// =============================================================================
// Backup File
// =============================================================================

/// Portable backup document. Every collection is optional so partial
/// backups restore cleanly.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<Vec<PurchaseOrder>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoices: Option<Vec<Invoice>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_orders: Option<Vec<DeliveryOrder>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_labels: Option<Vec<ShippingLabel>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<AppSettings>,

    /// When the backup was taken.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

// =============================================================================
// BackupManager
// =============================================================================

/// Export / restore / reset operations over the whole store.
#[derive(Debug, Clone)]
pub struct BackupManager {
    pool: SqlitePool,
}

impl BackupManager {
    /// Creates a new BackupManager.
    pub fn new(pool: SqlitePool) -> Self {
        BackupManager { pool }
    }

    fn pos(&self) -> CollectionRepository<PurchaseOrder> {
        CollectionRepository::new(self.pool.clone())
    }

    fn invoices(&self) -> CollectionRepository<Invoice> {
        CollectionRepository::new(self.pool.clone())
    }

    fn delivery_orders(&self) -> CollectionRepository<DeliveryOrder> {
        CollectionRepository::new(self.pool.clone())
    }

    fn shipping_labels(&self) -> CollectionRepository<ShippingLabel> {
        CollectionRepository::new(self.pool.clone())
    }

    fn settings(&self) -> SettingsRepository {
        SettingsRepository::new(self.pool.clone())
    }

    /// Exports every collection plus settings as one JSON string.
    pub async fn export(&self) -> StoreResult<String> {
        let backup = BackupFile {
            pos: Some(self.pos().get_all().await?),
            invoices: Some(self.invoices().get_all().await?),
            delivery_orders: Some(self.delivery_orders().get_all().await?),
            shipping_labels: Some(self.shipping_labels().get_all().await?),
            settings: Some(self.settings().get().await?),
            timestamp: Some(Utc::now()),
        };

        info!("Exported full backup");

        serde_json::to_string_pretty(&backup)
            .map_err(|e| StoreError::Internal(e.to_string()))
    }

    /// Restores collections from a backup JSON string.
    ///
    /// ## All-or-Nothing Parse
    /// The file is fully deserialized before any write. A file that
    /// fails to parse leaves every collection exactly as it was.
    ///
    /// ## Partial Backups
    /// Only the collections present in the file are overwritten.
    pub async fn restore(&self, json: &str) -> StoreResult<()> {
        let backup: BackupFile = serde_json::from_str(json).map_err(|e| {
            warn!(error = %e, "Backup file rejected");
            StoreError::RestoreRejected(e.to_string())
        })?;

        if let Some(pos) = &backup.pos {
            self.pos().replace_all(pos).await?;
        }
        if let Some(invoices) = &backup.invoices {
            self.invoices().replace_all(invoices).await?;
        }
        if let Some(dos) = &backup.delivery_orders {
            self.delivery_orders().replace_all(dos).await?;
        }
        if let Some(labels) = &backup.shipping_labels {
            self.shipping_labels().replace_all(labels).await?;
        }
        if let Some(settings) = &backup.settings {
            self.settings().save(settings).await?;
        }

        info!(
            pos = backup.pos.as_ref().map(Vec::len),
            invoices = backup.invoices.as_ref().map(Vec::len),
            delivery_orders = backup.delivery_orders.as_ref().map(Vec::len),
            shipping_labels = backup.shipping_labels.as_ref().map(Vec::len),
            settings = backup.settings.is_some(),
            "Restore applied"
        );

        Ok(())
    }

    /// Deletes every stored collection, settings included. The next read
    /// of any collection re-initializes it empty (settings re-seed their
    /// defaults).
    pub async fn reset(&self) -> StoreResult<()> {
        warn!("Resetting local store, all collections cleared");

        sqlx::query("DELETE FROM collections")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Store, StoreConfig};

    async fn test_store() -> Store {
        Store::new(StoreConfig::in_memory()).await.unwrap()
    }

    fn invoice(id: &str) -> Invoice {
        Invoice {
            id: id.to_string(),
            customer_name: "Toko Sari".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_export_restore_round_trip() {
        let store = test_store().await;
        store.invoices().save(&invoice("100")).await.unwrap();

        let json = store.backup().export().await.unwrap();

        // Wipe, then restore
        store.backup().reset().await.unwrap();
        assert_eq!(store.invoices().count().await.unwrap(), 0);

        store.backup().restore(&json).await.unwrap();
        let all = store.invoices().get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, "100");
    }

    #[tokio::test]
    async fn test_partial_restore_leaves_other_collections() {
        let store = test_store().await;
        store.invoices().save(&invoice("100")).await.unwrap();

        let po = PurchaseOrder {
            id: "200".to_string(),
            ..Default::default()
        };
        store.purchase_orders().save(&po).await.unwrap();

        // Backup containing only purchase orders
        let partial = r#"{"pos": []}"#;
        store.backup().restore(partial).await.unwrap();

        assert_eq!(store.purchase_orders().count().await.unwrap(), 0);
        assert_eq!(store.invoices().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unparseable_backup_mutates_nothing() {
        let store = test_store().await;
        store.invoices().save(&invoice("100")).await.unwrap();

        let err = store.backup().restore("{broken").await.unwrap_err();
        assert!(matches!(err, StoreError::RestoreRejected(_)));

        assert_eq!(store.invoices().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_reset_reseeds_settings_defaults() {
        let store = test_store().await;

        let mut settings = store.settings().get().await.unwrap();
        settings.default_bank_name = "Mandiri".to_string();
        store.settings().save(&settings).await.unwrap();

        store.backup().reset().await.unwrap();

        let fresh = store.settings().get().await.unwrap();
        assert_eq!(fresh, AppSettings::default());
    }
}
