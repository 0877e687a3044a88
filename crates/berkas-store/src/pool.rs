//! # Database Pool Management
//!
//! Connection pool creation and configuration for SQLite, plus the main
//! `Store` handle the rest of the system goes through.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Store Startup                                    │
//! │                                                                         │
//! │  StoreConfig::new(path) ← configure pool settings                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store::new(config).await ← create pool + run migrations               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool                    │                           │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐               │  (max_connections)        │
//! │  │  │Conn1│ │Conn2│ │Conn3│ ...           │                           │
//! │  │  └─────┘ └─────┘ └─────┘               │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.invoices().get_all() / .save(..) / .replace_all(..)             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled so readers never
//! block the writer and crash recovery is cheap.

use chrono::{Datelike, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use berkas_core::numbering;
use berkas_core::{DeliveryOrder, Invoice, PoType, PurchaseOrder, ShippingLabel};

use crate::backup::BackupManager;
use crate::error::{StoreError, StoreResult};
use crate::inventory::{self, InventoryLine};
use crate::migrations;
use crate::repository::{CollectionRepository, SettingsRepository};

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("./data/berkas.db").max_connections(5);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5 (plenty for a single-operator back office)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl StoreConfig {
    /// Creates a new store configuration with the given path.
    /// The database file is created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory store configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let store = Store::new(StoreConfig::in_memory()).await?;
    /// // Isolated state, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        StoreConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// Main store handle providing access to every collection.
///
/// Cheap to clone (wraps a pooled connection), safe to hand to the sync
/// service and any outer surface. Collections are accessed through typed
/// repositories:
///
/// ```rust,ignore
/// let pos = store.purchase_orders().get_all().await?;
/// store.invoices().save(&invoice).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Creates a new store over a SQLite connection pool.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite: WAL journal, NORMAL synchronous, foreign keys
    /// 3. Creates the connection pool
    /// 4. Runs migrations (if enabled)
    pub async fn new(config: StoreConfig) -> StoreResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing store"
        );

        // sqlite://path?mode=rwc creates the file if not exists
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Store pool created"
        );

        let store = Store { pool };

        if config.run_migrations {
            store.run_migrations().await?;
        }

        Ok(store)
    }

    /// Runs database migrations. Idempotent; automatically called by
    /// `new()` unless disabled in the config.
    pub async fn run_migrations(&self) -> StoreResult<()> {
        info!("Running store migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns a reference to the connection pool, for queries not
    /// covered by the repositories. Prefer the repositories.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // =========================================================================
    // Collection Accessors
    // =========================================================================

    /// Purchase-order collection.
    pub fn purchase_orders(&self) -> CollectionRepository<PurchaseOrder> {
        CollectionRepository::new(self.pool.clone())
    }

    /// Invoice collection.
    pub fn invoices(&self) -> CollectionRepository<Invoice> {
        CollectionRepository::new(self.pool.clone())
    }

    /// Delivery-order (surat jalan) collection.
    pub fn delivery_orders(&self) -> CollectionRepository<DeliveryOrder> {
        CollectionRepository::new(self.pool.clone())
    }

    /// Shipping-label collection.
    pub fn shipping_labels(&self) -> CollectionRepository<ShippingLabel> {
        CollectionRepository::new(self.pool.clone())
    }

    /// The settings singleton.
    pub fn settings(&self) -> SettingsRepository {
        SettingsRepository::new(self.pool.clone())
    }

    /// Backup, restore and full-reset operations.
    pub fn backup(&self) -> BackupManager {
        BackupManager::new(self.pool.clone())
    }

    // =========================================================================
    // Numbering Conveniences
    // =========================================================================
    // The numbering rules live in berkas-core as pure functions; these
    // wrappers load the live collection and supply the current UTC year.

    /// Next purchase-order number for the given direction.
    pub async fn next_po_number(&self, direction: PoType) -> StoreResult<String> {
        let pos = self.purchase_orders().get_all().await?;
        Ok(numbering::next_po_number(&pos, direction, Utc::now().year()))
    }

    /// Next invoice number.
    pub async fn next_invoice_number(&self) -> StoreResult<String> {
        let invoices = self.invoices().get_all().await?;
        Ok(numbering::next_invoice_number(&invoices, Utc::now().year()))
    }

    /// Next delivery-order number.
    pub async fn next_do_number(&self) -> StoreResult<String> {
        let dos = self.delivery_orders().get_all().await?;
        Ok(numbering::next_do_number(&dos, Utc::now().year()))
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// In/out stock reconciliation across the whole order history.
    pub async fn inventory_summary(&self) -> StoreResult<Vec<InventoryLine>> {
        let pos = self.purchase_orders().get_all().await?;
        Ok(inventory::summarize(&pos))
    }

    /// Closes the connection pool. Call on shutdown; all repository
    /// operations fail afterwards.
    pub async fn close(&self) {
        info!("Closing store pool");
        self.pool.close().await;
    }

    /// Checks if the store can execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        assert!(store.health_check().await);
    }

    #[tokio::test]
    async fn test_config_builder() {
        let config = StoreConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
    }

    #[tokio::test]
    async fn test_first_numbers_on_empty_store() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        let year = Utc::now().year();

        let po_number = store.next_po_number(PoType::Incoming).await.unwrap();
        assert_eq!(po_number, format!("PO-IN-{year}-001"));

        let invoice_number = store.next_invoice_number().await.unwrap();
        assert_eq!(invoice_number, format!("INV/{year}/001"));

        let do_number = store.next_do_number().await.unwrap();
        assert_eq!(do_number, format!("SJ/{year}/001"));
    }
}
