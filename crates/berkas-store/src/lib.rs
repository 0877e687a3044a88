//! # berkas-store: Local Collection Storage for Berkas
//!
//! This crate owns local persistence for the Berkas back office. The
//! four record collections plus the settings singleton live as JSON
//! documents in a SQLite key-value table, accessed through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Berkas Data Flow                                │
//! │                                                                         │
//! │  Caller (sync service, forms, reports)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    berkas-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │     Store     │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (records.rs)  │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ Collection<T> │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │    │ Settings      │    │              │  │   │
//! │  │   │ Management    │    │ Backup        │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (collections table, one row per collection)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Store handle, connection pool and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Store error types
//! - [`repository`] - Generic collection CRUD plus the settings singleton
//! - [`backup`] - Export / restore / reset
//! - [`inventory`] - In/out stock reconciliation over the order history
//!
//! ## Usage
//!
//! ```rust,ignore
//! use berkas_store::{Store, StoreConfig};
//!
//! let store = Store::new(StoreConfig::new("path/to/berkas.db")).await?;
//!
//! let invoices = store.invoices().get_all().await?;
//! store.invoices().save(&invoice).await?;
//! let number = store.next_invoice_number().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backup;
pub mod error;
pub mod inventory;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use backup::{BackupFile, BackupManager};
pub use error::{StoreError, StoreResult};
pub use inventory::InventoryLine;
pub use pool::{Store, StoreConfig};

// Repository re-exports for convenience
pub use repository::records::CollectionRepository;
pub use repository::settings::SettingsRepository;
pub use repository::{generate_record_id, StoredRecord};
