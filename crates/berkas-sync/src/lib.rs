//! # berkas-sync: Remote Mirroring for Berkas
//!
//! This crate mirrors the local collections to the hosted sheet endpoint
//! and pulls them back. The local store is always authoritative; remote
//! failures degrade to advisories and never block local work.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Berkas Sync Flow                                 │
//! │                                                                         │
//! │  Caller (forms, refresh button)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   berkas-sync (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  SyncService  │    │  SyncGateway  │    │ GatewayConfig│  │   │
//! │  │   │ (service.rs)  │───►│ (gateway.rs)  │◄───│ (config.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ save + mirror │    │ push / delete │    │ gateway.toml │  │   │
//! │  │   │ local first   │    │ pull + retry  │    │              │  │   │
//! │  │   └───────┬───────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │           │                    │                               │   │
//! │  └───────────┼────────────────────┼───────────────────────────────┘   │
//! │              ▼                    ▼                                    │
//! │        berkas-store        hosted sheet endpoint                       │
//! │        (authoritative)     (best-effort mirror)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`service`] - Save-then-mirror orchestration over store + gateway
//! - [`gateway`] - HTTP client for the endpoint (push, delete, pull)
//! - [`protocol`] - Wire envelopes and the shared response shape
//! - [`config`] - Endpoint URL, timeouts, retry policy
//! - [`error`] - Sync error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use berkas_sync::{GatewayConfig, SyncGateway, SyncService};
//!
//! let config = GatewayConfig::load_or_default(None);
//! let gateway = SyncGateway::new(config)?;
//! let service = SyncService::new(store, gateway);
//!
//! let outcome = service.save_invoice(invoice).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod gateway;
pub mod protocol;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::GatewayConfig;
pub use error::{SyncError, SyncResult};
pub use gateway::{Confidence, PushReceipt, SyncGateway};
pub use protocol::RecordType;
pub use service::{RemoteAdvisory, SaveOutcome, SyncService};
