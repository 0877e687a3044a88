//! # Settings Repository
//!
//! The settings singleton: one `AppSettings` object under the fixed key
//! `settings`, stored as a bare JSON object (no record envelope).
//!
//! First read seeds the defaults, so the rest of the system can always
//! assume settings exist.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use berkas_core::AppSettings;

use crate::error::{StoreError, StoreResult};

const SETTINGS_KEY: &str = "settings";

/// Repository for the settings singleton.
///
/// ## Usage
/// ```rust,ignore
/// let settings = store.settings().get().await?; // defaults on first run
/// store.settings().save(&settings).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Returns the stored settings, seeding the defaults on first access.
    pub async fn get(&self) -> StoreResult<AppSettings> {
        let payload: Option<String> =
            sqlx::query_scalar("SELECT payload FROM collections WHERE key = ?")
                .bind(SETTINGS_KEY)
                .fetch_optional(&self.pool)
                .await?;

        match payload {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| StoreError::corrupt(SETTINGS_KEY, e)),
            None => {
                debug!("No settings stored yet, seeding defaults");
                let defaults = AppSettings::default();
                self.save(&defaults).await?;
                Ok(defaults)
            }
        }
    }

    /// Replaces the stored settings.
    pub async fn save(&self, settings: &AppSettings) -> StoreResult<()> {
        let payload = serde_json::to_string(settings)
            .map_err(|e| StoreError::Internal(e.to_string()))?;

        sqlx::query(
            "INSERT INTO collections (key, payload, updated_at)
             VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET
                 payload    = excluded.payload,
                 updated_at = excluded.updated_at",
        )
        .bind(SETTINGS_KEY)
        .bind(&payload)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        debug!("Settings saved");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
