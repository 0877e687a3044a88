//! # Generic Collection Repository
//!
//! Whole-collection read/replace plus upsert-by-id and delete-by-id for
//! the four record collections.
//!
//! ## Storage Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              collections table, one row per collection                  │
//! │                                                                         │
//! │  key              payload                                              │
//! │  ───────────────  ─────────────────────────────────────────            │
//! │  purchase-orders  {"version":1,"records":[{...},{...}]}                │
//! │  invoices         {"version":1,"records":[{...}]}                      │
//! │  delivery-orders  {"version":1,"records":[]}                           │
//! │  shipping-labels  {"version":1,"records":[]}                           │
//! │                                                                         │
//! │  Reads also accept a bare JSON array (the pre-envelope layout) so      │
//! │  an old database opens without a data migration.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency
//! Every write rewrites the collection's document in a single UPDATE, so
//! a save is visible to the very next read. There is no cache in front.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::marker::PhantomData;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::repository::StoredRecord;

// =============================================================================
// Envelope
// =============================================================================

/// Stored document shape: a version tag around the record array.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[allow(dead_code)]
    version: u32,
    records: Vec<T>,
}

/// Borrowing counterpart of [`Envelope`] for serialization.
#[derive(Debug, Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    records: &'a [T],
}

const ENVELOPE_VERSION: u32 = 1;

// =============================================================================
// CollectionRepository
// =============================================================================

/// Repository for one record collection.
///
/// ## Usage
/// ```rust,ignore
/// let repo = store.invoices();
///
/// let all = repo.get_all().await?;
/// repo.save(&invoice).await?;       // insert or update by id
/// repo.delete_by_id("123").await?;  // no-op if absent
/// ```
#[derive(Debug, Clone)]
pub struct CollectionRepository<T> {
    pool: SqlitePool,
    _record: PhantomData<T>,
}

impl<T> CollectionRepository<T>
where
    T: StoredRecord + Serialize + DeserializeOwned + Clone,
{
    /// Creates a new repository over the pool.
    pub fn new(pool: SqlitePool) -> Self {
        CollectionRepository {
            pool,
            _record: PhantomData,
        }
    }

    /// Returns every record in the collection, in stored order.
    ///
    /// First access to a collection initializes it to an empty document,
    /// so callers never see "missing collection" as an error.
    pub async fn get_all(&self) -> StoreResult<Vec<T>> {
        let payload: Option<String> =
            sqlx::query_scalar("SELECT payload FROM collections WHERE key = ?")
                .bind(T::COLLECTION_KEY)
                .fetch_optional(&self.pool)
                .await?;

        match payload {
            Some(json) => parse_records(&json),
            None => {
                debug!(collection = T::COLLECTION_KEY, "Initializing empty collection");
                self.write_records(&[]).await?;
                Ok(Vec::new())
            }
        }
    }

    /// Inserts the record, or replaces the stored record with the same id.
    pub async fn save(&self, record: &T) -> StoreResult<()> {
        let mut records = self.get_all().await?;

        match records.iter_mut().find(|r| r.record_id() == record.record_id()) {
            Some(existing) => {
                *existing = record.clone();
                debug!(
                    collection = T::COLLECTION_KEY,
                    id = record.record_id(),
                    "Updated {}",
                    T::RECORD_NAME
                );
            }
            None => {
                records.push(record.clone());
                debug!(
                    collection = T::COLLECTION_KEY,
                    id = record.record_id(),
                    "Inserted {}",
                    T::RECORD_NAME
                );
            }
        }

        self.write_records(&records).await
    }

    /// Removes the record with the given id. Succeeds silently when no
    /// such record exists (deletes are idempotent).
    pub async fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        let mut records = self.get_all().await?;
        let before = records.len();
        records.retain(|r| r.record_id() != id);

        if records.len() == before {
            debug!(
                collection = T::COLLECTION_KEY,
                id, "Delete of absent {} ignored", T::RECORD_NAME
            );
            return Ok(());
        }

        self.write_records(&records).await
    }

    /// Replaces the whole collection in one step. Used by restore and by
    /// remote refresh.
    pub async fn replace_all(&self, records: &[T]) -> StoreResult<()> {
        debug!(
            collection = T::COLLECTION_KEY,
            count = records.len(),
            "Replacing collection"
        );
        self.write_records(records).await
    }

    /// Number of records currently stored.
    pub async fn count(&self) -> StoreResult<usize> {
        Ok(self.get_all().await?.len())
    }

    /// Serializes and upserts the collection document.
    async fn write_records(&self, records: &[T]) -> StoreResult<()> {
        let envelope = EnvelopeRef {
            version: ENVELOPE_VERSION,
            records,
        };
        let payload = serde_json::to_string(&envelope)
            .map_err(|e| StoreError::Internal(e.to_string()))?;

        sqlx::query(
            "INSERT INTO collections (key, payload, updated_at)
             VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET
                 payload    = excluded.payload,
                 updated_at = excluded.updated_at",
        )
        .bind(T::COLLECTION_KEY)
        .bind(&payload)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Parses a stored payload: the versioned envelope first, then the
/// legacy bare-array layout.
fn parse_records<T>(json: &str) -> StoreResult<Vec<T>>
where
    T: StoredRecord + DeserializeOwned,
{
    if let Ok(envelope) = serde_json::from_str::<Envelope<T>>(json) {
        return Ok(envelope.records);
    }

    match serde_json::from_str::<Vec<T>>(json) {
        Ok(records) => {
            warn!(
                collection = T::COLLECTION_KEY,
                "Read legacy bare-array payload; will rewrite as envelope on next save"
            );
            Ok(records)
        }
        Err(e) => Err(StoreError::corrupt(T::COLLECTION_KEY, e)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
