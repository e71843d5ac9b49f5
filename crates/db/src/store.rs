//! Read-only record store seam consumed by the alerting pipeline.
//!
//! The dispatcher only ever needs two lookups: patient by device and
//! caregiver by primary key. Keeping them behind [`RecordStore`] lets
//! tests substitute an in-memory fake for the PostgreSQL-backed
//! [`PgRecordStore`].

use async_trait::async_trait;
use carewatch_core::types::DbId;

use crate::models::{Caregiver, Patient};
use crate::repositories::{CaregiverRepo, PatientRepo};
use crate::DbPool;

/// Error type for record store lookups.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying database query failed.
    #[error("record store query failed: {0}")]
    Query(#[from] sqlx::Error),
}

/// Read-only access to patient and caregiver records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Look up the patient registered for a wearable device.
    async fn patient_by_device_id(&self, device_id: &str) -> Result<Option<Patient>, StoreError>;

    /// Fetch a caregiver by primary key.
    async fn caregiver_by_id(&self, id: DbId) -> Result<Option<Caregiver>, StoreError>;
}

/// [`RecordStore`] backed by the PostgreSQL pool.
pub struct PgRecordStore {
    pool: DbPool,
}

impl PgRecordStore {
    /// Create a store over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn patient_by_device_id(&self, device_id: &str) -> Result<Option<Patient>, StoreError> {
        Ok(PatientRepo::find_by_device_id(&self.pool, device_id).await?)
    }

    async fn caregiver_by_id(&self, id: DbId) -> Result<Option<Caregiver>, StoreError> {
        Ok(CaregiverRepo::find_by_id(&self.pool, id).await?)
    }
}
