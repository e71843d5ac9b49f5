//! Repository for the `patients` table.

use carewatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::Patient;

const PATIENT_COLUMNS: &str = "\
    id, name, device_id, age, medical_notes, caregiver_id, \
    family_contact_name, family_contact_relationship, family_contact_email, \
    created_at, updated_at";

/// Read operations for patient records.
pub struct PatientRepo;

impl PatientRepo {
    /// Find the patient registered for a wearable device.
    ///
    /// Uses the secondary index on `device_id`. A device is assigned to at
    /// most one patient; if data drift ever produces duplicates, the oldest
    /// registration wins.
    pub async fn find_by_device_id(
        pool: &PgPool,
        device_id: &str,
    ) -> Result<Option<Patient>, sqlx::Error> {
        let query = format!(
            "SELECT {PATIENT_COLUMNS} FROM patients WHERE device_id = $1 ORDER BY id LIMIT 1"
        );
        sqlx::query_as::<_, Patient>(&query)
            .bind(device_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a patient by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Patient>, sqlx::Error> {
        let query = format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = $1");
        sqlx::query_as::<_, Patient>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
