//! Repository for the `caregivers` table.

use carewatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::Caregiver;

const CAREGIVER_COLUMNS: &str = "id, username, name, email, created_at, updated_at";

/// Read operations for caregiver records.
pub struct CaregiverRepo;

impl CaregiverRepo {
    /// Find a caregiver by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Caregiver>, sqlx::Error> {
        let query = format!("SELECT {CAREGIVER_COLUMNS} FROM caregivers WHERE id = $1");
        sqlx::query_as::<_, Caregiver>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
