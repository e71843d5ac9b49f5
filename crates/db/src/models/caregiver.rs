//! Caregiver entity model.

use carewatch_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full caregiver row from the `caregivers` table.
#[derive(Debug, Clone, FromRow)]
pub struct Caregiver {
    pub id: DbId,
    /// Login name used by the caregiver dashboard.
    pub username: String,
    pub name: String,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
