//! Patient entity model.

use carewatch_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full patient row from the `patients` table.
///
/// The family-contact fields are denormalized onto the patient row: one
/// designated contact per patient, no further lookup required to reach
/// them.
#[derive(Debug, Clone, FromRow)]
pub struct Patient {
    pub id: DbId,
    pub name: String,
    /// Identifier of the wearable assigned to this patient.
    pub device_id: String,
    pub age: Option<i32>,
    pub medical_notes: Option<String>,
    /// Primary caregiver responsible for this patient, if assigned.
    pub caregiver_id: Option<DbId>,
    pub family_contact_name: Option<String>,
    /// Relationship label shown as the contact's role (e.g. `"Son"`).
    pub family_contact_relationship: Option<String>,
    pub family_contact_email: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
