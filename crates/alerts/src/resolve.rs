//! Recipient resolution for abnormal readings.
//!
//! [`Resolver`] performs the two-hop lookup: the device identifier maps to
//! a patient via the store's secondary index, and the patient's assigned
//! caregiver is fetched by primary key. The caregiver hop is non-fatal:
//! if the record is missing or the store errors, resolution continues
//! with the caregiver fields absent so the family contact can still be
//! notified.

use std::sync::Arc;

use carewatch_db::store::{RecordStore, StoreError};

/// Role label for the primary caregiver recipient.
pub const ROLE_CAREGIVER: &str = "Caregiver";

/// Fallback name and role label for a family contact with no
/// name/relationship on record.
pub const FAMILY_MEMBER_FALLBACK: &str = "Family Member";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for recipient resolution failures.
///
/// Both variants terminate the event, never the batch: the dispatcher
/// logs them and moves on.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    /// No patient is registered for the device.
    #[error("no patient registered for device {device_id}")]
    PatientNotFound { device_id: String },

    /// The record store failed while looking up the patient.
    #[error(transparent)]
    Store(#[from] StoreError),
}

// ---------------------------------------------------------------------------
// PatientContext
// ---------------------------------------------------------------------------

/// Everything the composer and dispatcher need to know about the patient
/// behind an abnormal reading.
#[derive(Debug, Clone, Default)]
pub struct PatientContext {
    pub patient_name: String,
    pub patient_age: Option<i32>,
    pub device_id: String,
    /// Resolved caregiver name; `None` when unassigned or when the
    /// caregiver lookup degraded.
    pub caregiver_name: Option<String>,
    pub caregiver_email: Option<String>,
    pub family_contact_name: Option<String>,
    pub family_contact_relationship: Option<String>,
    pub family_contact_email: Option<String>,
}

/// A person eligible to receive a notification for a patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub email: String,
    pub display_name: String,
    /// `"Caregiver"` or the family relationship label.
    pub role: String,
}

impl PatientContext {
    /// Build the recipient list for this patient: the caregiver and the
    /// designated family contact, each included only when an email
    /// address is on record. Returns at most two entries.
    pub fn recipients(&self) -> Vec<Recipient> {
        let mut recipients = Vec::new();

        if let Some(email) = self.caregiver_email.as_deref().filter(|e| !e.is_empty()) {
            recipients.push(Recipient {
                email: email.to_string(),
                display_name: self
                    .caregiver_name
                    .clone()
                    .unwrap_or_else(|| ROLE_CAREGIVER.to_string()),
                role: ROLE_CAREGIVER.to_string(),
            });
        }

        if let Some(email) = self
            .family_contact_email
            .as_deref()
            .filter(|e| !e.is_empty())
        {
            recipients.push(Recipient {
                email: email.to_string(),
                display_name: self
                    .family_contact_name
                    .clone()
                    .unwrap_or_else(|| FAMILY_MEMBER_FALLBACK.to_string()),
                role: self
                    .family_contact_relationship
                    .clone()
                    .unwrap_or_else(|| FAMILY_MEMBER_FALLBACK.to_string()),
            });
        }

        recipients
    }
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Resolves the people responsible for a monitored device.
pub struct Resolver {
    store: Arc<dyn RecordStore>,
}

impl Resolver {
    /// Create a resolver over the given record store.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Resolve the patient and caregiver context for a device.
    ///
    /// Step one (device → patient) is required; step two (patient →
    /// caregiver) degrades to absent caregiver fields on any failure.
    pub async fn resolve(&self, device_id: &str) -> Result<PatientContext, ResolutionError> {
        let patient = self
            .store
            .patient_by_device_id(device_id)
            .await?
            .ok_or_else(|| ResolutionError::PatientNotFound {
                device_id: device_id.to_string(),
            })?;

        tracing::debug!(patient = %patient.name, device_id, "Resolved patient for device");

        let (caregiver_name, caregiver_email) = match patient.caregiver_id {
            Some(caregiver_id) => match self.store.caregiver_by_id(caregiver_id).await {
                Ok(Some(caregiver)) => (Some(caregiver.name), Some(caregiver.email)),
                Ok(None) => {
                    tracing::warn!(
                        caregiver_id,
                        patient = %patient.name,
                        "Assigned caregiver record missing, continuing without caregiver"
                    );
                    (None, None)
                }
                Err(e) => {
                    tracing::warn!(
                        caregiver_id,
                        error = %e,
                        "Caregiver lookup failed, continuing without caregiver"
                    );
                    (None, None)
                }
            },
            None => (None, None),
        };

        Ok(PatientContext {
            patient_name: patient.name,
            patient_age: patient.age,
            device_id: patient.device_id,
            caregiver_name,
            caregiver_email,
            family_contact_name: patient.family_contact_name,
            family_contact_relationship: patient.family_contact_relationship,
            family_contact_email: patient.family_contact_email,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
