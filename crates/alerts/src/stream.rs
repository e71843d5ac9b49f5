//! Change-stream wire types and the reading intake adapter.
//!
//! The record store emits a batch of change records whenever rows are
//! written. Each record carries an event-type tag and, for inserts, a
//! "new image": the inserted row as a map from field name to a typed
//! scalar wrapper ([`AttributeValue`]). [`readings`] filters that batch
//! down to the insert records and extracts one
//! [`Reading`](carewatch_core::vitals::Reading) from each, degrading
//! missing or malformed fields to sentinels instead of failing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use carewatch_core::vitals::{Reading, UNKNOWN_FIELD};

/// Event-type tag for newly inserted rows.
pub const EVENT_INSERT: &str = "INSERT";

/// New-image field holding the wearable identifier.
const FIELD_DEVICE_ID: &str = "deviceId";

/// New-image field holding the heart-rate value.
const FIELD_HEART_RATE: &str = "heartRate";

/// New-image field holding the observation timestamp.
const FIELD_TIMESTAMP: &str = "timestamp";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// A typed scalar as encoded in a change record's new image.
///
/// Exactly one slot is expected to be populated: `N` carries a
/// string-encoded number, `S` a plain string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    #[serde(rename = "N", default, skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    #[serde(rename = "S", default, skip_serializing_if = "Option::is_none")]
    pub s: Option<String>,
}

impl AttributeValue {
    /// A number-typed value.
    pub fn number(value: impl ToString) -> Self {
        Self {
            n: Some(value.to_string()),
            s: None,
        }
    }

    /// A string-typed value.
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            n: None,
            s: Some(value.into()),
        }
    }

    /// The string slot, if this is a string-typed value.
    pub fn as_str(&self) -> Option<&str> {
        self.s.as_deref()
    }

    /// Parse the number slot. `None` for string-typed values and for
    /// numbers that do not parse as integers.
    pub fn as_i64(&self) -> Option<i64> {
        self.n.as_ref().and_then(|n| n.parse().ok())
    }
}

/// A single change record within a stream batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamRecord {
    /// Event-type tag: `"INSERT"`, `"MODIFY"`, or `"REMOVE"`.
    #[serde(rename = "eventName")]
    pub event_name: String,

    /// The inserted row, present for insert events.
    #[serde(rename = "newImage", default)]
    pub new_image: HashMap<String, AttributeValue>,
}

/// An ordered batch of change records delivered to the handler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamBatch {
    #[serde(rename = "records", default)]
    pub records: Vec<StreamRecord>,
}

// ---------------------------------------------------------------------------
// Intake adapter
// ---------------------------------------------------------------------------

/// Lazily yield one reading per insert record in the batch.
///
/// Non-insert records are filtered out. String fields degrade to
/// `"Unknown"` when missing; a missing or unparsable heart rate becomes
/// `None`, never zero.
pub fn readings(batch: &StreamBatch) -> impl Iterator<Item = Reading> + '_ {
    batch
        .records
        .iter()
        .filter(|record| record.event_name == EVENT_INSERT)
        .map(|record| extract_reading(&record.new_image))
}

/// Extract a reading from an insert record's new image.
fn extract_reading(new_image: &HashMap<String, AttributeValue>) -> Reading {
    let string_field = |name: &str| {
        new_image
            .get(name)
            .and_then(AttributeValue::as_str)
            .unwrap_or(UNKNOWN_FIELD)
            .to_string()
    };

    Reading {
        device_id: string_field(FIELD_DEVICE_ID),
        heart_rate_bpm: new_image.get(FIELD_HEART_RATE).and_then(AttributeValue::as_i64),
        observed_at: string_field(FIELD_TIMESTAMP),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
