//! Heart-rate reading model and clinical classification.
//!
//! [`classify`] is the single source of truth for triaging a reading
//! against the fixed clinical thresholds. It is total and pure so the
//! alerting pipeline can call it on anything the intake adapter produces,
//! including readings whose heart-rate field never arrived.

use serde::{Deserialize, Serialize};

/// First heart-rate value (BPM) considered normal.
pub const LOW_BPM_THRESHOLD: i64 = 50;

/// First heart-rate value (BPM) considered elevated.
pub const HIGH_BPM_THRESHOLD: i64 = 90;

/// Normal-range label rendered into notification bodies.
pub const NORMAL_RANGE_LABEL: &str = "50-89 BPM";

/// Sentinel used when a string field is missing from a stream record.
pub const UNKNOWN_FIELD: &str = "Unknown";

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// A single vital-sign reading extracted from a change-stream insert.
///
/// Ephemeral: constructed per event by the intake adapter and dropped once
/// the event has been dispatched. `observed_at` stays a string because
/// malformed records degrade it to [`UNKNOWN_FIELD`] rather than failing
/// extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    /// Identifier of the wearable that produced the reading.
    pub device_id: String,
    /// Heart rate in beats per minute; `None` when the field was missing
    /// or unparsable.
    pub heart_rate_bpm: Option<i64>,
    /// Device-reported observation timestamp, verbatim.
    pub observed_at: String,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Triage outcome of a single heart-rate reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HeartRateClass {
    /// Within the normal range (50..=89 BPM).
    Normal,
    /// Below 50 BPM.
    Low,
    /// 90 BPM or above.
    High,
    /// Missing or non-positive value; never alerts.
    Unknown,
}

impl HeartRateClass {
    /// Whether this classification triggers recipient resolution and
    /// notification dispatch.
    pub fn is_abnormal(self) -> bool {
        matches!(self, HeartRateClass::Low | HeartRateClass::High)
    }
}

impl std::fmt::Display for HeartRateClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            HeartRateClass::Normal => "NORMAL",
            HeartRateClass::Low => "LOW",
            HeartRateClass::High => "HIGH",
            HeartRateClass::Unknown => "UNKNOWN",
        };
        f.write_str(label)
    }
}

/// Classify a heart-rate value against the clinical thresholds.
///
/// A missing or non-positive value is [`HeartRateClass::Unknown`]: a zero
/// reading means the sensor reported nothing usable, not bradycardia.
pub fn classify(heart_rate_bpm: Option<i64>) -> HeartRateClass {
    match heart_rate_bpm {
        None => HeartRateClass::Unknown,
        Some(bpm) if bpm <= 0 => HeartRateClass::Unknown,
        Some(bpm) if bpm < LOW_BPM_THRESHOLD => HeartRateClass::Low,
        Some(bpm) if bpm >= HIGH_BPM_THRESHOLD => HeartRateClass::High,
        Some(_) => HeartRateClass::Normal,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_value_is_unknown() {
        assert_eq!(classify(None), HeartRateClass::Unknown);
    }

    #[test]
    fn zero_is_unknown_not_low() {
        // 0 < 50, but an empty sensor reading must never alert.
        assert_eq!(classify(Some(0)), HeartRateClass::Unknown);
    }

    #[test]
    fn negative_is_unknown() {
        assert_eq!(classify(Some(-20)), HeartRateClass::Unknown);
    }

    #[test]
    fn boundaries_around_low_threshold() {
        assert_eq!(classify(Some(49)), HeartRateClass::Low);
        assert_eq!(classify(Some(50)), HeartRateClass::Normal);
    }

    #[test]
    fn boundaries_around_high_threshold() {
        assert_eq!(classify(Some(89)), HeartRateClass::Normal);
        assert_eq!(classify(Some(90)), HeartRateClass::High);
    }

    #[test]
    fn extremes_classify() {
        assert_eq!(classify(Some(1)), HeartRateClass::Low);
        assert_eq!(classify(Some(250)), HeartRateClass::High);
    }

    #[test]
    fn only_low_and_high_are_abnormal() {
        assert!(HeartRateClass::Low.is_abnormal());
        assert!(HeartRateClass::High.is_abnormal());
        assert!(!HeartRateClass::Normal.is_abnormal());
        assert!(!HeartRateClass::Unknown.is_abnormal());
    }

    #[test]
    fn display_renders_uppercase_labels() {
        assert_eq!(HeartRateClass::Low.to_string(), "LOW");
        assert_eq!(HeartRateClass::High.to_string(), "HIGH");
        assert_eq!(HeartRateClass::Normal.to_string(), "NORMAL");
        assert_eq!(HeartRateClass::Unknown.to_string(), "UNKNOWN");
    }
}
