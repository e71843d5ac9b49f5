//! Per-event alert dispatch and the never-failing batch loop.
//!
//! [`Dispatcher`] drives one reading through classify → resolve →
//! compose → deliver. Every fault is absorbed at the event (or recipient)
//! boundary and surfaced as an [`EventOutcome`] plus structured logs; the
//! batch loop always runs to completion and reports a [`BatchSummary`].

use std::sync::Arc;

use serde::Serialize;

use carewatch_core::channels::{CHANNEL_CRITICAL_TOPIC, CHANNEL_EMAIL};
use carewatch_core::vitals::{classify, HeartRateClass, Reading};

use crate::compose::compose;
use crate::delivery::email::MailTransport;
use crate::delivery::topic::{CriticalAlert, CriticalTopic};
use crate::resolve::{ResolutionError, Resolver};
use crate::stream::{readings, StreamBatch};

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Terminal state of dispatching a single reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// Reading was normal or unclassifiable; nothing dispatched.
    Skipped,
    /// No patient could be resolved for the reading's device.
    Unresolved,
    /// Patient resolved but no recipient has an email address on record.
    NoRecipients,
    /// Every resolved recipient received a notification.
    Delivered { recipients: usize },
    /// At least one recipient delivery failed; the rest were still
    /// attempted.
    Partial { delivered: usize, failed: usize },
}

/// Aggregated counters for one processed batch.
///
/// The batch handler reports success regardless of these numbers; they
/// exist for logs and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Total change records in the batch, inserts or not.
    pub records: usize,
    /// Insert records that reached the dispatcher as readings.
    pub inserts: usize,
    /// Readings classified normal or unknown.
    pub skipped: usize,
    /// Abnormal readings with no resolvable patient.
    pub unresolved: usize,
    /// Abnormal readings whose patient has no notifiable contact.
    pub no_recipients: usize,
    /// Events where every recipient was notified.
    pub delivered: usize,
    /// Events where at least one recipient delivery failed.
    pub partial: usize,
}

impl BatchSummary {
    fn tally(&mut self, outcome: &EventOutcome) {
        self.inserts += 1;
        match outcome {
            EventOutcome::Skipped => self.skipped += 1,
            EventOutcome::Unresolved => self.unresolved += 1,
            EventOutcome::NoRecipients => self.no_recipients += 1,
            EventOutcome::Delivered { .. } => self.delivered += 1,
            EventOutcome::Partial { .. } => self.partial += 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Orchestrates alert evaluation and fan-out for a stream of readings.
///
/// All collaborators are injected so tests can substitute fakes for the
/// record store and the delivery channels.
pub struct Dispatcher {
    resolver: Resolver,
    mailer: Arc<dyn MailTransport>,
    critical_topic: Option<Arc<dyn CriticalTopic>>,
}

impl Dispatcher {
    /// Create a dispatcher with the mail channel only.
    pub fn new(resolver: Resolver, mailer: Arc<dyn MailTransport>) -> Self {
        Self {
            resolver,
            mailer,
            critical_topic: None,
        }
    }

    /// Attach the optional critical-topic channel.
    pub fn with_critical_topic(mut self, topic: Arc<dyn CriticalTopic>) -> Self {
        self.critical_topic = Some(topic);
        self
    }

    /// Process a whole change-stream batch, in order, one event at a
    /// time. Never fails: per-event faults are logged and counted.
    pub async fn dispatch_batch(&self, batch: &StreamBatch) -> BatchSummary {
        let mut summary = BatchSummary {
            records: batch.records.len(),
            ..Default::default()
        };

        for reading in readings(batch) {
            let outcome = self.dispatch_reading(&reading).await;
            tracing::debug!(device_id = %reading.device_id, ?outcome, "Reading dispatched");
            summary.tally(&outcome);
        }

        summary
    }

    /// Drive a single reading to its terminal state.
    pub async fn dispatch_reading(&self, reading: &Reading) -> EventOutcome {
        let class = classify(reading.heart_rate_bpm);

        // Only LOW/HIGH readings carry a value and trigger dispatch.
        let bpm = match (class, reading.heart_rate_bpm) {
            (HeartRateClass::Low | HeartRateClass::High, Some(bpm)) => bpm,
            _ => {
                tracing::debug!(
                    device_id = %reading.device_id,
                    heart_rate = ?reading.heart_rate_bpm,
                    "Heart rate not abnormal, skipping"
                );
                return EventOutcome::Skipped;
            }
        };

        tracing::warn!(
            device_id = %reading.device_id,
            heart_rate = bpm,
            classification = %class,
            "Abnormal heart rate detected"
        );

        let ctx = match self.resolver.resolve(&reading.device_id).await {
            Ok(ctx) => ctx,
            Err(ResolutionError::PatientNotFound { device_id }) => {
                tracing::warn!(device_id = %device_id, "No patient registered for device");
                return EventOutcome::Unresolved;
            }
            Err(ResolutionError::Store(e)) => {
                tracing::error!(device_id = %reading.device_id, error = %e, "Patient lookup failed");
                return EventOutcome::Unresolved;
            }
        };

        self.publish_critical(&ctx.patient_name, &ctx.device_id, class, bpm, reading)
            .await;

        let recipients = ctx.recipients();
        if recipients.is_empty() {
            tracing::warn!(
                patient = %ctx.patient_name,
                "No notifiable contacts configured for patient"
            );
            return EventOutcome::NoRecipients;
        }

        let mut failed = 0;
        for recipient in &recipients {
            let email = compose(&ctx, class, bpm, &reading.observed_at, recipient);

            match self.mailer.deliver(&recipient.email, &email).await {
                Ok(()) => {
                    tracing::info!(
                        channel = CHANNEL_EMAIL,
                        to = %recipient.email,
                        role = %recipient.role,
                        patient = %ctx.patient_name,
                        "Alert delivered"
                    );
                }
                Err(e) => {
                    // One failed recipient must not block the others.
                    failed += 1;
                    tracing::error!(
                        channel = CHANNEL_EMAIL,
                        to = %recipient.email,
                        role = %recipient.role,
                        error = %e,
                        "Alert delivery failed"
                    );
                }
            }
        }

        if failed > 0 {
            EventOutcome::Partial {
                delivered: recipients.len() - failed,
                failed,
            }
        } else {
            EventOutcome::Delivered {
                recipients: recipients.len(),
            }
        }
    }

    /// Publish the event to the critical-alerts topic when configured.
    ///
    /// Once per event, not per recipient; failures are logged and do not
    /// affect the event outcome.
    async fn publish_critical(
        &self,
        patient_name: &str,
        device_id: &str,
        class: HeartRateClass,
        bpm: i64,
        reading: &Reading,
    ) {
        let Some(topic) = &self.critical_topic else {
            return;
        };

        let alert = CriticalAlert {
            patient_name: patient_name.to_string(),
            device_id: device_id.to_string(),
            heart_rate_bpm: bpm,
            classification: class,
            observed_at: reading.observed_at.clone(),
        };

        if let Err(e) = topic.publish(&alert).await {
            tracing::error!(
                channel = CHANNEL_CRITICAL_TOPIC,
                device_id = %device_id,
                error = %e,
                "Critical topic publish failed"
            );
        }
    }
}
