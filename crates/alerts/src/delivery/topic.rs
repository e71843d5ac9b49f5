//! Critical-alert topic channel.
//!
//! Secondary delivery path alongside mail: every abnormal reading is
//! published once as a JSON summary to the platform's critical-alerts
//! endpoint, where downstream consumers (dashboards, escalation bots)
//! pick it up. The channel is optional; when `CRITICAL_TOPIC_URL` is
//! unset the dispatcher runs mail-only. Publishing is a single attempt
//! with a request timeout; failures are observability signals, never
//! event failures.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use carewatch_core::vitals::HeartRateClass;

/// HTTP request timeout for a single publish attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for topic publish failures.
#[derive(Debug, thiserror::Error)]
pub enum TopicError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The topic endpoint returned a non-2xx status code.
    #[error("Topic endpoint returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// CriticalAlert
// ---------------------------------------------------------------------------

/// JSON summary published to the critical-alerts topic.
#[derive(Debug, Clone, Serialize)]
pub struct CriticalAlert {
    pub patient_name: String,
    pub device_id: String,
    pub heart_rate_bpm: i64,
    pub classification: HeartRateClass,
    pub observed_at: String,
}

/// Publishes critical-alert summaries to the platform topic.
#[async_trait]
pub trait CriticalTopic: Send + Sync {
    /// Publish one alert summary.
    async fn publish(&self, alert: &CriticalAlert) -> Result<(), TopicError>;
}

// ---------------------------------------------------------------------------
// HttpTopicPublisher
// ---------------------------------------------------------------------------

/// [`CriticalTopic`] implementation that POSTs to a fixed URL.
pub struct HttpTopicPublisher {
    client: reqwest::Client,
    url: String,
}

impl HttpTopicPublisher {
    /// Create a publisher for the given endpoint URL.
    pub fn new(url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            url: url.into(),
        }
    }

    /// Build a publisher from the `CRITICAL_TOPIC_URL` environment
    /// variable. Returns `None` when the channel is not configured.
    pub fn from_env() -> Option<Self> {
        std::env::var("CRITICAL_TOPIC_URL").ok().map(Self::new)
    }
}

#[async_trait]
impl CriticalTopic for HttpTopicPublisher {
    async fn publish(&self, alert: &CriticalAlert) -> Result<(), TopicError> {
        let response = self.client.post(&self.url).json(alert).send().await?;
        if !response.status().is_success() {
            return Err(TopicError::HttpStatus(response.status().as_u16()));
        }

        tracing::info!(
            device_id = %alert.device_id,
            classification = %alert.classification,
            "Critical alert published to topic"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
