//! Well-known alert delivery channel name constants.
//!
//! These identify the delivery paths the dispatcher can fan an alert out
//! to, and appear as the `channel` field in structured delivery logs.

/// Email notification delivered via SMTP to caregivers and family contacts.
pub const CHANNEL_EMAIL: &str = "email";

/// Critical-alert summary published to the platform topic endpoint.
pub const CHANNEL_CRITICAL_TOPIC: &str = "critical_topic";
