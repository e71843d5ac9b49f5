//! Heart-rate alert evaluation and fan-out dispatch.
//!
//! This crate is the decision core of the CareWatch alerting service:
//!
//! - [`stream`] — change-stream wire types and the intake adapter that
//!   turns insert records into [`Reading`](carewatch_core::vitals::Reading)s.
//! - [`resolve`] — two-hop recipient resolution (device → patient →
//!   caregiver) over the record store.
//! - [`compose`] — deterministic rendering of the recipient-facing
//!   notification (plain text + HTML).
//! - [`delivery`] — outbound channels: SMTP mail and the optional
//!   critical-alert topic.
//! - [`dispatch`] — the per-event state machine and the never-failing
//!   batch loop.

pub mod compose;
pub mod delivery;
pub mod dispatch;
pub mod resolve;
pub mod stream;

pub use compose::{compose, AlertEmail};
pub use delivery::email::{MailError, MailTransport, MailerConfig, SmtpMailer};
pub use delivery::topic::{CriticalAlert, CriticalTopic, HttpTopicPublisher, TopicError};
pub use dispatch::{BatchSummary, Dispatcher, EventOutcome};
pub use resolve::{PatientContext, Recipient, ResolutionError, Resolver};
pub use stream::{readings, AttributeValue, StreamBatch, StreamRecord};
