//! Outbound delivery channels for heart-rate alerts.
//!
//! Email (SMTP) is the primary channel; the critical-alert topic is an
//! optional secondary channel wired in when configured.

pub mod email;
pub mod topic;
