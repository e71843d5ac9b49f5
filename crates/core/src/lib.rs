//! Shared domain types and pure clinical logic for the CareWatch platform.
//!
//! This crate has no I/O: it defines the vital-sign reading model, the
//! heart-rate classification rules, and the well-known constants the rest
//! of the workspace builds on.

pub mod channels;
pub mod types;
pub mod vitals;
