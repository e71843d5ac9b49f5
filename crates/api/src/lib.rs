//! CareWatch alerting service library.
//!
//! Exposes the config, state, router, and route handlers so integration
//! tests and the binary entrypoint can both access them.

pub mod config;
pub mod router;
pub mod routes;
pub mod state;
