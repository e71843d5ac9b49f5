//! Route handlers for the intake server.

pub mod health;
pub mod stream;

use axum::Router;

use crate::state::AppState;

/// All `/api/v1` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(stream::router())
}
