use std::sync::Arc;

use carewatch_alerts::Dispatcher;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable; the dispatcher is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The alert dispatcher with its injected store and delivery
    /// channels.
    pub dispatcher: Arc<Dispatcher>,
}
