//! Change-stream batch intake endpoint.
//!
//! The record store pushes each batch of change records here. The
//! response is always the fixed `{"status":"processed"}` body: per-event
//! faults are absorbed by the dispatcher and surfaced as structured
//! logs, never as an HTTP error.

use axum::extract::State;
use axum::{routing::post, Json, Router};
use serde::Serialize;

use carewatch_alerts::StreamBatch;

use crate::state::AppState;

/// Fixed response body for every processed batch.
#[derive(Debug, Serialize)]
pub struct ProcessedResponse {
    pub status: &'static str,
}

/// Accept a change-stream batch and dispatch alerts for it.
async fn ingest_batch(
    State(state): State<AppState>,
    Json(batch): Json<StreamBatch>,
) -> Json<ProcessedResponse> {
    let summary = state.dispatcher.dispatch_batch(&batch).await;

    tracing::info!(
        records = summary.records,
        inserts = summary.inserts,
        skipped = summary.skipped,
        unresolved = summary.unresolved,
        no_recipients = summary.no_recipients,
        delivered = summary.delivered,
        partial = summary.partial,
        "Processed change-stream batch"
    );

    Json(ProcessedResponse {
        status: "processed",
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/stream/records", post(ingest_batch))
}
