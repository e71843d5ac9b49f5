//! Router-level tests for the batch intake endpoint.
//!
//! Drives the real router with `tower::ServiceExt::oneshot` over fake
//! store and mail-transport implementations, verifying the fixed
//! response contract: the handler answers `200 {"status":"processed"}`
//! no matter how the per-event dispatch went.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;

use carewatch_alerts::{AlertEmail, Dispatcher, MailError, MailTransport, Resolver};
use carewatch_api::config::ServerConfig;
use carewatch_api::router::build_app_router;
use carewatch_api::state::AppState;
use carewatch_core::types::DbId;
use carewatch_db::models::{Caregiver, Patient};
use carewatch_db::store::{RecordStore, StoreError};

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

#[derive(Default)]
struct FakeStore {
    patients: Vec<Patient>,
    caregivers: Vec<Caregiver>,
}

#[async_trait]
impl RecordStore for FakeStore {
    async fn patient_by_device_id(&self, device_id: &str) -> Result<Option<Patient>, StoreError> {
        Ok(self
            .patients
            .iter()
            .find(|p| p.device_id == device_id)
            .cloned())
    }

    async fn caregiver_by_id(&self, id: DbId) -> Result<Option<Caregiver>, StoreError> {
        Ok(self.caregivers.iter().find(|c| c.id == id).cloned())
    }
}

#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<(String, AlertEmail)>>,
    fail_all: bool,
}

#[async_trait]
impl MailTransport for RecordingMailer {
    async fn deliver(&self, to_email: &str, email: &AlertEmail) -> Result<(), MailError> {
        if self.fail_all {
            return Err(MailError::Build("simulated delivery failure".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to_email.to_string(), email.clone()));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn seeded_store() -> FakeStore {
    let now = Utc::now();
    FakeStore {
        patients: vec![Patient {
            id: 1,
            name: "Jane Doe".to_string(),
            device_id: "DEV1".to_string(),
            age: Some(81),
            medical_notes: None,
            caregiver_id: Some(7),
            family_contact_name: Some("Sam".to_string()),
            family_contact_relationship: Some("Son".to_string()),
            family_contact_email: Some("son@example.com".to_string()),
            created_at: now,
            updated_at: now,
        }],
        caregivers: vec![Caregiver {
            id: 7,
            username: "ann".to_string(),
            name: "Nurse Ann".to_string(),
            email: "ann@example.com".to_string(),
            created_at: now,
            updated_at: now,
        }],
    }
}

fn test_app(store: FakeStore, mailer: Arc<RecordingMailer>) -> Router {
    let dispatcher = Dispatcher::new(Resolver::new(Arc::new(store)), mailer);
    let state = AppState {
        dispatcher: Arc::new(dispatcher),
    };
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
    };
    build_app_router(state, &config)
}

fn post_batch(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/stream/records")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn low_reading_batch() -> serde_json::Value {
    serde_json::json!({
        "records": [{
            "eventName": "INSERT",
            "newImage": {
                "deviceId": { "S": "DEV1" },
                "heartRate": { "N": "42" },
                "timestamp": { "S": "2024-01-01T00:00:00Z" }
            }
        }]
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = test_app(FakeStore::default(), Arc::new(RecordingMailer::default()));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn batch_with_abnormal_reading_is_processed_and_fanned_out() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = test_app(seeded_store(), Arc::clone(&mailer));

    let response = app.oneshot(post_batch(low_reading_batch())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body, serde_json::json!({ "status": "processed" }));

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].1.subject.contains("LOW"));
}

#[tokio::test]
async fn delivery_failures_do_not_fail_the_batch() {
    let mailer = Arc::new(RecordingMailer {
        fail_all: true,
        ..Default::default()
    });
    let app = test_app(seeded_store(), Arc::clone(&mailer));

    let response = app.oneshot(post_batch(low_reading_batch())).await.unwrap();

    // Every send failed, yet the handler reports the fixed success body.
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body, serde_json::json!({ "status": "processed" }));
}

#[tokio::test]
async fn non_insert_batch_gets_the_same_fixed_body() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = test_app(seeded_store(), Arc::clone(&mailer));

    let batch = serde_json::json!({
        "records": [
            { "eventName": "MODIFY" },
            { "eventName": "REMOVE" }
        ]
    });

    let response = app.oneshot(post_batch(batch)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body, serde_json::json!({ "status": "processed" }));
    assert!(mailer.sent.lock().unwrap().is_empty());
}
