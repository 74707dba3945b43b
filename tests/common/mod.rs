//! Shared test utilities for integration tests.
//!
//! Provides a `TestClient` that drives the application through its router and
//! a `MockBackend`, a real HTTP server on a random loopback port that plays
//! the classification service with canned replies. Methods are intentionally
//! broad to support various test scenarios across different test files.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use http_body_util::BodyExt;
use spendsense::config::Config;
use spendsense::handlers;
use spendsense::state::AppState;
use tokio::net::TcpListener;
use tower::ServiceExt;

/// One canned HTTP reply.
#[derive(Clone)]
pub struct MockReply {
    pub status: StatusCode,
    pub body: String,
}

impl MockReply {
    pub fn ok(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
        }
    }

    pub fn with_status(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

#[derive(Clone)]
struct MockState {
    classify: MockReply,
    dashboard: MockReply,
    classify_delay: Option<Duration>,
    dashboard_delay: Option<Duration>,
    classify_calls: Arc<AtomicUsize>,
    dashboard_calls: Arc<AtomicUsize>,
}

/// A stand-in classification service bound to a random loopback port.
pub struct MockBackend {
    pub base_url: String,
    classify_calls: Arc<AtomicUsize>,
    dashboard_calls: Arc<AtomicUsize>,
}

impl MockBackend {
    pub async fn start(classify: MockReply, dashboard: MockReply) -> Self {
        Self::start_with_delays(classify, dashboard, None, None).await
    }

    /// Start a backend whose replies are held back by the given delays, for
    /// tests that need to observe in-flight state.
    pub async fn start_with_delays(
        classify: MockReply,
        dashboard: MockReply,
        classify_delay: Option<Duration>,
        dashboard_delay: Option<Duration>,
    ) -> Self {
        let classify_calls = Arc::new(AtomicUsize::new(0));
        let dashboard_calls = Arc::new(AtomicUsize::new(0));

        let state = MockState {
            classify,
            dashboard,
            classify_delay,
            dashboard_delay,
            classify_calls: Arc::clone(&classify_calls),
            dashboard_calls: Arc::clone(&dashboard_calls),
        };

        let router = Router::new()
            .route("/classify", post(serve_classify))
            .route("/dashboard", get(serve_dashboard))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener
            .local_addr()
            .expect("Failed to read mock backend address");

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Mock backend stopped");
        });

        Self {
            base_url: format!("http://{}", addr),
            classify_calls,
            dashboard_calls,
        }
    }

    /// A base URL with nothing listening behind it.
    pub async fn unreachable_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to read address");
        drop(listener);
        format!("http://{}", addr)
    }

    pub fn classify_calls(&self) -> usize {
        self.classify_calls.load(Ordering::SeqCst)
    }

    pub fn dashboard_calls(&self) -> usize {
        self.dashboard_calls.load(Ordering::SeqCst)
    }
}

async fn serve_classify(State(state): State<MockState>, _body: Bytes) -> Response {
    state.classify_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(delay) = state.classify_delay {
        tokio::time::sleep(delay).await;
    }
    reply(&state.classify)
}

async fn serve_dashboard(State(state): State<MockState>) -> Response {
    state.dashboard_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(delay) = state.dashboard_delay {
        tokio::time::sleep(delay).await;
    }
    reply(&state.dashboard)
}

fn reply(reply: &MockReply) -> Response {
    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body.clone(),
    )
        .into_response()
}

/// A test client that simulates a browser session against the application,
/// wired to the given classification backend.
pub struct TestClient {
    state: AppState,
}

impl TestClient {
    pub fn new(backend_url: &str) -> Self {
        let config = Config {
            host: "127.0.0.1".into(),
            port: 7070,
            backend_url: backend_url.to_string(),
            static_path: PathBuf::from("static"),
        };
        let state = AppState::new(config).expect("Failed to create app state");
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn router(&self) -> Router {
        handlers::routes().with_state(self.state.clone())
    }

    /// Make a GET request and return status and body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let response = self
            .router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// Make a POST request with an empty body and return status and body.
    pub async fn post(&self, uri: &str) -> (StatusCode, String) {
        let response = self
            .router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// Make a POST request with a single file as multipart form data.
    pub async fn post_multipart(
        &self,
        uri: &str,
        field: &str,
        file_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> (StatusCode, String) {
        let boundary = "spendsense-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                boundary, field, file_name, content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

        let response = self
            .router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(
                        "Content-Type",
                        format!("multipart/form-data; boundary={}", boundary),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body_bytes).to_string())
    }

    // =========================================================================
    // Helper methods for driving the upload flow
    // =========================================================================

    /// Stage a receipt via POST and return success status.
    pub async fn select_receipt(&self, file_name: &str, bytes: &[u8]) -> bool {
        let (status, _) = self
            .post_multipart(
                "/receipts/select",
                "receipt_image",
                file_name,
                "image/jpeg",
                bytes,
            )
            .await;
        // Redirect (303) indicates success
        status == StatusCode::SEE_OTHER
    }

    /// Trigger a classification submit via POST and return success status.
    pub async fn submit_receipt(&self) -> bool {
        let (status, _) = self.post("/receipts/submit").await;
        status == StatusCode::SEE_OTHER
    }
}
