#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use decideroom_api::config::ServerConfig;
use decideroom_api::router::build_app_router;
use decideroom_api::state::AppState;
use decideroom_core::gateway::{GatewayError, InferenceGateway, InferenceRequest};
use decideroom_core::planner::{ModelSelection, RoomPlanner};
use decideroom_gemini::GeminiConfig;

/// A request as seen by [`StubGateway`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub system_instruction: Option<String>,
    pub content: String,
}

/// Inference gateway double that replays scripted replies in order.
#[derive(Default)]
pub struct StubGateway {
    replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    calls: Mutex<Vec<RecordedCall>>,
    delay: Option<Duration>,
}

impl StubGateway {
    pub fn replying(text: &str) -> Arc<Self> {
        Self::scripted(vec![Ok(text.to_string())])
    }

    pub fn failing(err: GatewayError) -> Arc<Self> {
        Self::scripted(vec![Err(err)])
    }

    pub fn scripted(replies: Vec<Result<String, GatewayError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
            delay: None,
        })
    }

    /// A gateway that answers `text` only after `delay`.
    pub fn stalled(text: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::from([Ok(text.to_string())])),
            calls: Mutex::new(Vec::new()),
            delay: Some(delay),
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceGateway for StubGateway {
    async fn generate(&self, request: InferenceRequest<'_>) -> Result<String, GatewayError> {
        self.calls.lock().unwrap().push(RecordedCall {
            model: request.model.to_string(),
            system_instruction: request.system_instruction.map(str::to_string),
            content: request.content.to_string(),
        });
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::EmptyResponse("stub exhausted".into())))
    }
}

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default).
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: Ipv4Addr::LOCALHOST.into(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        gemini: GeminiConfig::new("test-key"),
        models: ModelSelection {
            selection: "selection-model".to_string(),
            arrangement: "arrangement-model".to_string(),
        },
    }
}

/// Build the full application router around the given gateway double.
///
/// Uses the same [`build_app_router`] as `main.rs` so integration tests
/// exercise the production middleware stack.
pub fn build_test_app(gateway: Arc<StubGateway>) -> Router {
    let config = test_config();
    let state = AppState {
        planner: RoomPlanner::new(gateway, config.models.clone()),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, &body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
