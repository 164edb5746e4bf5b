//! HTTP API
//!
//! Builds the axum router for the chat service. Handlers translate HTTP
//! requests into `ChatService` calls; errors become `{"detail": ...}` bodies.

pub mod error;
pub mod handlers;
pub mod health;
mod input;

use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use crate::chat::ChatService;

/// Shared state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: ChatService,
    pub service_name: Arc<str>,
}

impl AppState {
    pub fn new(service: ChatService, service_name: impl Into<Arc<str>>) -> Self {
        Self {
            service,
            service_name: service_name.into(),
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/chats", post(handlers::create_chat))
        .route("/chats/", post(handlers::create_chat))
        .route(
            "/chats/:chat_id",
            get(handlers::get_chat).delete(handlers::delete_chat),
        )
        .route("/chats/:chat_id/messages", post(handlers::create_message))
        .route("/chats/:chat_id/messages/", post(handlers::create_message))
        .route("/health", get(health::health_check))
        .fallback(not_found)
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" }))).into_response()
}

/// Log every request line and the resulting status
async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    tracing::info!(%method, %path, "Request received");
    let response = next.run(request).await;
    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Response sent"
    );

    response
}
