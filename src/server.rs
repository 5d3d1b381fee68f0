//! HTTP transport.
//!
//! A thin JSON layer over one shared [`ResponseResolver`]:
//!
//! | Method | Path                      | Body / Response                                   |
//! |--------|---------------------------|---------------------------------------------------|
//! | POST   | `/chat`, `/api/chat`      | `{"message"}` → `{"response", "user_message", "timestamp", "status"}` |
//! | GET    | `/`, `/api/health`        | liveness payload                                  |
//! | GET    | `/api/info`               | rule count and metadata                           |
//!
//! Validation failures are answered with 400, anything unexpected with 500,
//! unknown routes with 404 and wrong methods with 405, all as
//! `{"error", "status": "error"}`. Every
//! request goes through the same resolver, so the fallback rotation is shared
//! process-wide.

use crate::{Error, ResponseResolver};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

pub const DEFAULT_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: String,
    /// Cap on the trimmed message length, checked before the resolver runs.
    pub max_message_len: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig { addr: DEFAULT_ADDR.to_string(), max_message_len: Some(DEFAULT_MAX_MESSAGE_LEN) }
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    resolver: Arc<ResponseResolver>,
    max_message_len: Option<usize>,
}

impl AppState {
    pub fn new(resolver: Arc<ResponseResolver>, config: &ServerConfig) -> Self {
        AppState { resolver, max_message_len: config.max_message_len }
    }
}

// --- Wire types -------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub user_message: String,
    pub timestamp: String,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub total_rules: usize,
    pub total_fallbacks: usize,
    pub max_message_len: Option<usize>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: &'static str,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorResponse { error: error.into(), status: "error" }
    }
}

// --- Router -----------------------------------------------------------------

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/chat", post(chat))
        .route("/api/chat", post(chat))
        .route("/api/info", get(get_info))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `config.addr` and serve until Ctrl-C.
pub async fn serve(resolver: Arc<ResponseResolver>, config: ServerConfig) -> crate::Result<()> {
    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    info!(
        addr = %config.addr,
        rules = resolver.rule_count(),
        max_message_len = ?config.max_message_len,
        "starting chat server"
    );

    let app = create_router(AppState::new(resolver, &config));
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(%err, "failed to listen for shutdown signal");
        return;
    }
    info!("shutting down");
}

// --- Handlers ---------------------------------------------------------------

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "API is running", timestamp: timestamp() })
}

async fn get_info(State(state): State<AppState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        name: "Rule-Based Chatbot",
        version: env!("CARGO_PKG_VERSION"),
        description: "A chatbot that responds to user queries using pattern matching",
        total_rules: state.resolver.rule_count(),
        total_fallbacks: state.resolver.fallback().len(),
        max_message_len: state.max_message_len,
        timestamp: timestamp(),
    })
}

async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(req) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let message = req.message.trim();

    if let Some(max) = state.max_message_len {
        let len = message.chars().count();
        if len > max {
            return Err(Error::InputTooLong { len, max }.into());
        }
    }

    let response = state.resolver.resolve(message)?;
    Ok(Json(ChatResponse { response, user_message: message.to_string(), timestamp: timestamp(), status: "success" }))
}

async fn not_found() -> AppError {
    AppError::NotFound("Endpoint not found".to_string())
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed("Method not allowed".to_string())
}

fn timestamp() -> String {
    Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

// --- Error handling ---------------------------------------------------------

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    MethodNotAllowed(String),
    Internal(String),
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        if err.is_validation() {
            warn!(%err, "rejected chat message");
            AppError::BadRequest(err.to_string())
        } else {
            error!(%err, "chat resolution failed");
            AppError::Internal("Internal server error".to_string())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::MethodNotAllowed(msg) => (StatusCode::METHOD_NOT_ALLOWED, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
