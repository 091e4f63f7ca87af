use crate::errors::RagError;
use crate::models::{ChatRequest, ChatResponse};
use crate::service::RagService;
use axum::{
    extract::{Json as ExtractJson, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::{error, info};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub fn create_app(service: Arc<RagService>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/chat", post(chat))
        .layer(CorsLayer::permissive())
        .with_state(service)
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn index_page(State(service): State<Arc<RagService>>) -> impl IntoResponse {
    let path = Path::new(service.static_dir()).join("index.html");

    match tokio::fs::read_to_string(&path).await {
        Ok(content) => Html(content).into_response(),
        Err(e) => {
            error!("Failed to read static page {}: {}", path.display(), e);
            (StatusCode::INTERNAL_SERVER_ERROR, "An error occurred").into_response()
        }
    }
}

async fn chat(
    State(service): State<Arc<RagService>>,
    ExtractJson(request): ExtractJson<ChatRequest>,
) -> impl IntoResponse {
    info!("User input: {}", request.user_input);

    match service.answer(&request.user_input).await {
        Ok(response) => {
            info!("Response produced ({} chars)", response.len());
            Json(ChatResponse { response }).into_response()
        }
        Err(e) => {
            let kind = RagError::classify(&e);
            error!(
                "Chat pipeline failed (status {}, retryable: {}): {}",
                kind.http_status_code(),
                kind.is_retryable(),
                kind
            );
            (StatusCode::INTERNAL_SERVER_ERROR, "An error occurred").into_response()
        }
    }
}
