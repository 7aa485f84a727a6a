use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use models::agent::{AgentEvent, AgentResponse};
use service::{observability, store::RecordStore, Dispatcher};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::errors::ApiError;

pub struct AppState<S: RecordStore> {
    pub dispatcher: Arc<Dispatcher<S>>,
}

impl<S: RecordStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self { dispatcher: Arc::clone(&self.dispatcher) }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Run one agent event through the dispatcher, exactly as the runtime would.
async fn invoke<S: RecordStore + 'static>(
    State(state): State<AppState<S>>,
    Json(event): Json<AgentEvent>,
) -> Result<Json<AgentResponse>, ApiError> {
    let response = state.dispatcher.handle(&event).await?;
    Ok(Json(response))
}

async fn metrics() -> impl IntoResponse {
    match observability::encode_metrics() {
        Ok(body) => (StatusCode::OK, [(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, [(header::CONTENT_TYPE, "text/plain")], e),
    }
}

/// Build the harness router over any record store.
pub fn build_router<S: RecordStore + 'static>(dispatcher: Arc<Dispatcher<S>>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/invoke", post(invoke::<S>))
        .with_state(AppState { dispatcher })
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
