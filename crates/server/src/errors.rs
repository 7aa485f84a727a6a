use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use tracing::error;

/// A dispatcher failure that the agent runtime would see as a failed
/// invocation; surfaced here as 502.
#[derive(Debug)]
pub struct ApiError(pub String);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        error!(error = %e, code = e.code(), "invocation failed");
        ApiError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let msg = self.0;
        let status = StatusCode::BAD_GATEWAY;
        (status, Json(serde_json::json!({"error": msg}))).into_response()
    }
}
