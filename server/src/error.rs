//! Error-to-response mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use voxpipe_core::TtsError;

/// Wrapper giving core errors an HTTP shape: a status code plus a JSON body
/// with a machine-readable `error` code and, for external-process failures,
/// a `detail` field carrying the captured stderr.
pub struct ApiError(pub TtsError);

impl From<TtsError> for ApiError {
    fn from(err: TtsError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            TtsError::EmptyText => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(target = "tts", error = %self.0, "Request failed");
        }
        let mut body = serde_json::json!({ "error": self.0.code() });
        if let Some(detail) = self.0.detail() {
            body["detail"] = serde_json::Value::String(detail.to_string());
        }
        (status, Json(body)).into_response()
    }
}
