use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use prodline_core::error::ProdlineError;
use serde_json::json;

/// HTTP face of [`ProdlineError`].
#[derive(Debug)]
pub struct ApiError(pub ProdlineError);

impl From<ProdlineError> for ApiError {
    fn from(err: ProdlineError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            ProdlineError::Conflict(_) => StatusCode::CONFLICT,
            ProdlineError::InvalidArgument(_) | ProdlineError::Parse(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        } else {
            tracing::warn!(error = %self.0, status = status.as_u16(), "request rejected");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
