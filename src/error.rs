use crate::moderation::ModerationError;
use crate::store::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub type GateResult<T> = Result<T, GateError>;

/// Gateway error types
///
/// Every failure in the pipeline collapses into one of these variants.
/// The HTTP response body is always the uniform envelope
/// `{"status": u16, "success": false, "detail": String}`; internal
/// error text stays in the logs and never reaches the client.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("bad request")]
    BadRequest,

    #[error("image/gif not supported")]
    GifNotSupported,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("not found")]
    NotFound,

    #[error("object store error: {0}")]
    Store(#[from] StoreError),

    #[error("moderation error: {0}")]
    Moderation(#[from] ModerationError),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl GateError {
    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            GateError::BadRequest | GateError::GifNotSupported => StatusCode::BAD_REQUEST,
            GateError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            GateError::NotFound => StatusCode::NOT_FOUND,
            GateError::Store(_) | GateError::Moderation(_) | GateError::Serialize(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Client-facing detail string
    ///
    /// GIF uploads get a distinct message; everything else maps to the
    /// status reason phrase so no internal detail leaks.
    fn detail(&self) -> &'static str {
        match self {
            GateError::GifNotSupported => "image/gif not supported.",
            _ => self.status_code().canonical_reason().unwrap_or("Error"),
        }
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = Json(json!({
            "status": status.as_u16(),
            "success": false,
            "detail": self.detail(),
        }));

        (status, body).into_response()
    }
}
