//! HTTP route handlers
//!
//! - `upload`: the upload-and-moderate pipeline (`POST /upload_image`)
//! - `index`: the embedded upload form (`GET /`, opt-in)
//!
//! Unmatched routes and wrong methods fall through to the handlers
//! below, which reply with the uniform JSON error envelope.

pub mod index;
pub mod upload;

use crate::error::GateError;

/// 404 Not Found handler for undefined routes
pub async fn not_found() -> GateError {
    GateError::NotFound
}

/// 405 handler for known paths hit with the wrong method
pub async fn method_not_allowed() -> GateError {
    GateError::MethodNotAllowed
}
