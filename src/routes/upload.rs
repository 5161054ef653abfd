use crate::error::{GateError, GateResult};
use crate::moderation::ModerationResponse;
use crate::state::AppState;
use crate::store::object_key;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Result document persisted next to the image as `{id}.json`
///
/// `url` is the logical `s3://bucket/key` location built from the
/// configured bucket and the computed key, not a store-issued URL.
/// `result` carries the full moderation response verbatim.
#[derive(Debug, Serialize)]
struct ResultDocument<'a> {
    url: &'a str,
    version: Option<&'a str>,
    size: usize,
    content_type: &'a str,
    result: &'a ModerationResponse,
}

/// Handle `POST /upload_image`.
///
/// Runs the full pipeline for exactly one request: extract the `image`
/// multipart field, validate its declared content type, write the raw
/// bytes to the object store, run moderation against the written
/// object, persist the result document, respond with the labels.
///
/// Every failure stops the pipeline immediately. There is no retry and
/// no rollback: a moderation or result-write failure leaves the
/// already-written image object in place.
///
/// # Response
///
/// ```json
/// {
///   "status": 201,
///   "success": true,
///   "moderation_labels": [
///     { "name": "Alcohol", "confidence": 93.4 }
///   ]
/// }
/// ```
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> GateResult<impl IntoResponse> {
    let multipart = multipart.map_err(|e| {
        tracing::warn!(error = %e, "request body is not multipart form data");
        GateError::BadRequest
    })?;
    let (data, content_type) = extract_image_field(multipart).await?;

    let ext = match content_type.as_str() {
        "image/png" => "png",
        "image/jpg" | "image/jpeg" => "jpg",
        "image/gif" => return Err(GateError::GifNotSupported),
        other => {
            tracing::info!(content_type = %other, "unsupported upload content type");
            return Err(GateError::BadRequest);
        }
    };

    let image_id = Uuid::now_v7();
    let key = object_key(&state.config.key_prefix, &format!("{image_id}.{ext}"));
    let url = format!("s3://{}/{}", state.config.bucket, key);
    let size = data.len();

    let put = state
        .store
        .put_object(&key, data, &content_type)
        .await
        .map_err(|e| {
            tracing::error!(path = %url, error = %e, "image upload failed");
            GateError::from(e)
        })?;
    tracing::info!(
        action = "upload_image",
        path = %url,
        version = put.version_id.as_deref().unwrap_or("-"),
        size,
        content_type = %content_type,
        "image stored"
    );

    let moderation = state
        .moderator
        .detect(&state.config.bucket, &key, put.version_id.as_deref())
        .await
        .map_err(|e| {
            tracing::error!(path = %url, error = %e, "detect moderation labels failed");
            GateError::from(e)
        })?;

    let document = ResultDocument {
        url: &url,
        version: put.version_id.as_deref(),
        size,
        content_type: &content_type,
        result: &moderation,
    };
    let document = serde_json::to_vec(&document).map_err(|e| {
        tracing::error!(path = %url, error = %e, "encode moderation result failed");
        GateError::from(e)
    })?;

    let result_key = object_key(&state.config.key_prefix, &format!("{image_id}.json"));
    state
        .store
        .put_object(&result_key, Bytes::from(document), "application/json")
        .await
        .map_err(|e| {
            tracing::error!(path = %url, error = %e, "upload moderation result failed");
            GateError::from(e)
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": StatusCode::CREATED.as_u16(),
            "success": true,
            "moderation_labels": moderation.moderation_labels,
        })),
    ))
}

/// Pull the `image` file field out of the multipart body.
///
/// Any multipart failure (missing field, malformed body, body over the
/// configured limit) maps to the generic 400.
async fn extract_image_field(mut multipart: Multipart) -> GateResult<(Bytes, String)> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "retrieving the image field failed");
                return Err(GateError::BadRequest);
            }
        };

        if field.name() != Some("image") {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(|e| {
            tracing::warn!(error = %e, "reading the image field failed");
            GateError::BadRequest
        })?;
        return Ok((data, content_type));
    }

    tracing::warn!("multipart form has no `image` field");
    Err(GateError::BadRequest)
}
