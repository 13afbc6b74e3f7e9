use axum::body::Body;
use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::storage::PhotoKey;
use tokio_util::io::ReaderStream;
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::models::photo::PhotoUploadResponse;
use crate::state::AppState;

/// Files accepted in a single upload request.
pub const MAX_FILES_PER_UPLOAD: u64 = 10;

const CACHE_CONTROL_IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Request body cap for the upload route: a full batch plus multipart framing.
pub fn photo_upload_body_limit(max_photo_size: u64) -> DefaultBodyLimit {
    let limit = max_photo_size
        .saturating_mul(MAX_FILES_PER_UPLOAD)
        .saturating_add(1024 * 1024);
    DefaultBodyLimit::max(usize::try_from(limit).unwrap_or(usize::MAX))
}

#[utoipa::path(
    post,
    path = "/photos",
    tag = "Photos",
    operation_id = "uploadPhotos",
    summary = "Upload item photos",
    description = "Accepts one or more `file` fields with an image extension. Files are stored \
        one after another; if one fails, the ones before it stay stored.",
    request_body(content_type = "multipart/form-data", description = "One or more `file` fields"),
    responses(
        (status = 201, description = "Photos stored", body = PhotoUploadResponse),
        (status = 400, description = "No files or not an image (VALIDATION_ERROR)", body = ErrorBody),
        (status = 413, description = "Photo too large (PAYLOAD_TOO_LARGE)", body = ErrorBody),
    ),
)]
#[instrument(skip_all)]
pub async fn upload_photos(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let max_size = state.config.storage.max_photo_size;
    let mut urls = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }
        if urls.len() as u64 >= MAX_FILES_PER_UPLOAD {
            return Err(AppError::Validation(format!(
                "At most {MAX_FILES_PER_UPLOAD} photos per upload"
            )));
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("File field must have a filename".into()))?;
        let is_image = mime_guess::from_path(&filename)
            .first()
            .is_some_and(|m| m.type_() == mime_guess::mime::IMAGE);
        if !is_image {
            return Err(AppError::Validation(format!(
                "'{filename}' is not an image file"
            )));
        }

        let bytes = read_field(field, max_size).await?;
        let stored = state.photo_store.put(&filename, &bytes).await?;
        info!(key = %stored.key, size = stored.size, "Photo stored");
        urls.push(state.photo_urls.local_url(&stored.key));
    }

    if urls.is_empty() {
        return Err(AppError::Validation("No photo files in upload".into()));
    }

    Ok((StatusCode::CREATED, Json(PhotoUploadResponse { urls })))
}

#[utoipa::path(
    get,
    path = "/photos/{key}",
    tag = "Photos",
    operation_id = "getPhoto",
    summary = "Download a stored photo",
    description = "Streams the photo. Keys never change content, so responses carry a \
        long-lived cache header and `If-None-Match` with the key's ETag returns 304.",
    params(("key" = String, Path, description = "Photo key")),
    responses(
        (status = 200, description = "Photo bytes", content_type = "image/*"),
        (status = 304, description = "Not modified"),
        (status = 400, description = "Malformed key (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Photo not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers))]
pub async fn get_photo(
    State(state): State<AppState>,
    Path(key): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let key = PhotoKey::parse(&key)?;

    let etag_value = format!("\"{key}\"");
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && let Ok(val) = if_none_match.to_str()
        && (val == etag_value || val == "*")
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let size = state.photo_store.size(&key).await?;
    let reader = state.photo_store.get_stream(&key).await?;
    let body = Body::from_stream(ReaderStream::new(reader));

    let content_type = key
        .extension()
        .and_then(|ext| mime_guess::from_ext(ext).first())
        .map(|m| m.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, size.to_string())
        .header(header::ETAG, &etag_value)
        .header(header::CACHE_CONTROL, CACHE_CONTROL_IMMUTABLE)
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

/// Buffer one multipart field, failing as soon as it passes `max_size`.
async fn read_field(mut field: Field<'_>, max_size: u64) -> Result<Vec<u8>, AppError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if (bytes.len() + chunk.len()) as u64 > max_size {
            return Err(AppError::PayloadTooLarge(format!(
                "Photo exceeds maximum size of {max_size} bytes"
            )));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("Multipart error: {e}"))
    }
}
