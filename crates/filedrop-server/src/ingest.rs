//! Upload handlers.
//!
//! Both routes sanitize the client filename, prefix it with a timestamp and
//! write the bytes into the blob store before answering with the same
//! [`UploadResponse`] shape.

use axum::extract::multipart::{Field, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::http::HeaderMap;
use axum::response::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use filedrop_protocol::{Base64UploadRequest, UploadResponse, DEFAULT_MIME_TYPE, UPLOAD_FIELD};
use filedrop_store::{sanitize_original_name, storage_name, BlobWriter};
use tracing::{info, warn};

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

pub const NO_FILE_MESSAGE: &str = "No file uploaded";
pub const MISSING_FIELDS_MESSAGE: &str = "Missing data or filename";

/// `POST /upload`: multipart form with a `file` field.
///
/// The first `file` part carrying a non-empty filename is streamed to disk.
/// Parts before it are skipped and nothing after it is read, so a failure in a
/// trailing part cannot leave a stored file behind an error response.
pub async fn upload_multipart(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> ServerResult<Json<UploadResponse>> {
    let mut multipart = multipart.map_err(|rejection| {
        warn!(error = %rejection, "upload is not a multipart form");
        ServerError::Validation(NO_FILE_MESSAGE.into())
    })?;

    let mut stored = None;
    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        // Browsers send `filename=""` when no file was chosen.
        let Some(original) = field.file_name().filter(|n| !n.is_empty()).map(str::to_owned) else {
            continue;
        };
        let mimetype = field.content_type().unwrap_or(DEFAULT_MIME_TYPE).to_owned();
        let filename = storage_name(&sanitize_original_name(&original)?);

        let mut writer = state.store.create(&filename).await?;
        if let Err(e) = copy_field(&mut field, &mut writer).await {
            writer.abort().await;
            return Err(e);
        }
        let size = writer.finish().await?;
        stored = Some((filename, size, mimetype));
        break;
    }

    let Some((filename, size, mimetype)) = stored else {
        return Err(ServerError::Validation(NO_FILE_MESSAGE.into()));
    };
    info!(%filename, size, %mimetype, "stored multipart upload");
    let url = state.public_url(&headers, &filename);
    Ok(Json(UploadResponse::new(filename, url, size, mimetype)))
}

async fn copy_field(field: &mut Field<'_>, writer: &mut BlobWriter) -> ServerResult<()> {
    while let Some(chunk) = field.chunk().await? {
        writer.write_chunk(&chunk).await?;
    }
    Ok(())
}

/// `POST /upload-base64`: JSON `{data, filename}` with base64 content.
pub async fn upload_base64(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<Base64UploadRequest>, JsonRejection>,
) -> ServerResult<Json<UploadResponse>> {
    let Json(request) = payload?;
    let (data, original) = request
        .fields()
        .ok_or_else(|| ServerError::Validation(MISSING_FIELDS_MESSAGE.into()))?;

    let original = sanitize_original_name(original)?;
    let bytes = STANDARD.decode(data)?;
    let filename = storage_name(&original);
    let size = state.store.write(&filename, &bytes).await?;

    info!(%filename, size, "stored base64 upload");
    let url = state.public_url(&headers, &filename);
    Ok(Json(UploadResponse::new(filename, url, size, DEFAULT_MIME_TYPE.into())))
}
