//! Serves stored documents back verbatim from the uploads and
//! session-documents directories.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::path::Path as FsPath;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Stored files never change once written.
pub const IMMUTABLE_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

const INVALID_PATH: &str = "Invalid path";
const FILE_NOT_FOUND: &str = "File not found";

/// Guess a Content-Type from a file extension.
pub fn content_type_for_extension(path: &FsPath) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "txt" => "text/plain",
        "json" => "application/json",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "stl" => "model/stl",
        "dcm" => "application/dicom",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

#[derive(Debug)]
pub struct StoredFile {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

impl IntoResponse for StoredFile {
    fn into_response(self) -> Response {
        (
            [
                (header::CONTENT_TYPE, self.content_type),
                (header::CACHE_CONTROL, IMMUTABLE_CACHE_CONTROL),
            ],
            self.bytes,
        )
            .into_response()
    }
}

/// Read `segments` (joined with `/`) from under `base`.
///
/// Any `..` in the joined path is rejected outright. The resolved file must
/// also canonicalize to a descendant of `base`, which catches absolute
/// segments and symlinks pointing out of the directory. Every read failure
/// is reported as not found.
pub async fn read_stored_file(base: &FsPath, segments: &[&str]) -> ApiResult<StoredFile> {
    let relative = segments.join("/");
    if relative.contains("..") {
        return Err(ApiError::bad_request(INVALID_PATH));
    }

    let root = tokio::fs::canonicalize(base)
        .await
        .map_err(|_| ApiError::not_found(FILE_NOT_FOUND))?;
    let resolved = tokio::fs::canonicalize(base.join(&relative))
        .await
        .map_err(|_| ApiError::not_found(FILE_NOT_FOUND))?;

    if !resolved.starts_with(&root) {
        tracing::warn!("Rejected path escaping {}: {}", root.display(), relative);
        return Err(ApiError::bad_request(INVALID_PATH));
    }

    let bytes = tokio::fs::read(&resolved).await.map_err(|e| {
        tracing::debug!("Failed to read {}: {}", resolved.display(), e);
        ApiError::not_found(FILE_NOT_FOUND)
    })?;

    Ok(StoredFile {
        bytes,
        content_type: content_type_for_extension(FsPath::new(&relative)),
    })
}

/// GET /uploads/*path
pub async fn serve_upload(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> ApiResult<StoredFile> {
    let base = state.storage.uploads_dir()?;
    let segments: Vec<&str> = path.split('/').collect();
    read_stored_file(&base, &segments).await
}

/// GET /session-documents/*path
pub async fn serve_session_document(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> ApiResult<StoredFile> {
    let base = state.storage.session_documents_dir()?;
    let segments: Vec<&str> = path.split('/').collect();
    read_stored_file(&base, &segments).await
}

/// GET /uploads/ and /session-documents/ with nothing after the prefix.
pub async fn empty_path() -> ApiError {
    ApiError::not_found(FILE_NOT_FOUND)
}
