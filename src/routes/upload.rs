use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        DefaultBodyLimit, Multipart, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tracing::warn;

use crate::{
    services::uploads::{StoredUpload, UploadError, UploadedFile},
    state::AppState,
};

const FILE_FIELD: &str = "file";

// Room for multipart framing on top of the file itself. Bodies past this limit
// are cut off while streaming and reported as too large.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

pub fn body_limit(max_file_bytes: usize) -> usize {
    max_file_bytes.saturating_add(MULTIPART_OVERHEAD)
}

pub fn router(body_limit: usize) -> Router<AppState> {
    Router::new().route(
        "/upload",
        post(upload).layer(DefaultBodyLimit::max(body_limit)),
    )
}

#[derive(Serialize)]
struct UploadFailure {
    error: String,
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let body = UploadFailure {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<StoredUpload>, UploadError> {
    let mut multipart = multipart.map_err(|err| {
        warn!("upload without multipart body: {err}");
        UploadError::MissingFile
    })?;

    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| read_failure(&state, err))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|err| read_failure(&state, err))?;
        file = Some(UploadedFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
        break;
    }

    let file = file.ok_or(UploadError::MissingFile)?;
    let stored = state.uploads.store(file).await.inspect_err(|err| {
        if err.is_client_error() {
            warn!("rejected upload: {err}");
        }
    })?;
    Ok(Json(stored))
}

fn read_failure(state: &AppState, err: MultipartError) -> UploadError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!("upload body over the limit: {err}");
        state.uploads.too_large()
    } else {
        UploadError::Failed(err.to_string())
    }
}
