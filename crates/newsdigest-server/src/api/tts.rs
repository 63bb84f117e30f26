use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Extension,
};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

/// `GET /tts/{filename}`: a previously generated clip as `audio/mpeg`.
pub(super) async fn serve_audio(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    match state.audio.read(&filename).await {
        Ok(Some(bytes)) => Ok(([(header::CONTENT_TYPE, "audio/mpeg")], bytes)),
        Ok(None) => Err(ApiError::not_found("File not found")),
        Err(e) => {
            tracing::error!(
                request_id = %req_id.0,
                file = %filename,
                error = %e,
                "failed to read audio file"
            );
            Err(ApiError::internal(e.to_string()))
        }
    }
}
