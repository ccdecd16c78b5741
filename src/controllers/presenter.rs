use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, StatusCode},
};
use serde::Deserialize;

use crate::domain::tts::AudioArtifact;
use crate::error::{AppError, AppResult};

pub const X_AUDIO_FORMAT: &str = "x-audio-format";
pub const X_CHARACTER_COUNT: &str = "x-character-count";

/// `?download=true` asks for an attachment instead of an inline player
#[derive(Debug, Default, Deserialize)]
pub struct PresentQuery {
    #[serde(default)]
    pub download: bool,
}

/// Turn a finished artifact into the audio response
pub fn present(
    artifact: AudioArtifact,
    char_count: usize,
    query: &PresentQuery,
) -> AppResult<(StatusCode, HeaderMap, Body)> {
    let disposition = if query.download { "attachment" } else { "inline" };
    let content_disposition =
        HeaderValue::from_str(&format!("{}; filename=\"{}\"", disposition, artifact.file_name()))
            .map_err(|e| AppError::Internal(e.to_string()))?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(artifact.mime_type()),
    );
    headers.insert(header::CONTENT_DISPOSITION, content_disposition);
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(artifact.len()));
    headers.insert(
        X_AUDIO_FORMAT,
        HeaderValue::from_static(artifact.format().as_str()),
    );
    headers.insert(X_CHARACTER_COUNT, HeaderValue::from(char_count));

    Ok((StatusCode::OK, headers, Body::from(artifact.into_bytes())))
}
