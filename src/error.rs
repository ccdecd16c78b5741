use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    BadRequest(String),

    /// Request was fine but there is nothing to convert
    #[error("{0}")]
    EmptyInput(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Speech service error: {0}")]
    ExternalService(String),

    #[error("Speech engine error: {0}")]
    EngineUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Banner severity shown by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorLevel {
    Warning,
    Error,
}

/// Error response structure - message, banner level and status code
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub level: ErrorLevel,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::EmptyInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::ExternalService(_) => StatusCode::BAD_GATEWAY,
            Self::EngineUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn level(&self) -> ErrorLevel {
        match self {
            Self::EmptyInput(_) => ErrorLevel::Warning,
            _ => ErrorLevel::Error,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            message: self.to_string(),
            level: self.level(),
        }
    }
}

/// Implement IntoResponse for automatic conversion in handlers
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self.level() {
            ErrorLevel::Warning => tracing::info!(
                warning = %self,
                status = %status.as_u16(),
                "Request produced a warning"
            ),
            ErrorLevel::Error => tracing::error!(
                error = %self,
                status = %status.as_u16(),
                "Request failed"
            ),
        }

        (status, Json(self.to_response())).into_response()
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
