use crate::domain::input::{AcquireError, TableError};
use crate::error::AppError;
use crate::infrastructure::repositories::TtsRepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Upload is not valid delimited text
    #[error("{0}")]
    Parse(String),
    /// Text upload is not UTF-8
    #[error("{0}")]
    Decode(String),
    #[error("{0}")]
    UnknownColumn(String),
    /// Cloud synthesis failed or was refused
    #[error("{0}")]
    Service(String),
    /// Local engine missing, failed, or produced no audio
    #[error("{0}")]
    Engine(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<TableError> for ConversionError {
    fn from(err: TableError) -> Self {
        match err {
            TableError::Parse(_) => ConversionError::Parse(err.to_string()),
            TableError::UnknownColumn(_) => ConversionError::UnknownColumn(err.to_string()),
        }
    }
}

impl From<AcquireError> for ConversionError {
    fn from(err: AcquireError) -> Self {
        match err {
            AcquireError::Table(table_err) => table_err.into(),
            AcquireError::Decode(_) => ConversionError::Decode(err.to_string()),
        }
    }
}

impl From<TtsRepositoryError> for ConversionError {
    fn from(err: TtsRepositoryError) -> Self {
        match err {
            TtsRepositoryError::Service(msg) => ConversionError::Service(msg),
            TtsRepositoryError::Engine(msg) => ConversionError::Engine(msg),
        }
    }
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::Parse(msg)
            | ConversionError::Decode(msg)
            | ConversionError::UnknownColumn(msg) => AppError::BadRequest(msg),
            ConversionError::Service(msg) => AppError::ExternalService(msg),
            ConversionError::Engine(msg) => AppError::EngineUnavailable(msg),
            ConversionError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
