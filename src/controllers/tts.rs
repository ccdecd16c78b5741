use axum::{
    body::Body,
    extract::{rejection::JsonRejection, Multipart, Query, State},
    http::{HeaderMap, StatusCode},
    Extension, Json,
};
use std::sync::Arc;

use super::presenter::{present, PresentQuery};
use super::upload::UploadForm;
use crate::{
    domain::{
        input::InputSource,
        tts::{
            ConversionOutcome, ConversionRequest, ConversionService, ConversionServiceApi,
            TextConversionRequest,
        },
    },
    error::{AppError, AppResult},
    infrastructure::http::RequestId,
};

type AudioResponse = (StatusCode, HeaderMap, Body);

pub struct TtsController {
    conversion_service: Arc<ConversionService>,
}

impl TtsController {
    pub fn new(conversion_service: Arc<ConversionService>) -> Self {
        Self { conversion_service }
    }

    /// POST /api/tts/csv - Speak one column of an uploaded table
    pub async fn convert_csv(
        State(controller): State<Arc<TtsController>>,
        Extension(request_id): Extension<RequestId>,
        Query(query): Query<PresentQuery>,
        multipart: Multipart,
    ) -> AppResult<AudioResponse> {
        let mut form = UploadForm::read(multipart).await?;
        let options = form.table_options()?;
        let column = form.required("column")?;
        let bytes = form.take_file()?;

        let source = InputSource::Table {
            bytes,
            column,
            options,
        };
        controller.convert(request_id, source, &query).await
    }

    /// POST /api/tts/text-file - Speak an uploaded UTF-8 text file
    pub async fn convert_text_file(
        State(controller): State<Arc<TtsController>>,
        Extension(request_id): Extension<RequestId>,
        Query(query): Query<PresentQuery>,
        multipart: Multipart,
    ) -> AppResult<AudioResponse> {
        let mut form = UploadForm::read(multipart).await?;
        let bytes = form.take_file()?;

        controller
            .convert(request_id, InputSource::TextFile { bytes }, &query)
            .await
    }

    /// POST /api/tts/text - Speak pasted text
    pub async fn convert_text(
        State(controller): State<Arc<TtsController>>,
        Extension(request_id): Extension<RequestId>,
        Query(query): Query<PresentQuery>,
        payload: Result<Json<TextConversionRequest>, JsonRejection>,
    ) -> AppResult<AudioResponse> {
        let Json(request) = payload.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge(rejection.body_text())
            } else {
                AppError::BadRequest(rejection.body_text())
            }
        })?;

        controller
            .convert(request_id, InputSource::Pasted { text: request.text }, &query)
            .await
    }

    async fn convert(
        &self,
        request_id: RequestId,
        source: InputSource,
        query: &PresentQuery,
    ) -> AppResult<AudioResponse> {
        let outcome = self
            .conversion_service
            .convert(ConversionRequest {
                request_id: request_id.0,
                source,
            })
            .await?;

        match outcome {
            ConversionOutcome::Presented {
                artifact,
                char_count,
            } => present(artifact, char_count, query),
            ConversionOutcome::Warning(warning) => Err(AppError::EmptyInput(warning.message)),
        }
    }
}
