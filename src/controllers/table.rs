use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;

use super::upload::UploadForm;
use crate::{
    domain::{
        input::{Preview, TableSummary},
        tts::{ConversionService, ConversionServiceApi},
    },
    error::AppResult,
};

pub struct TableController {
    conversion_service: Arc<ConversionService>,
}

impl TableController {
    pub fn new(conversion_service: Arc<ConversionService>) -> Self {
        Self { conversion_service }
    }

    /// POST /api/tables/columns - List the columns of an uploaded table
    pub async fn columns(
        State(controller): State<Arc<TableController>>,
        multipart: Multipart,
    ) -> AppResult<Json<TableSummary>> {
        let mut form = UploadForm::read(multipart).await?;
        let options = form.table_options()?;
        let bytes = form.take_file()?;

        let summary = controller.conversion_service.inspect_table(&bytes, options)?;

        tracing::debug!(
            file_name = ?form.file_name,
            columns = summary.columns.len(),
            rows = summary.row_count,
            "Table inspected"
        );

        Ok(Json(summary))
    }

    /// POST /api/tables/preview - First rows of the selected column
    pub async fn preview(
        State(controller): State<Arc<TableController>>,
        multipart: Multipart,
    ) -> AppResult<Json<Preview>> {
        let mut form = UploadForm::read(multipart).await?;
        let options = form.table_options()?;
        let column = form.required("column")?;
        let rows = form.rows()?;
        let bytes = form.take_file()?;

        let preview = controller
            .conversion_service
            .preview_column(&bytes, options, &column, rows)?;

        Ok(Json(preview))
    }
}
