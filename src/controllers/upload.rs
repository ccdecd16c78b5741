use axum::{
    extract::multipart::{Multipart, MultipartError},
    http::StatusCode,
};
use std::collections::HashMap;

use crate::domain::input::TableOptions;
use crate::error::{AppError, AppResult};

/// Multipart body of the upload endpoints: one `file` part plus text fields
#[derive(Debug, Default)]
pub struct UploadForm {
    file: Option<Vec<u8>>,
    pub file_name: Option<String>,
    fields: HashMap<String, String>,
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            if name == "file" {
                form.file_name = field.file_name().map(str::to_string);
                form.file = Some(field.bytes().await.map_err(multipart_error)?.to_vec());
            } else {
                let value = field.text().await.map_err(multipart_error)?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    pub fn take_file(&mut self) -> AppResult<Vec<u8>> {
        self.file
            .take()
            .ok_or_else(|| AppError::BadRequest("Please upload a file".to_string()))
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn required(&self, name: &str) -> AppResult<String> {
        self.field(name)
            .map(str::to_string)
            .ok_or_else(|| AppError::BadRequest(format!("Missing field '{}'", name)))
    }

    pub fn rows(&self) -> AppResult<Option<usize>> {
        self.field("rows")
            .map(|rows| {
                rows.trim()
                    .parse()
                    .map_err(|_| AppError::BadRequest(format!("Invalid row count '{}'", rows)))
            })
            .transpose()
    }

    pub fn table_options(&self) -> AppResult<TableOptions> {
        let delimiter = match self.field("delimiter") {
            None => return Ok(TableOptions::default()),
            Some("\\t") | Some("tab") => b'\t',
            Some(value) if value.len() == 1 && value.is_ascii() => value.as_bytes()[0],
            Some(value) => {
                return Err(AppError::BadRequest(format!(
                    "Delimiter must be a single ASCII character, got '{}'",
                    value
                )))
            }
        };
        Ok(TableOptions { delimiter })
    }
}
