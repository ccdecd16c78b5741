use super::table::{Column, Table, TableError, TableOptions};

/// Where the text of a conversion comes from
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Delimited upload plus the column to read
    Table {
        bytes: Vec<u8>,
        column: String,
        options: TableOptions,
    },
    /// Uploaded `.txt` file
    TextFile { bytes: Vec<u8> },
    /// Text typed or pasted by the user
    Pasted { text: String },
}

impl InputSource {
    pub fn kind(&self) -> &'static str {
        match self {
            InputSource::Table { .. } => "table",
            InputSource::TextFile { .. } => "text_file",
            InputSource::Pasted { .. } => "pasted",
        }
    }
}

/// Input after acquisition: a whole column, or a single string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    Column(Column),
    Text(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AcquireError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("The uploaded file is not valid UTF-8 text: {0}")]
    Decode(String),
}

pub fn acquire(source: InputSource) -> Result<RawInput, AcquireError> {
    match source {
        InputSource::Table {
            bytes,
            column,
            options,
        } => {
            let table = Table::parse(&bytes, options)?;
            Ok(RawInput::Column(table.into_column(&column)?))
        }
        InputSource::TextFile { bytes } => decode_text_file(bytes).map(RawInput::Text),
        InputSource::Pasted { text } => Ok(RawInput::Text(text)),
    }
}

/// Decode an uploaded text file, dropping a leading byte-order mark
pub fn decode_text_file(bytes: Vec<u8>) -> Result<String, AcquireError> {
    let text = String::from_utf8(bytes).map_err(|e| AcquireError::Decode(e.utf8_error().to_string()))?;

    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}
