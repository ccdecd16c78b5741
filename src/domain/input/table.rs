use serde::Serialize;
use std::collections::HashMap;

/// Rows shown when the caller does not ask for a specific preview size
pub const DEFAULT_PREVIEW_ROWS: usize = 3;

/// Upper bound of the preview slider
pub const MAX_PREVIEW_ROWS: usize = 10;

/// Cell spellings read as missing values
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Could not parse the uploaded file: {0}")]
    Parse(String),
    #[error("Column '{0}' not found")]
    UnknownColumn(String),
}

/// A single value of a tabular upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Value(String),
    Missing,
}

impl Cell {
    fn from_raw(raw: &str) -> Self {
        if MISSING_MARKERS.contains(&raw) {
            Cell::Missing
        } else {
            Cell::Value(raw.to_string())
        }
    }

    pub fn as_value(&self) -> Option<&str> {
        match self {
            Cell::Value(value) => Some(value),
            Cell::Missing => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

/// Parser settings for delimited uploads
#[derive(Debug, Clone, Copy)]
pub struct TableOptions {
    pub delimiter: u8,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Display-only slice of a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub column: String,
    pub rows: Vec<Option<String>>,
    pub row_count: usize,
}

/// Column-oriented view of a delimited upload. The first record is the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    pub fn parse(bytes: &[u8], options: TableOptions) -> Result<Self, TableError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers = reader
            .headers()
            .map_err(|e| TableError::Parse(e.to_string()))?
            .clone();

        if headers.is_empty() {
            return Err(TableError::Parse("No columns to parse from file".to_string()));
        }

        let names = column_names(headers.iter());
        let mut columns: Vec<Column> = names
            .into_iter()
            .map(|name| Column {
                name,
                cells: Vec::new(),
            })
            .collect();

        let mut row_count = 0;
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|e| TableError::Parse(e.to_string()))?;

            if record.is_empty() {
                continue;
            }

            if record.len() > columns.len() {
                // header is line 1
                return Err(TableError::Parse(format!(
                    "Expected {} fields in line {}, saw {}",
                    columns.len(),
                    index + 2,
                    record.len()
                )));
            }

            for (position, column) in columns.iter_mut().enumerate() {
                let cell = record.get(position).map(Cell::from_raw).unwrap_or(Cell::Missing);
                column.cells.push(cell);
            }
            row_count += 1;
        }

        tracing::debug!(
            column_count = columns.len(),
            row_count = row_count,
            "Table parsed"
        );

        Ok(Self { columns, row_count })
    }

    pub fn columns(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column(&self, name: &str) -> Result<&Column, TableError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| TableError::UnknownColumn(name.to_string()))
    }

    /// Consume the table, keeping only the chosen column
    pub fn into_column(self, name: &str) -> Result<Column, TableError> {
        self.columns
            .into_iter()
            .find(|c| c.name == name)
            .ok_or_else(|| TableError::UnknownColumn(name.to_string()))
    }

    /// First rows of a column for display. The size is clamped to
    /// `1..=min(MAX_PREVIEW_ROWS, row_count)`.
    pub fn preview(&self, name: &str, requested: Option<usize>) -> Result<Preview, TableError> {
        let column = self.column(name)?;
        let upper = MAX_PREVIEW_ROWS.min(self.row_count).max(1);
        let rows = requested.unwrap_or(DEFAULT_PREVIEW_ROWS).clamp(1, upper);

        Ok(Preview {
            column: column.name.clone(),
            rows: column
                .cells
                .iter()
                .take(rows)
                .map(|cell| cell.as_value().map(str::to_string))
                .collect(),
            row_count: self.row_count,
        })
    }
}

/// Blank headers become `Unnamed: {index}`, repeats get `.1`, `.2`, ...
fn column_names<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::new();

    for (index, raw) in headers.enumerate() {
        let raw = if index == 0 {
            raw.trim_start_matches('\u{feff}')
        } else {
            raw
        };
        let base = if raw.trim().is_empty() {
            format!("Unnamed: {}", index)
        } else {
            raw.to_string()
        };

        let mut name = base.clone();
        while let Some(count) = seen.get_mut(&name) {
            *count += 1;
            name = format!("{}.{}", base, count);
        }
        seen.insert(name.clone(), 0);
        names.push(name);
    }

    names
}
