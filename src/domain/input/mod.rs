pub mod assembler;
pub mod source;
pub mod table;

pub use assembler::{assemble, AssembledText, EmptyInputWarning};
pub use source::{acquire, decode_text_file, AcquireError, InputSource, RawInput};
pub use table::{Cell, Column, Preview, Table, TableError, TableOptions};

use serde::{Deserialize, Serialize};

/// Response for POST /api/tables/columns
#[derive(Debug, Serialize, Deserialize)]
pub struct TableSummary {
    pub columns: Vec<String>,
    pub row_count: usize,
}

impl From<&Table> for TableSummary {
    fn from(table: &Table) -> Self {
        Self {
            columns: table.columns().into_iter().map(str::to_string).collect(),
            row_count: table.row_count(),
        }
    }
}
