use super::source::RawInput;
use super::table::Cell;
use std::fmt;

/// Text ready for synthesis. Never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledText(String);

impl AssembledText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for AssembledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Nothing to synthesize. Guidance for the user, not a failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct EmptyInputWarning {
    pub message: String,
}

impl EmptyInputWarning {
    fn for_input(input: &RawInput) -> Self {
        let message = match input {
            RawInput::Column(column) => format!(
                "Column '{}' has no text to convert. Please select another column.",
                column.name
            ),
            RawInput::Text(_) => "Please enter some text before converting.".to_string(),
        };
        Self { message }
    }
}

/// Join the present values of a column with single spaces, in row order
pub fn join_cells(cells: &[Cell]) -> String {
    cells
        .iter()
        .filter_map(Cell::as_value)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn assemble(input: RawInput) -> Result<AssembledText, EmptyInputWarning> {
    let text = match &input {
        RawInput::Column(column) => join_cells(&column.cells),
        RawInput::Text(text) => text.clone(),
    };

    if text.trim().is_empty() {
        return Err(EmptyInputWarning::for_input(&input));
    }

    Ok(AssembledText(text))
}
