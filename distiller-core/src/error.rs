//! Error types for workbook ingestion

use thiserror::Error;

/// Why a workbook could not be turned into records
#[derive(Debug, Error)]
pub enum ParseFailure {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The bytes are not a spreadsheet calamine understands
    #[error("{0}")]
    Decode(#[from] calamine::Error),

    #[error("No data found in Excel file")]
    EmptyWorkbook,
}

/// The single user-facing failure of a parse call.
///
/// Whatever went wrong underneath, callers only ever see this error and are
/// expected to keep any previously processed data as it was.
#[derive(Debug, Error)]
#[error("Failed to process Excel file: {cause}")]
pub struct ProcessingFailed {
    #[source]
    pub cause: ParseFailure,
}

impl From<ParseFailure> for ProcessingFailed {
    fn from(cause: ParseFailure) -> Self {
        Self { cause }
    }
}

impl ProcessingFailed {
    /// True when the workbook decoded but held no rows
    pub fn is_empty_workbook(&self) -> bool {
        matches!(self.cause, ParseFailure::EmptyWorkbook)
    }
}
