//! Report error types.

use tally_core::entities::ProjectId;
use tally_sources::SourceError;
use thiserror::Error;

/// Fatal aggregation errors. Any of these aborts the run before output is
/// written.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A project referenced by the fetched entries could not be resolved.
    #[error("failed to resolve project {id}: {source}")]
    Project {
        id: ProjectId,
        #[source]
        source: SourceError,
    },
}

/// Why a single cell could not be built. The cell is skipped; the rest of the
/// grid is still written.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CellError {
    /// NaN and infinities have no spreadsheet representation.
    #[error("number {0} is not finite")]
    NonFiniteNumber(f64),

    /// Dates before the serial epoch cannot be written as date cells.
    #[error("date {0} is before the 1899-12-30 epoch")]
    DateOutOfRange(chrono::NaiveDateTime),

    /// Row or column index past the sheet limits.
    #[error("cell ({row}, {col}) is outside the sheet limits")]
    OutOfBounds { row: usize, col: usize },
}

/// Failure to write the workbook file.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
