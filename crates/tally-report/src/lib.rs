//! # tally-report
//!
//! Turns fetched time entries into the exported spreadsheet.
//!
//! - [`aggregate`] groups entries by description, resolves projects and
//!   enriches each task from the issue tracker
//! - [`grid`] projects records into a typed, sparse cell grid
//! - [`workbook`] and [`xlsx`] write that grid out as an `.xlsx` file
//! - [`export`] ties the last two together with per-cell error reporting

pub mod aggregate;
mod error;
pub mod export;
pub mod grid;
pub mod workbook;
pub mod xlsx;

pub use aggregate::{Aggregation, aggregate};
pub use error::{CellError, EncodeError, ReportError};
pub use export::{ExportOptions, ExportSummary, export};
pub use grid::{CellGrid, DateSystem, build_grid};
pub use workbook::{Workbook, WorkbookEncoder};
pub use xlsx::XlsxEncoder;
