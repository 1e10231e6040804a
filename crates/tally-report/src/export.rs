//! Records in, spreadsheet file out.

use std::path::{Path, PathBuf};

use tally_core::entities::{TaskField, TaskRecord};

use crate::grid::{DateSystem, build_grid};
use crate::workbook::{Workbook, WorkbookEncoder};

/// Fixed layout of the exported sheet.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub sheet_name: String,
    pub fields: Vec<TaskField>,
    pub dates: DateSystem,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sheet_name: "Toggl Export".into(),
            fields: TaskField::DEFAULT_ORDER.to_vec(),
            dates: DateSystem::Excel1900,
        }
    }
}

/// What the export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub rows: usize,
    pub cells: usize,
    /// Cells dropped because they could not be built.
    pub skipped_cells: usize,
    /// Where the file landed, `None` if writing failed.
    pub written: Option<PathBuf>,
}

/// Serialize `records` and hand the workbook to `encoder`.
///
/// Neither a bad cell nor a failed write aborts: each is logged, and the
/// summary says what actually happened.
pub fn export<E: WorkbookEncoder>(
    records: &[TaskRecord],
    options: &ExportOptions,
    encoder: &E,
    path: &Path,
) -> ExportSummary {
    let build = build_grid(records, &options.fields, options.dates);
    for failure in &build.failures {
        let task = records.get(failure.row).map_or("", |record| record.name.as_str());
        let field = options
            .fields
            .get(failure.col)
            .map_or("", |field| field.as_str());
        tracing::error!(
            row = failure.row,
            col = failure.col,
            task,
            field,
            error = %failure.error,
            "skipping cell"
        );
    }

    let cells = build.grid.len();
    if let Some(range) = build.grid.range() {
        tracing::debug!(%range, cells, "grid built");
    }

    let workbook = Workbook::single(options.sheet_name.clone(), build.grid);
    let written = match encoder.encode(&workbook, path) {
        Ok(()) => Some(path.to_path_buf()),
        Err(error) => {
            tracing::error!(path = %path.display(), %error, "failed to write report file");
            None
        }
    };

    ExportSummary {
        rows: records.len(),
        cells,
        skipped_cells: build.failures.len(),
        written,
    }
}
