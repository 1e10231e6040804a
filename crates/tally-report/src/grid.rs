//! Typed, sparse cell grid built from report rows.
//!
//! The grid is what the workbook encoder consumes: a map from coordinate to
//! typed cell plus the bounding range of the coordinates visited.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use tally_core::entities::{TaskField, TaskRecord};
use tally_core::value::FieldValue;

use crate::error::CellError;

/// Rows per worksheet in the xlsx format.
pub const MAX_ROWS: u32 = 1_048_576;
/// Columns per worksheet in the xlsx format.
pub const MAX_COLS: u16 = 16_384;

/// Display format for a numeric first column.
pub const THOUSANDS_FORMAT: &str = "#,00";
/// Built-in short date format (number format id 14).
pub const SHORT_DATE_FORMAT: &str = "m/d/yy";

/// Days between the 1900 and 1904 date-system epochs.
const DATE1904_SHIFT_DAYS: f64 = 1462.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Which date system date serials are written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateSystem {
    #[default]
    Excel1900,
    Excel1904,
}

/// Zero-based cell coordinate. Orders row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellRef {
    pub row: u32,
    pub col: u16,
}

impl CellRef {
    /// Convert loop indices into a coordinate, checking the sheet limits.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::OutOfBounds`] past [`MAX_ROWS`] or [`MAX_COLS`].
    pub fn new(row: usize, col: usize) -> Result<Self, CellError> {
        let out_of_bounds = || CellError::OutOfBounds { row, col };
        let r = u32::try_from(row).map_err(|_| out_of_bounds())?;
        let c = u16::try_from(col).map_err(|_| out_of_bounds())?;
        if r >= MAX_ROWS || c >= MAX_COLS {
            return Err(out_of_bounds());
        }
        Ok(Self { row: r, col: c })
    }
}

impl fmt::Display for CellRef {
    /// A1 notation: `A1`, `H3`, `AA10`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut letters = Vec::new();
        let mut n = u32::from(self.col) + 1;
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push(char::from(b'A' + u8::try_from(rem).unwrap_or(0)));
            n = (n - 1) / 26;
        }
        letters.reverse();
        let column: String = letters.into_iter().collect();
        write!(f, "{column}{}", self.row + 1)
    }
}

/// Inclusive rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellRef,
    pub end: CellRef,
}

impl CellRange {
    const fn single(at: CellRef) -> Self {
        Self { start: at, end: at }
    }

    fn include(&mut self, at: CellRef) {
        self.start.row = self.start.row.min(at.row);
        self.start.col = self.start.col.min(at.col);
        self.end.row = self.end.row.max(at.row);
        self.end.col = self.end.col.max(at.col);
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// Cell type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Number,
    Boolean,
    String,
}

/// Cell payload after type inference. Dates have already become serials.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Boolean(bool),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    /// Display number format, if any.
    pub format: Option<&'static str>,
}

impl Cell {
    #[must_use]
    pub const fn kind(&self) -> CellKind {
        match self.value {
            CellValue::Number(_) => CellKind::Number,
            CellValue::Boolean(_) => CellKind::Boolean,
            CellValue::Text(_) => CellKind::String,
        }
    }
}

/// Sparse grid of typed cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellGrid {
    cells: BTreeMap<CellRef, Cell>,
    range: Option<CellRange>,
}

impl CellGrid {
    #[must_use]
    pub fn get(&self, row: u32, col: u16) -> Option<&Cell> {
        self.cells.get(&CellRef { row, col })
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (&CellRef, &Cell)> {
        self.cells.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Declared range, `None` for a grid with no rows.
    #[must_use]
    pub const fn range(&self) -> Option<CellRange> {
        self.range
    }
}

/// A row type the serializer can project.
pub trait SheetRow {
    type Field: Copy;

    /// Value of `field`, `None` when absent.
    fn value(&self, field: Self::Field) -> Option<FieldValue>;
}

impl SheetRow for TaskRecord {
    type Field = TaskField;

    fn value(&self, field: TaskField) -> Option<FieldValue> {
        self.field(field)
    }
}

/// A cell that could not be built.
#[derive(Debug, Clone, PartialEq)]
pub struct CellFailure {
    pub row: usize,
    pub col: usize,
    pub error: CellError,
}

/// Grid plus the cells that were skipped while building it.
#[derive(Debug, Clone, Default)]
pub struct GridBuild {
    pub grid: CellGrid,
    pub failures: Vec<CellFailure>,
}

/// Serial day number of `at` relative to 1899-12-30, shifted by 1462 days in
/// the 1904 system.
///
/// # Errors
///
/// Returns [`CellError::DateOutOfRange`] for dates before the epoch.
#[allow(clippy::cast_precision_loss)]
pub fn date_serial(at: NaiveDateTime, system: DateSystem) -> Result<f64, CellError> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or(CellError::DateOutOfRange(at))?;
    if at < epoch {
        return Err(CellError::DateOutOfRange(at));
    }
    let serial = (at - epoch).num_milliseconds() as f64 / MILLIS_PER_DAY;
    Ok(match system {
        DateSystem::Excel1900 => serial,
        DateSystem::Excel1904 => serial + DATE1904_SHIFT_DAYS,
    })
}

/// Infer the typed cell for one value.
///
/// Numbers in column 0 get [`THOUSANDS_FORMAT`]; the coupling is to the
/// position, not to any particular field.
///
/// # Errors
///
/// Returns [`CellError`] for non-finite numbers and out-of-range dates.
pub fn build_cell(value: FieldValue, col: usize, dates: DateSystem) -> Result<Cell, CellError> {
    let cell = match value {
        FieldValue::Number(n) if !n.is_finite() => return Err(CellError::NonFiniteNumber(n)),
        FieldValue::Number(n) => Cell {
            value: CellValue::Number(n),
            format: (col == 0).then_some(THOUSANDS_FORMAT),
        },
        FieldValue::Boolean(b) => Cell {
            value: CellValue::Boolean(b),
            format: None,
        },
        FieldValue::Date(at) => Cell {
            value: CellValue::Number(date_serial(at, dates)?),
            format: Some(SHORT_DATE_FORMAT),
        },
        FieldValue::Text(text) => Cell {
            value: CellValue::Text(text),
            format: None,
        },
    };
    Ok(cell)
}

/// Project `rows` through `fields` into a sparse grid.
///
/// Row `R`, column `C` holds `rows[R].value(fields[C])`. Absent values leave
/// no cell. Every visited coordinate widens the declared range. Cells that
/// fail to build are reported in [`GridBuild::failures`] and skipped.
pub fn build_grid<R: SheetRow>(rows: &[R], fields: &[R::Field], dates: DateSystem) -> GridBuild {
    let mut cells = BTreeMap::new();
    let mut range: Option<CellRange> = None;
    let mut failures = Vec::new();

    for (r, row) in rows.iter().enumerate() {
        for (c, &field) in fields.iter().enumerate() {
            let at = match CellRef::new(r, c) {
                Ok(at) => at,
                Err(error) => {
                    failures.push(CellFailure { row: r, col: c, error });
                    continue;
                }
            };
            range = Some(match range {
                Some(mut visited) => {
                    visited.include(at);
                    visited
                }
                None => CellRange::single(at),
            });

            let Some(value) = row.value(field) else {
                continue;
            };
            match build_cell(value, c, dates) {
                Ok(cell) => {
                    cells.insert(at, cell);
                }
                Err(error) => failures.push(CellFailure { row: r, col: c, error }),
            }
        }
    }

    GridBuild {
        grid: CellGrid {
            cells,
            range: range.filter(|range| range.end.col < MAX_COLS),
        },
        failures,
    }
}
