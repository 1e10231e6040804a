//! Workbook container and the encoder seam.

use std::collections::HashMap;
use std::path::Path;

use crate::error::EncodeError;
use crate::grid::CellGrid;

/// Named sheets in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    sheet_names: Vec<String>,
    sheets: HashMap<String, CellGrid>,
}

impl Workbook {
    /// A workbook with exactly one sheet.
    #[must_use]
    pub fn single(name: impl Into<String>, grid: CellGrid) -> Self {
        let name = name.into();
        let mut sheets = HashMap::with_capacity(1);
        sheets.insert(name.clone(), grid);
        Self {
            sheet_names: vec![name],
            sheets,
        }
    }

    #[must_use]
    pub fn sheet(&self, name: &str) -> Option<&CellGrid> {
        self.sheets.get(name)
    }

    #[must_use]
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    /// Sheets in display order.
    pub fn sheets(&self) -> impl Iterator<Item = (&str, &CellGrid)> {
        self.sheet_names
            .iter()
            .filter_map(|name| self.sheets.get(name).map(|grid| (name.as_str(), grid)))
    }
}

/// Writes a [`Workbook`] to a file.
pub trait WorkbookEncoder {
    /// # Errors
    ///
    /// Returns [`EncodeError`] when the file cannot be produced.
    fn encode(&self, workbook: &Workbook, path: &Path) -> Result<(), EncodeError>;
}
