//! `.xlsx` encoder backed by `rust_xlsxwriter`.

use std::collections::HashMap;
use std::path::Path;

use rust_xlsxwriter::{Format, Worksheet};

use crate::error::EncodeError;
use crate::grid::{CellGrid, CellValue};
use crate::workbook::{Workbook, WorkbookEncoder};

/// Writes workbooks as Office Open XML spreadsheets.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxEncoder;

impl WorkbookEncoder for XlsxEncoder {
    fn encode(&self, workbook: &Workbook, path: &Path) -> Result<(), EncodeError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut book = rust_xlsxwriter::Workbook::new();
        for (name, grid) in workbook.sheets() {
            let sheet = book.add_worksheet();
            sheet.set_name(name)?;
            write_grid(sheet, grid)?;
        }
        book.save(path)?;
        Ok(())
    }
}

fn write_grid(sheet: &mut Worksheet, grid: &CellGrid) -> Result<(), EncodeError> {
    let mut formats: HashMap<&'static str, Format> = HashMap::new();

    for (at, cell) in grid.iter() {
        match (&cell.value, cell.format) {
            (CellValue::Number(n), Some(code)) => {
                let format = formats
                    .entry(code)
                    .or_insert_with(|| Format::new().set_num_format(code));
                sheet.write_number_with_format(at.row, at.col, *n, format)?;
            }
            (CellValue::Number(n), None) => {
                sheet.write_number(at.row, at.col, *n)?;
            }
            (CellValue::Boolean(b), _) => {
                sheet.write_boolean(at.row, at.col, *b)?;
            }
            (CellValue::Text(text), _) => {
                sheet.write_string(at.row, at.col, text)?;
            }
        }
    }
    Ok(())
}
