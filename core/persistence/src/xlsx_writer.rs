//! FILENAME: core/persistence/src/xlsx_writer.rs
//!
//! Workbook export via rust_xlsxwriter. One worksheet, header row bold,
//! dates written as YYYY-MM-DD text so re-imports and spreadsheet apps
//! agree on what they see.

use dataset::{DataTable, DataValue};
use rust_xlsxwriter::{Format, Workbook};

use crate::error::PersistenceError;

/// Worksheet name for exported data, matching the dashboard's download.
pub const SHEET_NAME: &str = "数据";

pub fn write_xlsx(table: &DataTable) -> Result<Vec<u8>, PersistenceError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    for (col, header) in table.headers().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }

    for (row, cells) in table.rows().enumerate() {
        let xlsx_row = (row + 1) as u32;
        for (col, value) in cells.iter().enumerate() {
            let xlsx_col = col as u16;
            match value {
                DataValue::Empty => {}
                DataValue::Number(n) => {
                    worksheet.write_number(xlsx_row, xlsx_col, *n)?;
                }
                DataValue::Text(s) => {
                    worksheet.write_string(xlsx_row, xlsx_col, s)?;
                }
                DataValue::Date(d) => {
                    worksheet.write_string(xlsx_row, xlsx_col, d.format("%Y-%m-%d").to_string())?;
                }
                DataValue::Boolean(b) => {
                    worksheet.write_boolean(xlsx_row, xlsx_col, *b)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

// ============================================================================
// TESTS
// ============================================================================
