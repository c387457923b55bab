//! Result workbook writer.
//!
//! Two sheets, `Train` then `Test`. Each starts with a header row (index
//! name, then metric names); the identifier is the first column. NaN cells
//! stay blank and infinities are written as `inf` / `-inf`.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::error::{ExportError, ExportResult};
use crate::models::{CellValue, MetricTable};
use crate::rasar::RasarOutput;

/// Sheet holding the training set against itself.
pub const TRAIN_SHEET: &str = "Train";
/// Sheet holding the test set against the training set.
pub const TEST_SHEET: &str = "Test";

/// Write both tables to an in-memory `.xlsx`.
pub fn write_results(output: &RasarOutput) -> ExportResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    write_table(workbook.add_worksheet().set_name(TRAIN_SHEET)?, &output.train, &header)?;
    write_table(workbook.add_worksheet().set_name(TEST_SHEET)?, &output.test, &header)?;

    let buffer = workbook.save_to_buffer()?;
    log::debug!("Result workbook written ({} bytes)", buffer.len());
    Ok(buffer)
}

/// Write both tables to a file.
pub fn write_results_file(output: &RasarOutput, path: impl AsRef<Path>) -> ExportResult<()> {
    let buffer = write_results(output)?;
    std::fs::write(path, buffer)?;
    Ok(())
}

fn write_table(sheet: &mut Worksheet, table: &MetricTable, header: &Format) -> ExportResult<()> {
    let too_large = || {
        ExportError::TooLarge(format!(
            "{} rows x {} columns",
            table.n_rows() + 1,
            table.metrics.len() + 1
        ))
    };

    sheet.write_string_with_format(0, 0, table.index_name.as_str(), header)?;
    for (c, label) in table.headers().into_iter().enumerate() {
        let col = u16::try_from(c + 1).map_err(|_| too_large())?;
        sheet.write_string_with_format(0, col, label, header)?;
    }

    for (r, (id, values)) in table.ids.iter().zip(&table.rows).enumerate() {
        let row = u32::try_from(r + 1).map_err(|_| too_large())?;
        match id {
            CellValue::Text(s) => sheet.write_string(row, 0, s.as_str())?,
            CellValue::Number(n) => sheet.write_number(row, 0, *n)?,
        };
        for (c, value) in values.iter().enumerate() {
            let col = u16::try_from(c + 1).map_err(|_| too_large())?;
            write_value(sheet, row, col, *value)?;
        }
    }
    Ok(())
}

fn write_value(sheet: &mut Worksheet, row: u32, col: u16, value: f64) -> ExportResult<()> {
    if value.is_nan() {
        return Ok(());
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "inf" } else { "-inf" };
        sheet.write_string(row, col, text)?;
    } else {
        sheet.write_number(row, col, value)?;
    }
    Ok(())
}
