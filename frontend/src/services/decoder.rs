//! Spreadsheet decoding.
//!
//! Turns raw workbook bytes into the rows of the first sheet. Only the
//! first sheet is ever read.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use crate::{AppError, AppResult, Cell, PreviewGrid};

/// Decodes workbook bytes into a grid of cells.
pub trait SpreadsheetDecoder {
    fn decode(&self, bytes: &[u8]) -> AppResult<PreviewGrid>;
}

/// `.xlsx` decoder backed by calamine.
#[derive(Clone, Copy, Debug, Default)]
pub struct XlsxDecoder;

impl SpreadsheetDecoder for XlsxDecoder {
    fn decode(&self, bytes: &[u8]) -> AppResult<PreviewGrid> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
            .map_err(|e| AppError::Decode(e.to_string()))?;

        let Some(range) = workbook.worksheet_range_at(0) else {
            return Ok(PreviewGrid::default());
        };
        let range = range.map_err(|e| AppError::Decode(e.to_string()))?;

        let rows = range
            .rows()
            .map(|row| {
                let mut cells: Vec<Cell> = row.iter().map(to_cell).collect();
                // Rows end at their last filled cell.
                while matches!(cells.last(), Some(Cell::Empty)) {
                    cells.pop();
                }
                cells
            })
            .collect();

        Ok(PreviewGrid::new(rows))
    }
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(text) => Cell::Text(text.clone()),
        Data::Float(number) => Cell::Number(*number),
        Data::Int(number) => Cell::Number(*number as f64),
        Data::Bool(flag) => Cell::Bool(*flag),
        // Dates keep their serial number, like the sheet stores them.
        Data::DateTime(date) => Cell::Number(date.as_f64()),
        other => Cell::Text(other.to_string()),
    }
}
