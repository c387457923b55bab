//! `.xlsx` to [`DescriptorFrame`] reader.
//!
//! Reads the first worksheet only. The header row names the columns, the
//! first column holds row identifiers, every other cell must be numeric.
//! Blank rows are skipped and empty cells become NaN.

use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Reader, Xlsx};

use crate::error::{WorkbookError, WorkbookResult};
use crate::models::{CellValue, DescriptorFrame};

/// Parse workbook bytes into a descriptor frame.
pub fn parse_workbook(bytes: &[u8]) -> WorkbookResult<DescriptorFrame> {
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes)).map_err(|e| WorkbookError::Open(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(WorkbookError::NoSheet)?
        .map_err(|e| WorkbookError::Open(e.to_string()))?;

    // 1-based sheet row of the first row in the range, for messages.
    let first_row = range.start().map(|(r, _)| r as usize + 1).unwrap_or(1);

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(DescriptorFrame::new("", vec![], vec![], vec![]));
    };

    let index_name = header.first().map(header_name).unwrap_or_default();
    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, cell)| match header_name(cell) {
            name if name.is_empty() => format!("Unnamed: {}", i),
            name => name,
        })
        .collect();

    let mut seen = HashSet::new();
    for name in &columns {
        if !seen.insert(name.as_str()) {
            return Err(WorkbookError::DuplicateColumn(name.clone()));
        }
    }

    let mut ids = Vec::new();
    let mut values = Vec::new();

    for (offset, row) in rows.enumerate() {
        if row.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        let sheet_row = first_row + offset + 1;

        ids.push(row.first().map(to_identifier).unwrap_or(CellValue::Text(String::new())));

        let numbers = columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let cell = row.get(i + 1).unwrap_or(&Data::Empty);
                to_number(cell).ok_or_else(|| WorkbookError::NonNumeric {
                    row: sheet_row,
                    column: column.clone(),
                    value: cell.to_string(),
                })
            })
            .collect::<WorkbookResult<Vec<f64>>>()?;
        values.push(numbers);
    }

    log::debug!(
        "Parsed workbook: {} rows x {} columns (index '{}')",
        ids.len(),
        columns.len(),
        index_name
    );

    Ok(DescriptorFrame::new(index_name, ids, columns, values))
}

/// Read and parse a workbook from disk.
pub fn parse_workbook_file(path: impl AsRef<Path>) -> WorkbookResult<DescriptorFrame> {
    let bytes = std::fs::read(path)?;
    parse_workbook(&bytes)
}

fn header_name(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

fn to_identifier(cell: &Data) -> CellValue {
    match cell {
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Empty => CellValue::Text(String::new()),
        other => CellValue::Text(other.to_string()),
    }
}

fn to_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Data::Empty => Some(f64::NAN),
        // Numbers stored as text
        Data::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
