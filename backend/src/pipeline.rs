//! End-to-end calculation: uploaded workbooks in, result workbook out.
//!
//! ```text
//! train.xlsx ─┐                      ┌─▶ Train sheet
//!             ├─▶ parse ─▶ rasar ────┤
//! test.xlsx  ─┘                      └─▶ Test sheet
//! ```

use std::path::Path;

use crate::error::PipelineResult;
use crate::export::{write_results, write_results_file};
use crate::models::{DescriptorType, Method};
use crate::parser::{parse_workbook, parse_workbook_file};
use crate::rasar::{calculate_rasar, RasarOutput};

/// Run the calculation on two workbook buffers and return the result workbook.
pub fn calculate_workbooks(
    train: &[u8],
    test: &[u8],
    method: Method,
    descriptor_type: DescriptorType,
) -> PipelineResult<Vec<u8>> {
    let train = parse_workbook(train)?;
    let test = parse_workbook(test)?;
    log::info!(
        "Calculating RASAR descriptors: {} training x {} test rows ({}, {})",
        train.n_rows(),
        test.n_rows(),
        method,
        descriptor_type
    );

    let output = calculate_rasar(&train, &test, descriptor_type, method)?;
    Ok(write_results(&output)?)
}

/// Same as [`calculate_workbooks`], reading and writing files.
pub fn calculate_files(
    train: impl AsRef<Path>,
    test: impl AsRef<Path>,
    output: impl AsRef<Path>,
    method: Method,
    descriptor_type: DescriptorType,
) -> PipelineResult<RasarOutput> {
    let train = parse_workbook_file(train)?;
    let test = parse_workbook_file(test)?;
    let result = calculate_rasar(&train, &test, descriptor_type, method)?;
    write_results_file(&result, output)?;
    Ok(result)
}
