//! Error types for the RASAR calculation service.
//!
//! - [`WorkbookError`] - reading an uploaded `.xlsx` into a descriptor frame
//! - [`RasarError`] - descriptor calculation errors
//! - [`ExportError`] - writing the result workbook
//! - [`PipelineError`] - bytes in, workbook out; wraps the three above
//! - [`ServerError`] - HTTP layer
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Workbook Errors
// =============================================================================

/// Errors while reading a descriptor workbook.
#[derive(Debug, Error)]
pub enum WorkbookError {
    /// The bytes are not a readable `.xlsx` workbook.
    #[error("Could not open workbook: {0}")]
    Open(String),

    /// The workbook has no worksheet at all.
    #[error("Workbook contains no worksheet")]
    NoSheet,

    /// A descriptor cell holds something other than a number.
    #[error("Row {row}, column '{column}': expected a number, found '{value}'")]
    NonNumeric {
        row: usize,
        column: String,
        value: String,
    },

    /// Two columns share one header.
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Calculation Errors
// =============================================================================

/// Errors during the RASAR descriptor calculation.
#[derive(Debug, Error)]
pub enum RasarError {
    /// A frame has no rows or no columns.
    #[error("Uploaded files are empty or invalid")]
    EmptyFrame,

    /// Unknown similarity method.
    #[error("Unknown calculation method: {0}")]
    UnknownMethod(String),

    /// Unknown descriptor type.
    #[error("Unknown descriptor type: {0}")]
    UnknownDescriptorType(String),

    /// Descriptor type requiring structure-derived descriptors.
    #[error("{0} require SMILES-based descriptor generation, which this server does not provide; upload user defined descriptors instead")]
    UnsupportedDescriptorType(String),

    /// The query set does not carry a training descriptor.
    #[error("Test set is missing descriptor column '{0}'")]
    MissingColumn(String),

    /// Query and training descriptors differ in width.
    #[error("Test set has {query} descriptor columns, training set has {train}")]
    ColumnMismatch { train: usize, query: usize },
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors while writing the result workbook.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Workbook writer failure.
    #[error("Failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// More rows or columns than a worksheet holds.
    #[error("Result table too large for a worksheet: {0}")]
    TooLarge(String),

    /// IO error.
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Pipeline Errors
// =============================================================================

/// Errors of a full calculation, from uploaded bytes to result workbook.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Upload could not be read.
    #[error("{0}")]
    Workbook(#[from] WorkbookError),

    /// Calculation rejected the input.
    #[error("{0}")]
    Rasar(#[from] RasarError),

    /// Result could not be written.
    #[error("{0}")]
    Export(#[from] ExportError),
}

impl PipelineError {
    /// Whether the input, rather than the service, is at fault.
    pub fn is_input_error(&self) -> bool {
        matches!(self, PipelineError::Workbook(_) | PipelineError::Rasar(_))
    }
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Calculation failed.
    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    /// Invalid request.
    #[error("{0}")]
    BadRequest(String),

    /// Server internal error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Whether the caller sent something unusable.
    pub fn is_client_error(&self) -> bool {
        match self {
            ServerError::Pipeline(err) => err.is_input_error(),
            ServerError::BadRequest(_) => true,
            ServerError::Internal(_) => false,
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for workbook reading.
pub type WorkbookResult<T> = Result<T, WorkbookError>;

/// Result type for the calculation.
pub type RasarResult<T> = Result<T, RasarError>;

/// Result type for export.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for a full calculation.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // RasarError -> PipelineError -> ServerError
        let err: PipelineError = RasarError::EmptyFrame.into();
        let err: ServerError = err.into();
        assert_eq!(err.to_string(), "Uploaded files are empty or invalid");
        assert!(err.is_client_error());

        let err: ServerError = PipelineError::from(WorkbookError::NoSheet).into();
        assert!(err.to_string().contains("no worksheet"));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_non_numeric_format() {
        let err = WorkbookError::NonNumeric {
            row: 3,
            column: "logP".into(),
            value: "n/a".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Row 3"));
        assert!(msg.contains("logP"));
        assert!(msg.contains("n/a"));
    }

    #[test]
    fn test_server_side_failures() {
        assert!(!ServerError::Internal("worker panicked".into()).is_client_error());

        let err: ServerError = PipelineError::from(ExportError::TooLarge("2000000 rows".into())).into();
        assert!(!err.is_client_error());
        assert!(ServerError::BadRequest("bad multipart".into()).is_client_error());
    }
}
