//! # RASAR - read-across structure-activity descriptor service
//!
//! Computes read-across descriptors for a test set of compounds against a
//! training set, from two `.xlsx` workbooks, and returns them as a workbook.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ train.xlsx  │────▶│   Parser    │────▶│    RASAR    │────▶│   Export    │
//! │ test.xlsx   │     │  (calamine) │     │ (kernel+CTC)│     │ Train/Test  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rasar::{calculate_workbooks, DescriptorType, Method};
//!
//! let train = std::fs::read("train.xlsx")?;
//! let test = std::fs::read("test.xlsx")?;
//! let result = calculate_workbooks(&train, &test, Method::Gaussian, DescriptorType::UserDefined)?;
//! std::fs::write("rasar_descriptors_output.xlsx", result)?;
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`config`] - Server settings from the environment
//! - [`models`] - Frames, options and result tables
//! - [`parser`] - `.xlsx` to descriptor frame
//! - [`rasar`] - The descriptor calculation
//! - [`export`] - Result workbook writer
//! - [`pipeline`] - Bytes in, workbook out
//! - [`api`] - HTTP API server

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Reading and writing workbooks
pub mod export;
pub mod parser;

// Calculation
pub mod pipeline;
pub mod rasar;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ExportError, PipelineError, RasarError, ServerError, WorkbookError,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{CellValue, DescriptorFrame, DescriptorType, Method, Metric, MetricTable};

// =============================================================================
// Re-exports - Calculation
// =============================================================================

pub use config::ServerConfig;
pub use export::{write_results, write_results_file};
pub use parser::{parse_workbook, parse_workbook_file};
pub use pipeline::{calculate_files, calculate_workbooks};
pub use rasar::{calculate_rasar, rasar_descriptors, RasarOutput, MAX_CLOSE_TRAINING};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{ErrorBody, HealthResponse, OUTPUT_FILENAME, XLSX_MIME};

// Server
pub mod server {
    pub use crate::api::server::{router, start_server};
}
