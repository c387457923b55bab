//! REST API types for frontend integration.

use serde::{Deserialize, Serialize};

/// MIME type of the result workbook.
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Download name of the result workbook.
pub const OUTPUT_FILENAME: &str = "rasar_descriptors_output.xlsx";

/// Multipart field names of `POST /calculate_rasar`.
pub mod fields {
    pub const TRAIN_FILE: &str = "train_file";
    pub const TEST_FILE: &str = "test_file";
    pub const METHOD: &str = "method";
    pub const DESCRIPTOR_TYPE: &str = "descriptor_type";
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// Answer of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub endpoints: Vec<String>,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            service: "rasar".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            endpoints: vec!["GET /health".into(), "POST /calculate_rasar".into()],
        }
    }
}

/// `Content-Disposition` value announcing the result download.
pub fn attachment_disposition() -> String {
    format!("attachment; filename=\"{}\"", OUTPUT_FILENAME)
}
