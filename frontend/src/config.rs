//! Application configuration.
//!
//! Centralized configuration for the RASAR calculator frontend.
//! In development, these are hardcoded. In production, they could be
//! injected at build time.

/// Calculation endpoint of the RASAR backend.
///
/// Receives the multipart submission and answers with the output workbook.
pub const CALCULATE_URL: &str = "http://localhost:5000/calculate_rasar";

/// Similarity method forwarded with every submission.
pub const CALCULATION_METHOD: &str = "Gaussian Kernel";

/// Descriptor types offered by the selector. The first one is preselected.
pub const DESCRIPTOR_TYPES: [&str; 3] = [
    "User Defined Descriptors",
    "Selected RDKit Descriptors",
    "All RDKit Descriptors",
];

/// The only spreadsheet extension accepted by the upload widgets.
pub const ACCEPTED_EXTENSION: &str = "xlsx";

/// Number of body rows shown under the header in a preview.
pub const PREVIEW_BODY_ROWS: usize = 7;

/// Submit trigger label while idle.
pub const SUBMIT_LABEL: &str = "🚀 Submit";

/// Submit trigger label while a calculation is in flight.
pub const PROCESSING_LABEL: &str = "Processing...";

/// Message used when the backend fails without saying why.
pub const GENERIC_FAILURE: &str = "Calculation failed";

/// Filename used when the user exports the calculation result.
pub const OUTPUT_FILENAME: &str = "rasar_descriptors_output.xlsx";

/// MIME type of the result workbook.
pub const ARTIFACT_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
