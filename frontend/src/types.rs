//! Common types used across the frontend application.
//!
//! This module centralizes type definitions to avoid duplication
//! and ensure consistency across components.
//!
//! # Categories
//!
//! - **Slot Types** - Upload slot identity and drag state
//! - **Grid Types** - Decoded spreadsheet cells
//! - **Submission Types** - Request, remote response, outcome
//! - **Error Types** - Validation and application errors

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::{ACCEPTED_EXTENSION, GENERIC_FAILURE};
use crate::services::ArtifactHandle;

// =============================================================================
// Slot Types
// =============================================================================

/// Logical input position of an upload widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotId {
    /// Training set (descriptors + response)
    Train,
    /// Test set (descriptors, response optional)
    Test,
}

impl SlotId {
    /// Identifier used in form fields and element ids.
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotId::Train => "train",
            SlotId::Test => "test",
        }
    }

    /// Human readable heading.
    pub fn title(&self) -> &'static str {
        match self {
            SlotId::Train => "Training set",
            SlotId::Test => "Test set",
        }
    }

    pub fn file_input_id(&self) -> String {
        format!("file-input-{}", self.as_str())
    }

    pub fn choose_button_id(&self) -> String {
        format!("choose-btn-{}", self.as_str())
    }

    pub fn drop_zone_id(&self) -> String {
        format!("drop-zone-{}", self.as_str())
    }

    pub fn file_name_id(&self) -> String {
        format!("file-name-{}", self.as_str())
    }

    pub fn preview_id(&self) -> String {
        format!("preview-{}", self.as_str())
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether something is being dragged over a drop target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Hovering,
}

// =============================================================================
// Grid Types
// =============================================================================

/// A single decoded spreadsheet cell.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    /// Missing value (never rendered as a placeholder word)
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(text) => f.write_str(text),
            Cell::Number(number) => write!(f, "{}", number),
            Cell::Bool(flag) => write!(f, "{}", flag),
        }
    }
}

/// Rows of the first sheet of a workbook, header row first.
///
/// Rows keep their own length: a row is never padded or cut to the
/// header's width.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PreviewGrid {
    rows: Vec<Vec<Cell>>,
}

impl PreviewGrid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// Submission Types
// =============================================================================

/// Everything sent to the calculation endpoint for one submit click.
#[derive(Clone, Debug)]
pub struct SubmissionRequest<F> {
    pub train_file: F,
    pub test_file: F,
    pub method: String,
    pub descriptor_type: String,
}

/// Raw answer of the calculation endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct RemoteResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RemoteResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Human readable reason of a failed response.
    ///
    /// Falls back to [`GENERIC_FAILURE`] when the body is not JSON or
    /// carries no (or an empty) `error` field.
    pub fn failure_message(&self) -> String {
        serde_json::from_slice::<RemoteErrorBody>(&self.body)
            .ok()
            .and_then(|body| body.error)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE.to_string())
    }
}

/// Error payload returned by the backend on non-success statuses.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RemoteErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Terminal result of a dispatched submission.
///
/// The pending phase lives on the controller, see
/// [`SubmissionController::is_pending`](crate::services::SubmissionController::is_pending).
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// The backend returned the output workbook.
    Success(ArtifactHandle),
    /// The calculation failed; the message has already been shown.
    Failure(String),
}

// =============================================================================
// Error Types
// =============================================================================

/// Recoverable input problems, always shown as a blocking notice.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Selected or dropped file is not an `.xlsx` workbook.
    #[error("Invalid file type! Please upload only .{} files.", ACCEPTED_EXTENSION)]
    InvalidExtension { file_name: String },

    /// Submit clicked with at least one slot empty.
    #[error("Please upload both training and test files.")]
    MissingFiles,
}

/// Frontend application errors.
///
/// The display string of each variant is the exact text shown to the user.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Non-success answer of the calculation endpoint.
    #[error("{0}")]
    Remote(String),

    /// Network or request building failure.
    #[error("Error: {0}")]
    Transport(String),

    /// Workbook bytes could not be decoded.
    #[error("Could not read spreadsheet: {0}")]
    Decode(String),

    /// Browser API failure (file reading, object URLs, DOM).
    #[error("Error: {0}")]
    Browser(String),
}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;
