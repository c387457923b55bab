//! UI Components for the RASAR calculator.
//!
//! # Layout Components
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadWidget`] - Spreadsheet upload with drag & drop, one per slot
//! - [`PreviewSurface`] - Bounded table preview of the selected workbook
//! - [`SubmitSection`] - Descriptor selection and submit trigger
//! - [`ResultPopup`] - Discard/export decision for a finished calculation

mod hero;
mod upload;
mod preview;
mod submit;
mod result;
mod footer;

pub use hero::*;
pub use upload::*;
pub use preview::*;
pub use submit::*;
pub use result::*;
pub use footer::*;
