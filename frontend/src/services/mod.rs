//! Core services of the calculator.
//!
//! # Services
//!
//! - [`slot`] - Upload slot state machine (selection, drag & drop, preview)
//! - [`decoder`] - `.xlsx` decoding of the first sheet
//! - [`preview`] - Bounded preview rendering
//! - [`submission`] - Submission controller (single flight, always-restored trigger)
//! - [`artifact`] - Revocable result handle and the discard/export decision
//! - [`notify`] - Blocking user notices
//! - [`upload`] - Browser file reading and the multipart HTTP transport

pub mod slot;
pub mod decoder;
pub mod preview;
pub mod submission;
pub mod artifact;
pub mod notify;
pub mod upload;

#[cfg(test)]
pub(crate) mod fakes;

pub use slot::*;
pub use decoder::*;
pub use preview::*;
pub use submission::*;
pub use artifact::*;
pub use notify::*;
pub use upload::*;
