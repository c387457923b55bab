//! RASAR Calculator - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for previewing a training and a test workbook
//! and submitting both to the RASAR descriptor backend.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                 │
//! │  ├── Hero (title, description)                              │
//! │  ├── UploadWidget (train)   UploadWidget (test)             │
//! │  │     └── PreviewSurface        └── PreviewSurface         │
//! │  ├── SubmitSection (descriptor type, submit trigger)        │
//! │  └── ResultPopup (OK / Export, after a successful run)      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (SlotId, PreviewGrid, SubmissionRequest, errors)
//! - [`components`] - UI components (UploadWidget, SubmitSection, etc.)
//! - [`services`] - Slot state, decoding, preview, submission, artifacts

use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use web_sys::File;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Slots
    SlotId, DragState,
    // Grid
    Cell, PreviewGrid,
    // Submission
    SubmissionRequest, SubmissionOutcome, RemoteResponse, RemoteErrorBody,
    // Errors
    AppError, AppResult, ValidationError,
};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// Install logging and mount [`App`] on the page body.
pub fn run() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 RASAR Calculator - Starting Leptos App");

    // Mount the application
    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="RASAR Calculator"/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    // One isolated slot per widget; the submit section reads both.
    let train = create_rw_signal(UploadSlot::<File>::new(SlotId::Train));
    let test = create_rw_signal(UploadSlot::<File>::new(SlotId::Test));
    let results = create_rw_signal(PendingResults::default());

    view! {
        <div class="container">
            <Hero/>

            <div class="upload-grid">
                <UploadWidget upload=train/>
                <UploadWidget upload=test/>
            </div>

            <SubmitSection train=train test=test results=results/>
        </div>

        <ResultPopup results=results/>

        <Footer/>
    }
}
