//! Descriptor selection and the submit trigger.

use std::rc::Rc;

use leptos::*;
use web_sys::File;

use crate::config::{CALCULATE_URL, DESCRIPTOR_TYPES, SUBMIT_LABEL};
use crate::services::{
    AlertNotifier, BlobUrls, HttpTransport, PendingResults, SubmissionController,
    SubmitTrigger, UploadSlot,
};
use crate::SubmissionOutcome;

/// Submit button state held in signals.
#[derive(Clone, Copy)]
struct SignalTrigger {
    enabled: RwSignal<bool>,
    label: RwSignal<String>,
}

impl SubmitTrigger for SignalTrigger {
    fn set_enabled(&self, enabled: bool, label: &str) {
        self.enabled.set(enabled);
        self.label.set(label.to_string());
    }
}

#[component]
pub fn SubmitSection(
    train: RwSignal<UploadSlot<File>>,
    test: RwSignal<UploadSlot<File>>,
    /// Receives each successful calculation.
    results: RwSignal<PendingResults>,
) -> impl IntoView {
    let descriptor_type = create_rw_signal(DESCRIPTOR_TYPES[0].to_string());
    let enabled = create_rw_signal(true);
    let label = create_rw_signal(SUBMIT_LABEL.to_string());

    let controller = Rc::new(SubmissionController::new(
        HttpTransport::new(CALCULATE_URL),
        AlertNotifier,
        SignalTrigger { enabled, label },
        BlobUrls,
    ));

    let on_submit = move |_| {
        let controller = Rc::clone(&controller);
        let train_file = train.with_untracked(|s| s.selected_file().cloned());
        let test_file = test.with_untracked(|s| s.selected_file().cloned());
        let descriptor = descriptor_type.get_untracked();

        spawn_local(async move {
            if let Some(SubmissionOutcome::Success(handle)) =
                controller.submit(train_file, test_file, &descriptor).await
            {
                results.update(|pending| pending.push(handle));
            }
        });
    };

    view! {
        <div class="submit-section">
            <label for="descriptor-type">"Descriptor type"</label>
            <select
                id="descriptor-type"
                prop:value=move || descriptor_type.get()
                on:change=move |ev| descriptor_type.set(event_target_value(&ev))
            >
                {DESCRIPTOR_TYPES
                    .iter()
                    .map(|option| view! { <option value=*option>{*option}</option> })
                    .collect_view()}
            </select>
            <button
                class="btn btn-primary"
                id="final_submit"
                disabled=move || !enabled.get()
                on:click=on_submit
            >
                {move || label.get()}
            </button>
        </div>
    }
}
