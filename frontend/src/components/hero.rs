//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"RASAR Descriptor Calculator"</h1>
            <p class="subtitle">
                "Upload a training set and a test set as .xlsx workbooks "
                "(identifier column first, response last in the training set), "
                "pick a descriptor type and download the computed RASAR descriptors."
            </p>
        </div>
    }
}
