//! Success popup offering to discard or export the result.

use leptos::*;

use crate::services::{
    AlertNotifier, BlobUrls, Notifier, PendingResults, ResultChoice, ResultPresenter,
};

#[component]
pub fn ResultPopup(results: RwSignal<PendingResults>) -> impl IntoView {
    let presenter = ResultPresenter::new(BlobUrls);

    let decide = move |choice: ResultChoice| {
        let mut taken = None;
        results.update(|pending| taken = pending.take_front());
        // A second click cannot reach here with the same handle.
        if let Some(handle) = taken {
            if let Err(err) = presenter.resolve(handle, choice) {
                AlertNotifier.report(&err);
            }
        }
    };

    view! {
        <Show
            when=move || results.with(|pending| !pending.is_empty())
            fallback=|| ()
        >
            <div class="modal-backdrop">
                <div class="modal">
                    <p class="modal-message">"Calculation completed successfully!"</p>
                    <div class="modal-actions">
                        <button class="btn btn-secondary" on:click=move |_| decide(ResultChoice::Discard)>
                            "OK"
                        </button>
                        <button class="btn btn-primary" on:click=move |_| decide(ResultChoice::Export)>
                            "Export"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
