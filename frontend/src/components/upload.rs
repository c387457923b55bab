//! Spreadsheet upload widget with drag & drop support.
//!
//! One widget per slot. It only touches its own slot signal.

use leptos::html::Input;
use leptos::*;
use web_sys::{DragEvent, Event, File, HtmlInputElement};

use super::PreviewSurface;
use crate::services::{
    read_file_bytes, AlertNotifier, Notifier, SelectionTicket, SpreadsheetDecoder, UploadSlot,
    XlsxDecoder,
};
use crate::{AppResult, DragState, PreviewGrid, ValidationError};

#[component]
pub fn UploadWidget(upload: RwSignal<UploadSlot<File>>) -> impl IntoView {
    let id = upload.with_untracked(|s| s.id());
    let input_ref = create_node_ref::<Input>();

    // Handler pour le sélecteur de fichier
    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            let selection = upload.try_update(|s| s.choose(file));
            start_preview(upload, input_ref, selection);
        }
    };

    let on_drag_over = move |ev: DragEvent| {
        ev.prevent_default();
        upload.update(|s| s.drag_over());
    };

    let on_drag_leave = move |_: DragEvent| {
        upload.update(|s| s.drag_leave());
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        let files: Vec<File> = ev
            .data_transfer()
            .and_then(|transfer| transfer.files())
            .map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
            .unwrap_or_default();
        let selection = upload.try_update(|s| s.drop_files(files)).flatten();
        start_preview(upload, input_ref, selection);
    };

    let open_picker = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    view! {
        <div class="upload-widget">
            <h3 class="upload-title">{id.title()}</h3>
            <div
                class="drop-zone"
                id=id.drop_zone_id()
                class:hovering=move || upload.with(|s| s.drag_state() == DragState::Hovering)
                on:dragover=on_drag_over
                on:dragleave=on_drag_leave
                on:drop=on_drop
            >
                <div class="upload-icon">"📂"</div>
                <div class="upload-text">"Drag & drop an .xlsx file here"</div>
                <button type="button" class="choose-btn" id=id.choose_button_id() on:click=open_picker>
                    "Choose file"
                </button>
                <input
                    type="file"
                    id=id.file_input_id()
                    accept=".xlsx"
                    style="display:none"
                    node_ref=input_ref
                    on:change=on_file_change
                />
            </div>
            <div class="file-name" id=id.file_name_id()>
                {move || upload.with(|s| s.file_label())}
            </div>
            <div class="preview" id=id.preview_id()>
                <PreviewSurface state=Signal::derive(move || upload.with(|s| s.preview().clone()))/>
            </div>
        </div>
    }
}

/// Report a rejected selection, or decode the accepted one in the background.
fn start_preview(
    slot: RwSignal<UploadSlot<File>>,
    input_ref: NodeRef<Input>,
    selection: Option<Result<SelectionTicket, ValidationError>>,
) {
    let Some(selection) = selection else {
        return;
    };
    // Re-picking the same file must fire `change` again.
    if let Some(input) = input_ref.get_untracked() {
        input.set_value("");
    }

    match selection {
        Err(err) => AlertNotifier.report(&err.into()),
        Ok(ticket) => {
            let Some(file) = slot.with_untracked(|s| s.selected_file().cloned()) else {
                return;
            };
            spawn_local(async move {
                let decoded = load_grid(&file).await;
                if let Some(Err(err)) = slot.try_update(|s| s.finish_preview(ticket, decoded)) {
                    AlertNotifier.report(&err);
                }
            });
        }
    }
}

async fn load_grid(file: &File) -> AppResult<PreviewGrid> {
    let bytes = read_file_bytes(file).await?;
    XlsxDecoder.decode(&bytes)
}
