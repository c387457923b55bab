//! Preview surface of an upload widget.

use leptos::*;

use crate::services::{PreviewState, PreviewTable, RenderedPreview};

#[component]
pub fn PreviewSurface(state: Signal<PreviewState>) -> impl IntoView {
    move || match state.get() {
        PreviewState::Blank => ().into_view(),
        PreviewState::Loading => view! { <em>"Loading preview..."</em> }.into_view(),
        PreviewState::Failed(message) => {
            view! { <p class="preview-error">{message}</p> }.into_view()
        }
        PreviewState::Ready(RenderedPreview::Empty) => {
            view! { <p>{RenderedPreview::EMPTY_NOTICE}</p> }.into_view()
        }
        PreviewState::Ready(RenderedPreview::Table(table)) => {
            view! { <TableView table=table/> }.into_view()
        }
    }
}

#[component]
fn TableView(table: PreviewTable) -> impl IntoView {
    view! {
        <table>
            <thead>
                <tr>
                    {table.header.into_iter().map(|column| view! { <th>{column}</th> }).collect_view()}
                </tr>
            </thead>
            <tbody>
                {table
                    .body
                    .into_iter()
                    .map(|row| {
                        view! {
                            <tr>
                                {row.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}
