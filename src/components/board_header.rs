//! Board Header Component
//!
//! Title, item counts and load state.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn BoardHeader() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    let summary = move || store.board().with(|board| board.summary());

    view! {
        <header class="board-header">
            <h1>"Systems"</h1>
            <div class="board-counts">
                <span class="count total">{move || format!("{} total", summary().total)}</span>
                <span class="count active">{move || format!("{} active", summary().active)}</span>
                <span class="count inactive">{move || format!("{} inactive", summary().inactive)}</span>
            </div>
            <Show when=move || store.loading().get()>
                <span class="board-loading">"Loading..."</span>
            </Show>
            {move || store.load_error().get().map(|error| view! {
                <div class="board-error">
                    <span>{format!("Could not load items: {}", error)}</span>
                    <button on:click=move |_| ctx.reload()>"Retry"</button>
                </div>
            })}
        </header>
    }
}
