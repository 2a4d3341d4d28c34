//! Notice Bar Component
//!
//! Transient success/failure messages; each one removes itself after a
//! timeout or on click.

use leptos::prelude::*;

use crate::store::{store_dismiss, use_app_store, AppStateStoreFields};

#[component]
pub fn NoticeBar() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="notice-bar">
            <For
                each=move || store.notices().get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div class=notice.kind.class() role="status">
                            <span class="notice-text">{notice.text}</span>
                            <button class="notice-close" on:click=move |_| store_dismiss(&store, id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
