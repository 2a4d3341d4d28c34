//! New Item Form Component
//!
//! Form for creating new toolbox items with type selector. New items land in
//! the default bucket.

use leptos::prelude::*;
use leptos::task::spawn_local;

use ops_hub_core::{create_item, ItemType, NewToolboxItem};

use crate::commands::TauriStore;
use crate::store::{store_notify, use_app_store, AppStateStoreFields, NoticeKind};

#[component]
pub fn NewItemForm() -> impl IntoView {
    let store = use_app_store();

    let (new_name, set_new_name) = signal(String::new());
    let (new_description, set_new_description) = signal(String::new());
    let (item_type, set_item_type) = signal(ItemType::System);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_name.get();
        if name.trim().is_empty() { return; }
        let draft = NewToolboxItem::new(name, item_type.get()).with_description(new_description.get());

        spawn_local(async move {
            match create_item(&TauriStore, draft).await {
                Ok(created) => {
                    set_new_name.set(String::new());
                    set_new_description.set(String::new());
                    // The board only shows system items
                    if created.item_type == ItemType::System {
                        store.board().write().upsert(created);
                    }
                    store_notify(&store, NoticeKind::Success, "Item created");
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[FORM] Create failed: {}", e).into());
                    store_notify(&store, NoticeKind::Error, format!("Failed to create item: {}", e));
                }
            }
        });
    };

    view! {
        <form class="new-item-form" on:submit=on_submit>
            <div class="new-item-row">
                <input
                    type="text"
                    placeholder="Add new item..."
                    prop:value=move || new_name.get()
                    on:input=move |ev| set_new_name.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Description (optional)"
                    prop:value=move || new_description.get()
                    on:input=move |ev| set_new_description.set(event_target_value(&ev))
                />
                <button type="submit">"Add"</button>
            </div>

            <div class="type-selector-row">
                {ItemType::ALL.iter().map(|value| {
                    let value = *value;
                    let is_selected = move || item_type.get() == value;
                    view! {
                        <button
                            type="button"
                            data-icon=value.icon()
                            class=move || if is_selected() { "type-btn small active" } else { "type-btn small" }
                            on:click=move |_| set_item_type.set(value)
                        >
                            {value.as_str()}
                        </button>
                    }
                }).collect_view()}
            </div>
        </form>
    }
}
