//! Toolbox Card Component
//!
//! A draggable item card with status toggle and delete actions.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::make_on_mousedown;

use ops_hub_core::{delete_item, toggle_status, ToolboxItem};

use crate::commands::TauriStore;
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::store::{store_notify, use_app_store, AppStateStoreFields, NoticeKind};

#[component]
pub fn ToolboxCard(item: ToolboxItem) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let dnd = ctx.dnd;
    let id = item.id;

    let on_toggle = move |ev: web_sys::MouseEvent| {
        if dnd.swallow_trailing_click(&ev) {
            return;
        }
        ev.stop_propagation();
        spawn_local(async move {
            match toggle_status(&TauriStore, id).await {
                Ok(updated) => {
                    store.board().write().upsert(updated);
                    store_notify(&store, NoticeKind::Success, "Status updated");
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[CARD] Toggle of {} failed: {}", id, e).into());
                    store_notify(&store, NoticeKind::Error, "Failed to update status");
                    if e.is_stale_reference() {
                        ctx.reload();
                    }
                }
            }
        });
    };

    let on_delete = Callback::new(move |_| {
        spawn_local(async move {
            match delete_item(&TauriStore, id).await {
                Ok(_) => {
                    store.board().write().remove(id);
                    store_notify(&store, NoticeKind::Success, "Item deleted");
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[CARD] Delete of {} failed: {}", id, e).into());
                    store_notify(&store, NoticeKind::Error, "Failed to delete item");
                    if e.is_stale_reference() {
                        ctx.reload();
                    }
                }
            }
        });
    });

    let active = item.is_active();
    let card_class = move || {
        let mut c = String::from("toolbox-card");
        if !active { c.push_str(" inactive"); }
        if dnd.dragging() == Some(id) { c.push_str(" dragging"); }
        c
    };
    let updated = format!("Updated {}", item.last_updated.format("%b %d, %Y"));

    view! {
        <div
            class=card_class
            on:mousedown=make_on_mousedown(dnd, id)
            on:click=move |ev: web_sys::MouseEvent| {
                dnd.swallow_trailing_click(&ev);
            }
        >
            <div class="toolbox-card-header">
                <span class="toolbox-card-icon" data-icon=item.item_type.icon()></span>
                <span class="toolbox-card-name">{item.name.clone()}</span>
                <span class=format!("status-badge {}", item.status.as_str())>{item.status.as_str()}</span>
            </div>
            <Show when={
                let empty = item.description.is_empty();
                move || !empty
            }>
                <p class="toolbox-card-description">{item.description.clone()}</p>
            </Show>
            <div class="toolbox-card-footer">
                <span class="toolbox-card-updated">{updated}</span>
                <button
                    class="toggle-btn"
                    data-icon=item.status.toggle_icon()
                    title="Toggle status"
                    on:click=on_toggle
                >
                    {if active { "Pause" } else { "Resume" }}
                </button>
                <DeleteConfirmButton button_class="delete-btn" on_confirm=on_delete />
            </div>
        </div>
    }
}
