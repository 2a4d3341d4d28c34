//! OPS Hub Frontend App
//!
//! Toolbox board page: header with counts, create form, notices and the
//! Kanban board of system items.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::create_dnd_signals;
use reactive_stores::Store;

use ops_hub_core::{ItemType, RecordStore};

use crate::commands::TauriStore;
use crate::components::{BoardHeader, KanbanBoard, NewItemForm, NoticeBar};
use crate::context::AppContext;
use crate::store::{AppState, AppStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    // Provide context to all children
    provide_context(store);
    provide_context(AppContext::new((reload_trigger, set_reload_trigger), create_dnd_signals()));

    // Load system items on mount and whenever a reload is requested
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        store.loading().set(true);
        spawn_local(async move {
            match TauriStore.list(Some(ItemType::System)).await {
                Ok(items) => {
                    web_sys::console::log_1(&format!("[APP] Loaded {} items, trigger={}", items.len(), trigger).into());
                    store.board().write().replace_all(items);
                    store.load_error().set(None);
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[APP] Failed to load items: {}", e).into());
                    store.load_error().set(Some(e.to_string()));
                }
            }
            store.loading().set(false);
        });
    });

    view! {
        <div class="app-layout">
            <main class="main-content">
                <BoardHeader />
                <NewItemForm />
                <NoticeBar />
                <KanbanBoard />
            </main>
        </div>
    }
}
