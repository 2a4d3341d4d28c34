//! Kanban Board Component
//!
//! One column per section. Owns the drop handling: a release over a bucket
//! is turned into a reassignment through the board controller.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::bind_global_mouseup;

use ops_hub_core::{reassign_to, Classification, Settlement, TAXONOMY};

use crate::commands::TauriStore;
use crate::components::SectionColumn;
use crate::context::{use_app_context, AppContext};
use crate::store::{store_notify, use_app_store, AppStateStoreFields, AppStore, NoticeKind};

/// Reassign the dropped item to `target`
fn handle_drop(store: AppStore, ctx: AppContext, item_id: u32, target: Classification) {
    let (on_board, needs_move) = store
        .board()
        .with_untracked(|board| (board.get(item_id).is_some(), board.needs_move(item_id, target)));
    if !on_board {
        web_sys::console::warn_1(&format!("[DND] Dropped item {} is not on the board", item_id).into());
        ctx.reload();
        return;
    }
    if !needs_move {
        // Dropped back into its own bucket, nothing in flight
        return;
    }

    let ticket = match store.board().write().issue(item_id, target) {
        Ok(ticket) => ticket,
        Err(e) => {
            store_notify(&store, NoticeKind::Error, "Failed to move item");
            web_sys::console::error_1(&format!("[DND] {}", e).into());
            return;
        }
    };
    web_sys::console::log_1(&format!("[DND] Move #{}: item {} -> {}", ticket.seq(), item_id, target.label()).into());

    spawn_local(async move {
        let result = reassign_to(&TauriStore, &ticket.item, ticket.target).await;
        let settled = store.board().write().settle(ticket, result);
        match settled {
            Settlement::Applied(_) => {
                store_notify(&store, NoticeKind::Success, format!("Moved to {}", target.label()));
            }
            Settlement::Stale => {}
            Settlement::Failed(e) => {
                web_sys::console::error_1(&format!("[DND] Move of item {} failed: {}", item_id, e).into());
                store_notify(&store, NoticeKind::Error, "Failed to move item");
                if e.is_stale_reference() {
                    ctx.reload();
                }
            }
        }
    });
}

/// Board of system items, grouped by section
#[component]
pub fn KanbanBoard() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    // Bind global mouseup handler for dropping
    bind_global_mouseup(ctx.dnd, move |dragged_id, target| {
        handle_drop(store, ctx, dragged_id, target);
    });

    view! {
        <div class="kanban-board" class:dragging=move || ctx.dnd.dragging().is_some()>
            {TAXONOMY.iter().map(|spec| view! { <SectionColumn spec=spec /> }).collect_view()}
        </div>
    }
}
