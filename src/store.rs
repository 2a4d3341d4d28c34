//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use ops_hub_core::Board;

/// How long a notice stays on screen
pub const NOTICE_TIMEOUT_MS: u32 = 3000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "notice success",
            NoticeKind::Error => "notice error",
        }
    }
}

/// Transient message shown above the board
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub text: String,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// System items of the board page
    pub board: Board,
    /// Notices currently shown, oldest first
    pub notices: Vec<Notice>,
    /// Id for the next notice
    pub next_notice: u64,
    /// Set while the board is being (re)loaded
    pub loading: bool,
    /// Why the last load failed, if it did
    pub load_error: Option<String>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Show a notice and schedule its removal
pub fn store_notify(store: &AppStore, kind: NoticeKind, text: impl Into<String>) {
    let id = {
        let next_notice = store.next_notice();
        let mut next = next_notice.write();
        *next += 1;
        *next
    };
    store.notices().write().push(Notice { id, kind, text: text.into() });

    let store = *store;
    leptos::task::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(NOTICE_TIMEOUT_MS).await;
        store_dismiss(&store, id);
    });
}

/// Remove a notice by ID
pub fn store_dismiss(store: &AppStore, notice_id: u64) {
    store.notices().write().retain(|notice| notice.id != notice_id);
}
