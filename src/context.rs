//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use leptos_dragdrop::DndSignals;

use ops_hub_core::Classification;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload items from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload items from backend - write
    set_reload_trigger: WriteSignal<u32>,
    /// Board drag-and-drop; drop targets are board buckets
    pub dnd: DndSignals<Classification>,
}

impl AppContext {
    pub fn new(reload_trigger: (ReadSignal<u32>, WriteSignal<u32>), dnd: DndSignals<Classification>) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            dnd,
        }
    }

    /// Trigger a reload of items
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
