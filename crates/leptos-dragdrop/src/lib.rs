//! Leptos DragDrop Utilities
//!
//! Simple drag-and-drop for Leptos using mouse events, generic over the
//! drop-target type. Uses movement threshold to distinguish click from drag.
//! The protocol itself lives in `machine`; this module feeds it DOM events.

mod machine;

pub use machine::{DragMachine, DragPhase};

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

/// DnD state signals
pub struct DndSignals<T: Send + Sync + 'static> {
    pub machine: RwSignal<DragMachine<T>>,
    /// Pending item id (mousedown but not yet dragging)
    pub pending_id: RwSignal<Option<u32>>,
    /// Start position for movement detection
    pub start_pos: RwSignal<(i32, i32)>,
}

impl<T: Send + Sync + 'static> Clone for DndSignals<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for DndSignals<T> {}

impl<T> DndSignals<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Reactive: id of the item being dragged
    pub fn dragging(&self) -> Option<u32> {
        self.machine.with(|m| m.dragging())
    }

    /// Reactive: whether `target` is where a release would land
    pub fn is_target(&self, target: &T) -> bool {
        self.machine.with(|m| m.is_target(target))
    }

    /// Call first in click handlers of draggable elements. Swallows the click
    /// the browser fires right after a drag ended and returns true for it.
    pub fn swallow_trailing_click(&self, ev: &web_sys::MouseEvent) -> bool {
        let swallowed = self.machine.try_update(|m| m.take_trailing_click()).unwrap_or(false);
        if swallowed {
            ev.prevent_default();
            ev.stop_propagation();
        }
        swallowed
    }
}

pub fn create_dnd_signals<T>() -> DndSignals<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    DndSignals {
        machine: RwSignal::new(DragMachine::new()),
        pending_id: RwSignal::new(None),
        start_pos: RwSignal::new((0, 0)),
    }
}

/// End drag operation
fn end_drag<T: Clone + PartialEq + Send + Sync + 'static>(dnd: &DndSignals<T>) {
    dnd.pending_id.set(None);

    // No click followed the drag (released off the card); forget the mark.
    if let Some(win) = web_sys::window() {
        let machine = dnd.machine;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            machine.update(|m| {
                m.take_trailing_click();
            });
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

/// Create mousedown handler for draggable items
/// Records pending drag with start position
pub fn make_on_mousedown<T>(dnd: DndSignals<T>, item_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Ignore if target is input or button
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            }
            dnd.pending_id.set(Some(item_id));
            dnd.start_pos.set((ev.client_x(), ev.client_y()));
        }
    }
}

/// Create mouseenter handler for a drop target
pub fn make_on_target_mouseenter<T>(dnd: DndSignals<T>, target: T) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        let target = target.clone();
        dnd.machine.update(|m| m.enter(target));
    }
}

/// Create mouseleave handler for a drop target
pub fn make_on_target_mouseleave<T>(dnd: DndSignals<T>, target: T) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        dnd.machine.update(|m| m.leave(&target));
    }
}

/// Document mousemove: starts the drag once the pointer moved far enough
fn bind_global_mousemove<T>(dnd: DndSignals<T>)
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let Some(pending) = dnd.pending_id.get_untracked() else { return };
        if dnd.machine.with_untracked(|m| m.dragging()).is_some() {
            return;
        }
        let (start_x, start_y) = dnd.start_pos.get_untracked();
        let dx = (ev.client_x() - start_x).abs();
        let dy = (ev.client_y() - start_y).abs();
        if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
            dnd.machine.update(|m| {
                if let Some(abandoned) = m.start(pending) {
                    web_sys::console::warn_1(&format!("[DND] abandoned drag of {}", abandoned).into());
                }
            });
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
}

/// Document keydown: Escape cancels an active drag
fn bind_global_escape<T>(dnd: DndSignals<T>)
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && dnd.machine.with_untracked(|m| m.dragging()).is_some() {
            dnd.machine.update(|m| {
                m.cancel();
            });
            end_drag(&dnd);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
    }
    on_keydown.forget();
}

/// Bind global mouseup handler for drop detection.
///
/// The machine is back to idle before `on_drop` runs, whatever `on_drop`
/// later does with the move.
pub fn bind_global_mouseup<T, F>(dnd: DndSignals<T>, on_drop: F)
where
    T: Clone + PartialEq + Send + Sync + 'static,
    F: Fn(u32, T) + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let was_dragging = dnd.machine.with_untracked(|m| m.dragging()).is_some();
        let released = dnd.machine.try_update(|m| m.release()).flatten();

        if was_dragging {
            end_drag(&dnd);
        } else {
            // Not dragging - a plain click; let it through
            dnd.pending_id.set(None);
        }
        if let Some((dragged, target)) = released {
            on_drop(dragged, target);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    }
    on_mouseup.forget();

    bind_global_mousemove(dnd);
    bind_global_escape(dnd);
}
