//! Drag State Machine
//!
//! Framework-free core of the drag-and-drop protocol:
//! Idle -> Dragging -> Hovering -> (release) -> Idle.
//!
//! Hovered targets are kept as a stack so nested drop targets (a lane inside
//! a column) hand the hover back to the outer target when the pointer leaves
//! the inner one. The stack is tracked even while idle, so a drag that starts
//! inside a target is already hovering it.

/// Observable phase of the machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragPhase<T> {
    Idle,
    Dragging { item: u32 },
    Hovering { item: u32, target: T },
}

/// At most one item is dragged at a time
#[derive(Debug, Clone, PartialEq)]
pub struct DragMachine<T> {
    dragging: Option<u32>,
    hovered: Vec<T>,
    /// A drag just ended; the click the browser fires next is part of it
    trailing_click: bool,
}

impl<T> Default for DragMachine<T> {
    fn default() -> Self {
        Self { dragging: None, hovered: Vec::new(), trailing_click: false }
    }
}

impl<T: Clone + PartialEq> DragMachine<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase<T> {
        match (self.dragging, self.hovered.last()) {
            (None, _) => DragPhase::Idle,
            (Some(item), None) => DragPhase::Dragging { item },
            (Some(item), Some(target)) => DragPhase::Hovering { item, target: target.clone() },
        }
    }

    pub fn dragging(&self) -> Option<u32> {
        self.dragging
    }

    /// Current drop target; `None` unless an item is being dragged
    pub fn target(&self) -> Option<&T> {
        self.dragging.and(self.hovered.last())
    }

    pub fn is_target(&self, target: &T) -> bool {
        self.target() == Some(target)
    }

    /// Begins dragging `item`. Returns the abandoned item, if another drag
    /// was still active.
    pub fn start(&mut self, item: u32) -> Option<u32> {
        self.trailing_click = false;
        self.dragging.replace(item).filter(|previous| *previous != item)
    }

    /// Pointer entered a drop target
    pub fn enter(&mut self, target: T) {
        self.hovered.push(target);
    }

    /// Pointer left a drop target
    pub fn leave(&mut self, target: &T) {
        if let Some(index) = self.hovered.iter().rposition(|t| t == target) {
            self.hovered.remove(index);
        }
    }

    /// Pointer released. Always ends the drag; yields the move to perform
    /// only when released over a target.
    pub fn release(&mut self) -> Option<(u32, T)> {
        let item = self.dragging.take()?;
        self.trailing_click = true;
        self.hovered.last().cloned().map(|target| (item, target))
    }

    /// Escape or any other abort; no move is produced
    pub fn cancel(&mut self) -> Option<u32> {
        let item = self.dragging.take();
        self.trailing_click |= item.is_some();
        item
    }

    /// Consumes the mark left by the last drag. True at most once per drag,
    /// so only the first click after it is swallowed.
    pub fn take_trailing_click(&mut self) -> bool {
        std::mem::take(&mut self.trailing_click)
    }
}
