//! Drag tracking - turns drag-start / drag-drop / drag-end into a swap request.
//!
//! Frontends report the cell under the pointer when a drag begins and when it
//! is dropped. `drag_end` resolves the pair and always resets the tracker, so a
//! drag that ends off the board simply produces nothing.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragTracker {
    dragged: Option<usize>,
    replaced: Option<usize>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A drag began on `index`. Restarts any drag already in progress.
    pub fn drag_start(&mut self, index: usize) {
        self.dragged = Some(index);
        self.replaced = None;
    }

    /// The dragged cell was released over `index`. Ignored without a drag in progress.
    pub fn drag_drop(&mut self, index: usize) {
        if self.dragged.is_some() {
            self.replaced = Some(index);
        }
    }

    /// Finish the drag, returning `(dragged, target)` when both ends are known.
    pub fn drag_end(&mut self) -> Option<(usize, usize)> {
        let pair = self.dragged.zip(self.replaced);
        self.cancel();
        pair
    }

    pub fn cancel(&mut self) {
        self.dragged = None;
        self.replaced = None;
    }

    /// Cell currently being dragged
    pub fn dragged(&self) -> Option<usize> {
        self.dragged
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged.is_some()
    }
}
