//! Mouse drag handler.
//!
//! Turns left-button press / release into the drag sequence understood by the
//! engine. Screen coordinates are resolved to cell indices by the caller's
//! `locate` function (usually `GameView::cell_at`), keeping this crate free of
//! layout knowledge.

use arrayvec::ArrayVec;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

/// Drag step addressed by cell index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    DragStart(usize),
    DragDrop(usize),
    DragEnd,
}

/// Tracks a left-button drag that began on the board.
#[derive(Debug, Clone, Default)]
pub struct PointerHandler {
    /// Cell under the press, while the button is held.
    pressed: Option<usize>,
}

impl PointerHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed.is_some()
    }

    /// Translate one mouse event.
    ///
    /// A press off the board is ignored. A release always ends a drag that
    /// started on the board; it also drops onto a cell when released over a
    /// different one, so a plain click never asks for a swap.
    pub fn handle_mouse(
        &mut self,
        event: MouseEvent,
        locate: impl Fn(u16, u16) -> Option<usize>,
    ) -> ArrayVec<PointerEvent, 2> {
        let mut out = ArrayVec::new();
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = locate(event.column, event.row) {
                    self.pressed = Some(index);
                    out.push(PointerEvent::DragStart(index));
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(start) = self.pressed.take() {
                    match locate(event.column, event.row) {
                        Some(index) if index != start => out.push(PointerEvent::DragDrop(index)),
                        _ => {}
                    }
                    out.push(PointerEvent::DragEnd);
                }
            }
            _ => {}
        }
        out
    }

    /// Forget a drag in progress (focus loss, resize).
    pub fn reset(&mut self) {
        self.pressed = None;
    }
}
