//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{cell_from_code, CandyKind};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// What the side panel shows about the TCP adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterStatusView {
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Placement of the board frame inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
}

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const CURSOR_BG: Rgb = Rgb::new(75, 75, 100);
const HELD_BG: Rgb = Rgb::new(130, 110, 40);

/// A lightweight terminal renderer for the match-3 board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    fn layout(&self, board_width: usize, viewport: Viewport) -> Layout {
        let side = board_width as u16;
        let frame_w = side * self.cell_w + 2;
        let frame_h = side * self.cell_h + 2;
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        Layout {
            start_x,
            start_y,
            frame_w,
            frame_h,
        }
    }

    /// Map a terminal position to the board cell drawn there.
    ///
    /// Uses the same layout as [`GameView::render_into`], so mouse coordinates
    /// resolve against what is on screen.
    pub fn cell_at(&self, board_width: usize, viewport: Viewport, x: u16, y: u16) -> Option<usize> {
        if board_width == 0 {
            return None;
        }
        let layout = self.layout(board_width, viewport);
        let ox = x.checked_sub(layout.start_x + 1)?;
        let oy = y.checked_sub(layout.start_y + 1)?;
        let col = (ox / self.cell_w) as usize;
        let row = (oy / self.cell_h) as usize;
        if col >= board_width || row >= board_width {
            return None;
        }
        Some(row * board_width + col)
    }

    /// Render the current game into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_adapter(snap, None, viewport, fb);
    }

    pub fn render_into_with_adapter(
        &self,
        snap: &GameSnapshot,
        adapter: Option<&AdapterStatusView>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let layout = self.layout(snap.width, viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        self.draw_border(fb, layout, border);

        for (row, codes) in snap.rows().enumerate() {
            for (col, &code) in codes.iter().enumerate() {
                let index = row * snap.width + col;
                let bg = if snap.held == Some(index) {
                    HELD_BG
                } else if snap.cursor == index {
                    CURSOR_BG
                } else {
                    PLAY_BG
                };
                self.draw_board_cell(fb, layout, col as u16, row as u16, code, bg);
            }
        }

        self.draw_side_panel(fb, snap, adapter, viewport, layout);

        if snap.paused {
            self.draw_overlay_text(fb, layout, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: Layout, style: CellStyle) {
        let Layout {
            start_x: x,
            start_y: y,
            frame_w: w,
            frame_h: h,
        } = layout;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, layout: Layout, col: u16, row: u16, code: u8, bg: Rgb) {
        let px = layout.start_x + 1 + col * self.cell_w;
        let py = layout.start_y + 1 + row * self.cell_h;
        let (ch, style) = match cell_from_code(code) {
            Some(kind) => ('●', CellStyle::new(candy_color(kind), bg).bold()),
            None => ('·', CellStyle::new(Rgb::new(90, 90, 100), bg).dim()),
        };
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(px, py + (self.cell_h - 1) / 2, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        adapter: Option<&AdapterStatusView>,
        viewport: Viewport,
        layout: Layout,
    ) {
        let panel_x = layout.start_x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let dim = value.dim();

        let mut y = layout.start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "TICK", label);
        fb.put_u32(panel_x, y + 1, snap.tick.min(u32::MAX as u64) as u32, value);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "SWAPS", label);
        let x = fb.put_u32(panel_x, y + 1, snap.swaps_committed, value);
        let x = fb.put_str(x, y + 1, "/", dim);
        fb.put_u32(x, y + 1, snap.swaps_rejected, dim);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "GAME", label);
        let x = fb.put_str(panel_x, y + 1, "#", dim);
        fb.put_u32(x, y + 1, snap.episode_id.saturating_add(1), value);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "AI", label);
        match adapter {
            Some(st) => {
                let x = fb.put_str(panel_x, y + 1, "ON :", value);
                fb.put_u32(x, y + 1, st.port as u32, value);
            }
            None => {
                fb.put_str(panel_x, y + 1, "OFF", value);
            }
        }
        y = y.saturating_add(3);

        for line in ["move  arrows", "pick  space", "drop  esc", "pause p", "quit  q"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, dim);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: Layout, text: &str) {
        let mid_y = layout.start_y.saturating_add(layout.frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = layout
            .start_x
            .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

fn candy_color(kind: CandyKind) -> Rgb {
    match kind {
        CandyKind::Red => Rgb::new(230, 70, 70),
        CandyKind::Orange => Rgb::new(255, 160, 40),
        CandyKind::Yellow => Rgb::new(240, 220, 80),
        CandyKind::Green => Rgb::new(100, 220, 120),
        CandyKind::Blue => Rgb::new(80, 130, 240),
        CandyKind::Purple => Rgb::new(190, 110, 230),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap3() -> GameSnapshot {
        GameSnapshot {
            width: 3,
            cells: vec![1, 2, 3, 4, 0, 6, 1, 2, 3],
            ..GameSnapshot::default()
        }
    }

    #[test]
    fn test_cell_at_matches_layout() {
        let view = GameView::default();
        let vp = Viewport::new(20, 10);
        // frame_w = 3*2+2 = 8, start_x = 6; frame_h = 5, start_y = 2.
        assert_eq!(view.cell_at(3, vp, 7, 3), Some(0));
        assert_eq!(view.cell_at(3, vp, 8, 3), Some(0));
        assert_eq!(view.cell_at(3, vp, 9, 3), Some(1));
        assert_eq!(view.cell_at(3, vp, 12, 5), Some(8));
        assert_eq!(view.cell_at(3, vp, 6, 3), None);
        assert_eq!(view.cell_at(3, vp, 13, 3), None);
        assert_eq!(view.cell_at(3, vp, 7, 6), None);
    }

    #[test]
    fn test_empty_cell_is_dotted() {
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let fb = view.render(&snap3(), Viewport::new(8, 5));
        // Center cell (row 1, col 1) starts at x = 1 + 2, y = 2.
        assert_eq!(fb.get(3, 2).map(|g| g.ch), Some('·'));
        assert_eq!(fb.get(1, 1).map(|g| g.ch), Some('●'));
    }
}
