use tui_crush::core::{GameConfig, GameState};
use tui_crush::term::{AdapterStatusView, AnchorY, FrameBuffer, GameView, Rgb, Viewport};

fn snapshot() -> tui_crush::core::GameSnapshot {
    GameState::new(&GameConfig::with_seed(1)).unwrap().snapshot()
}

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    // 8 cells * 2 columns + border = 18 wide; 8 rows + border = 10 tall.
    let fb = GameView::default().render(&snapshot(), Viewport::new(18, 10));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(17, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 9).unwrap().ch, '└');
    assert_eq!(fb.get(17, 9).unwrap().ch, '┘');
}

#[test]
fn term_view_draws_candies_and_holes() {
    let mut snap = snapshot();
    snap.cells[9] = 0; // row 1, col 1
    snap.cursor = 63;
    let fb = GameView::default().render(&snap, Viewport::new(18, 10));

    assert_eq!(fb.get(1, 1).unwrap().ch, '●');
    assert_eq!(fb.get(2, 1).unwrap().ch, ' ');
    assert_eq!(fb.get(3, 2).unwrap().ch, '·');
}

#[test]
fn term_view_highlights_cursor_and_held_cell() {
    let mut snap = snapshot();
    snap.cursor = 0;
    snap.held = Some(1);
    let fb = GameView::default().render(&snap, Viewport::new(18, 10));

    let plain = fb.get(5, 1).unwrap().style.bg;
    let cursor = fb.get(1, 1).unwrap().style.bg;
    let held = fb.get(3, 1).unwrap().style.bg;
    assert_ne!(cursor, plain);
    assert_ne!(held, plain);
    assert_ne!(held, cursor);
    assert_ne!(plain, Rgb::default());
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = snapshot();
    snap.score = 1234;
    snap.swaps_committed = 5;
    snap.swaps_rejected = 2;

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let status = AdapterStatusView { port: 7878 };
    view.render_into_with_adapter(&snap, Some(&status), Viewport::new(60, 24), &mut fb);

    let text = screen_text(&fb);
    assert!(text.contains("SCORE"));
    assert!(text.contains("1234"));
    assert!(text.contains("5/2"));
    assert!(text.contains("ON :7878"));
}

#[test]
fn term_view_shows_pause_overlay() {
    let mut snap = snapshot();
    snap.paused = true;
    let fb = GameView::default().render(&snap, Viewport::new(18, 10));
    assert!(screen_text(&fb).contains("PAUSED"));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(18, 20));
    // start_y = (20 - 10) / 2 = 5.
    assert_eq!(fb.get(0, 5).unwrap().ch, '┌');

    let top = GameView::default().with_anchor_y(AnchorY::Top);
    assert_eq!(top.render(&snap, Viewport::new(18, 20)).get(0, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_cell_at_agrees_with_rendering() {
    let view = GameView::default();
    let vp = Viewport::new(40, 20);
    // frame 18x10 centered: start_x = 11, start_y = 5.
    assert_eq!(view.cell_at(8, vp, 12, 6), Some(0));
    assert_eq!(view.cell_at(8, vp, 13, 6), Some(0));
    assert_eq!(view.cell_at(8, vp, 14, 6), Some(1));
    assert_eq!(view.cell_at(8, vp, 27, 13), Some(63));
    assert_eq!(view.cell_at(8, vp, 11, 6), None);
    assert_eq!(view.cell_at(8, vp, 28, 6), None);
}

#[test]
fn term_view_handles_tiny_viewports() {
    let fb = GameView::default().render(&snapshot(), Viewport::new(5, 3));
    assert_eq!(fb.width(), 5);
    assert_eq!(fb.height(), 3);
}
