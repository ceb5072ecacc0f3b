//! Terminal match-3 runner (default binary).
//!
//! Draws the board with the framebuffer renderer, maps keys and mouse drags to
//! swaps, ticks the engine on a fixed interval and, unless disabled, serves
//! the JSON control adapter.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tui_crush::adapter::Adapter;
use tui_crush::bridge::ObservationPump;
use tui_crush::core::{GameConfig, GameSnapshot, GameState, SwapOutcome};
use tui_crush::input::{handle_key_event, should_quit, PointerEvent, PointerHandler};
use tui_crush::term::{
    AdapterStatusView, FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport,
};
use tui_crush::types::STATIC_RENDER_INTERVAL_MS;

fn main() -> Result<()> {
    init_logging()?;

    let config = GameConfig::from_env().context("invalid game configuration")?;
    info!(
        width = config.width,
        colors = %config.palette.letters(),
        tick_ms = config.tick_ms,
        seed = config.seed,
        "starting"
    );

    let adapter = match Adapter::start_from_env() {
        Ok(adapter) => adapter,
        Err(e) => {
            warn!(error = %e, "adapter unavailable, continuing without it");
            None
        }
    };
    if let Some(a) = adapter.as_ref() {
        info!(addr = %a.local_addr(), "adapter ready");
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, adapter);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Install a file logger when `CRUSH_LOG` holds a filter.
///
/// The terminal is in raw mode while playing, so logs never go to stderr.
fn init_logging() -> Result<()> {
    let Some(filter) = std::env::var("CRUSH_LOG").ok().filter(|s| !s.trim().is_empty()) else {
        return Ok(());
    };
    let path = std::env::var("CRUSH_LOG_FILE").unwrap_or_else(|_| "tui-crush.log".to_string());
    let file = File::create(&path).with_context(|| format!("cannot open log file {path}"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| anyhow!("failed to install logger: {e}"))
}

fn run(term: &mut TerminalRenderer, config: &GameConfig, mut adapter: Option<Adapter>) -> Result<()> {
    let mut game = GameState::new(config)?;

    let view = GameView::default();
    let status = adapter.as_ref().map(|a| AdapterStatusView {
        port: a.local_addr().port(),
    });
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut throttle = RenderThrottle::new(STATIC_RENDER_INTERVAL_MS);
    let mut pointer = PointerHandler::new();
    let mut pump = ObservationPump::new();

    let started = Instant::now();
    let tick_duration = Duration::from_millis(config.tick_ms as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        if throttle.should_render(started.elapsed().as_millis() as u64, snap.fingerprint()) {
            view.render_into_with_adapter(&snap, status.as_ref(), viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        info!(score = game.score(), "quit");
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        if let Some(outcome) = game.apply_action(action) {
                            log_outcome(&outcome);
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    let events =
                        pointer.handle_mouse(mouse, |x, y| view.cell_at(snap.width, viewport, x, y));
                    for ev in events {
                        match ev {
                            PointerEvent::DragStart(i) => {
                                game.set_cursor(i);
                                game.drag_start(i);
                            }
                            PointerEvent::DragDrop(i) => game.drag_drop(i),
                            PointerEvent::DragEnd => {
                                if let Some(outcome) = game.drag_end() {
                                    log_outcome(&outcome);
                                }
                            }
                        }
                    }
                }
                Event::Resize(..) => {
                    pointer.reset();
                    term.invalidate();
                    throttle.reset();
                }
                _ => {}
            }
        }

        if let Some(adapter) = adapter.as_mut() {
            while let Some(inbound) = adapter.try_recv() {
                let reply = pump.handle(&mut game, inbound);
                adapter.send(reply);
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick();
        }

        if let Some(adapter) = adapter.as_ref() {
            if let Some(obs) = pump.poll(&mut game) {
                adapter.send(obs);
            }
        }
    }
}

fn log_outcome(outcome: &SwapOutcome) {
    match outcome {
        SwapOutcome::Committed(report) => debug!(runs = report.runs.len(), delta = report.score, "player swap kept"),
        SwapOutcome::Rejected(reason) => debug!(reason = reason.as_str(), "player swap rejected"),
    }
}
