//! Frame pacing for the terminal loop.

/// Skips redraws while nothing visible has changed.
///
/// A changed fingerprint always renders. An unchanged one renders at most once
/// per `min_static_interval_ms`, so the screen recovers from stray terminal
/// output without redrawing every loop iteration.
#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_static_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: Option<u64>,
}

impl RenderThrottle {
    pub fn new(min_static_interval_ms: u64) -> Self {
        Self {
            min_static_interval_ms,
            last_render_ms: 0,
            last_fingerprint: None,
        }
    }

    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64) -> bool {
        let changed = self.last_fingerprint != Some(fingerprint);
        let stale = now_ms.saturating_sub(self.last_render_ms) >= self.min_static_interval_ms;
        if changed || stale {
            self.last_render_ms = now_ms;
            self.last_fingerprint = Some(fingerprint);
            return true;
        }
        false
    }

    /// Force the next call to render (resize, focus regained).
    pub fn reset(&mut self) {
        self.last_fingerprint = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_first_frame_and_changes() {
        let mut t = RenderThrottle::new(250);
        assert!(t.should_render(0, 1));
        assert!(!t.should_render(10, 1));
        assert!(t.should_render(20, 2));
    }

    #[test]
    fn static_frames_refresh_on_interval() {
        let mut t = RenderThrottle::new(250);
        assert!(t.should_render(1000, 7));
        assert!(!t.should_render(1249, 7));
        assert!(t.should_render(1250, 7));
        t.reset();
        assert!(t.should_render(1251, 7));
    }
}
