//! Scroll synchronization between the model and the DOM scroll container.
//!
//! The model owns the scroll offset of each sheet. A render pass writes it to
//! the container; the container answers with a scroll event that must not be
//! mistaken for the user scrolling. Each write records the value it expects
//! back and bumps a generation counter. The next scroll event either matches
//! the pending value (ours, dropped) or does not (the user's). Both outcomes
//! clear the pending write, so suppression never outlives one event.

use tracing::trace;

/// Offsets closer than this are the same position (browsers round scroll
/// offsets to device pixels).
const SCROLL_EPSILON: f64 = 1.0;

fn same_offset(a: f64, b: f64) -> bool {
    (a - b).abs() < SCROLL_EPSILON
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollSource {
    /// Echo of a write made by the engine.
    Programmatic,
    User,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollSync {
    /// Last known container offsets.
    dom: (f64, f64),
    pending: Option<(f64, f64)>,
    generation: u64,
    spacer: (f64, f64),
    margin: (f64, f64),
}

impl ScrollSync {
    pub fn new(margin_x: f64, margin_y: f64) -> Self {
        Self {
            dom: (0.0, 0.0),
            pending: None,
            generation: 0,
            spacer: (0.0, 0.0),
            margin: (margin_x, margin_y),
        }
    }

    /// Whether a programmatic write is waiting for its echo.
    pub fn is_suppressing(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of programmatic writes issued so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn dom_offset(&self) -> (f64, f64) {
        self.dom
    }

    pub fn spacer(&self) -> (f64, f64) {
        self.spacer
    }

    /// Container write needed to show the model's offsets, if any.
    pub fn write_to_dom(&mut self, left: f64, top: f64) -> Option<(f64, f64)> {
        if same_offset(self.dom.0, left) && same_offset(self.dom.1, top) {
            return None;
        }
        self.dom = (left, top);
        self.pending = Some((left, top));
        self.generation += 1;
        trace!(left, top, generation = self.generation, "programmatic scroll");
        Some((left, top))
    }

    /// Classify a scroll event from the container.
    pub fn on_dom_scroll(&mut self, left: f64, top: f64) -> ScrollSource {
        let pending = self.pending.take();
        self.dom = (left, top);
        match pending {
            Some((l, t)) if same_offset(l, left) && same_offset(t, top) => {
                ScrollSource::Programmatic
            }
            _ => ScrollSource::User,
        }
    }

    /// Grow the spacer so the container can scroll at least a quarter margin
    /// past `(left, top)` on each axis. Returns the new size when it changed.
    /// The spacer never shrinks.
    pub fn ensure_spacer(&mut self, left: f64, top: f64) -> Option<(f64, f64)> {
        let mut changed = false;
        if self.spacer.0 - left < self.margin.0 / 4.0 {
            self.spacer.0 = left + self.margin.0;
            changed = true;
        }
        if self.spacer.1 - top < self.margin.1 / 4.0 {
            self.spacer.1 = top + self.margin.1;
            changed = true;
        }
        changed.then_some(self.spacer)
    }

    /// Drop a pending write, e.g. after the active sheet changed.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn echo_of_write_is_programmatic() {
        let mut sync = ScrollSync::new(100.0, 500.0);
        assert_eq!(sync.write_to_dom(200.0, 300.0), Some((200.0, 300.0)));
        assert!(sync.is_suppressing());
        assert_eq!(sync.generation(), 1);
        assert_eq!(sync.on_dom_scroll(200.0, 300.0), ScrollSource::Programmatic);
        assert!(!sync.is_suppressing());
        assert_eq!(sync.on_dom_scroll(200.0, 340.0), ScrollSource::User);
    }

    #[test]
    fn unchanged_offsets_need_no_write() {
        let mut sync = ScrollSync::new(100.0, 500.0);
        assert_eq!(sync.write_to_dom(0.0, 0.0), None);
        sync.on_dom_scroll(50.0, 0.0);
        assert_eq!(sync.write_to_dom(50.4, 0.0), None);
        assert_eq!(sync.generation(), 0);
    }

    #[test]
    fn mismatched_event_clears_suppression() {
        let mut sync = ScrollSync::new(100.0, 500.0);
        sync.write_to_dom(200.0, 0.0);
        assert_eq!(sync.on_dom_scroll(10.0, 0.0), ScrollSource::User);
        assert!(!sync.is_suppressing());
        // A late echo is now just another user scroll
        assert_eq!(sync.on_dom_scroll(200.0, 0.0), ScrollSource::User);
    }

    #[test]
    fn spacer_grows_near_edge_only() {
        let mut sync = ScrollSync::new(100.0, 400.0);
        assert_eq!(sync.ensure_spacer(0.0, 0.0), Some((100.0, 400.0)));
        assert_eq!(sync.ensure_spacer(50.0, 200.0), None);
        assert_eq!(sync.ensure_spacer(80.0, 200.0), Some((180.0, 400.0)));
        assert_eq!(sync.ensure_spacer(0.0, 0.0), None);
    }
}
