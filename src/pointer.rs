//! Pointer input for drag interaction.
//!
//! The stepper never talks to a windowing system. It consumes at most one
//! [`PointerSample`] per tick; [`DragTracker`] is the thin boundary that
//! turns a host's raw drag callbacks (touch, mouse, trackpad) into that
//! sample, tracking both continuous state (drag in progress) and
//! instantaneous edges (drag just started / just ended).
//!
//! The drag-start edge is what hosts hook haptic feedback onto. It fires
//! once per drag, never once per tick, and firing it is the host's job -
//! the physics stepper itself has no side effects.

use glam::DVec2;

/// One pointer reading, valid while a drag gesture is active.
///
/// `velocity` is the gesture recognizer's instantaneous velocity in
/// canvas units per second - it is supplied, not derived by differencing
/// successive locations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Pointer location in canvas coordinates.
    pub location: DVec2,
    /// Instantaneous drag velocity.
    pub velocity: DVec2,
}

/// Tracks a drag gesture across frames.
///
/// Continuous state is queried with [`sample`](Self::sample); the
/// start/end edges with [`drag_started`](Self::drag_started) and
/// [`drag_ended`](Self::drag_ended), which stay set until the next
/// [`begin_frame`](Self::begin_frame).
#[derive(Debug, Default)]
pub struct DragTracker {
    sample: Option<PointerSample>,
    started: bool,
    ended: bool,
}

impl DragTracker {
    /// Create an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame edge state. Call once at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.started = false;
        self.ended = false;
    }

    /// Record a drag update at `location` with the recognizer-reported
    /// `velocity`.
    ///
    /// The first update after an idle period marks the drag-start edge;
    /// returns `true` in that case so hosts can trigger haptics inline.
    pub fn update(&mut self, location: DVec2, velocity: DVec2) -> bool {
        let fresh = self.sample.is_none();
        if fresh {
            self.started = true;
        }
        self.sample = Some(PointerSample { location, velocity });
        fresh
    }

    /// Record the end of the drag. Subsequent frames report no sample.
    pub fn end(&mut self) {
        if self.sample.take().is_some() {
            self.ended = true;
        }
    }

    /// The current pointer sample, if a drag is active.
    #[inline]
    pub fn sample(&self) -> Option<&PointerSample> {
        self.sample.as_ref()
    }

    /// Whether a drag is currently in progress.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.sample.is_some()
    }

    /// Whether a drag started since the last `begin_frame`.
    #[inline]
    pub fn drag_started(&self) -> bool {
        self.started
    }

    /// Whether a drag ended since the last `begin_frame`.
    #[inline]
    pub fn drag_ended(&self) -> bool {
        self.ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_start_edge_fires_once() {
        let mut tracker = DragTracker::new();

        assert!(tracker.update(DVec2::new(10.0, 10.0), DVec2::ZERO));
        assert!(tracker.drag_started());

        // Moving the same drag is not a new start.
        assert!(!tracker.update(DVec2::new(12.0, 10.0), DVec2::new(240.0, 0.0)));

        tracker.begin_frame();
        assert!(!tracker.drag_started());
        assert!(!tracker.update(DVec2::new(14.0, 10.0), DVec2::new(240.0, 0.0)));
    }

    #[test]
    fn test_end_clears_sample_and_marks_edge() {
        let mut tracker = DragTracker::new();
        tracker.update(DVec2::new(5.0, 5.0), DVec2::ZERO);
        assert!(tracker.is_active());

        tracker.end();
        assert!(!tracker.is_active());
        assert!(tracker.sample().is_none());
        assert!(tracker.drag_ended());

        // Ending an idle tracker is a no-op.
        tracker.begin_frame();
        tracker.end();
        assert!(!tracker.drag_ended());
    }

    #[test]
    fn test_release_then_press_is_a_new_drag() {
        let mut tracker = DragTracker::new();
        tracker.update(DVec2::ZERO, DVec2::ZERO);
        tracker.end();
        tracker.begin_frame();

        assert!(tracker.update(DVec2::new(1.0, 1.0), DVec2::ZERO));
        assert!(tracker.drag_started());
    }
}
