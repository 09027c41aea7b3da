//! The animation shell tying text, gestures and the particle field
//! together.
//!
//! [`ParticleText`] owns the particle field and its lifecycle: it
//! regenerates the field when the text or canvas size changes, feeds the
//! current pointer sample into each physics tick, and fires the
//! caller-supplied haptic callback on the drag-start edge. It never
//! draws; an external renderer reads [`ParticleText::particles`] after
//! each tick and paints one filled circle per particle.
//!
//! All methods take `&mut self` and are meant to be driven from one
//! timeline (the host's frame callback), which is what keeps `generate`
//! and `step` from ever interleaving on the same field.

use crate::clock::TickClock;
use crate::field::{ParticleField, DEFAULT_PARTICLE_COUNT};
use crate::mask::GlyphMask;
use crate::particle::Particle;
use crate::pointer::DragTracker;
use crate::rasterize::{Rasterizer, DEFAULT_FONT_SIZE};
use glam::DVec2;

/// Source of glyph masks for a given text.
///
/// The seam between the simulation core and the font stack: production
/// code uses [`Rasterizer`], tests substitute a fixed mask.
pub trait MaskSource {
    /// Rasterize `text` at `px` pixels, or `None` if nothing is visible.
    fn mask_for(&self, text: &str, px: f32) -> Option<GlyphMask>;
}

impl MaskSource for Rasterizer {
    fn mask_for(&self, text: &str, px: f32) -> Option<GlyphMask> {
        self.rasterize(text, px)
    }
}

/// An interactive particle-text animation.
///
/// Configure with method chaining, then drive it with size/text/pointer
/// events and [`tick`](Self::tick) or [`pump`](Self::pump):
///
/// ```ignore
/// let mut text = ParticleText::new("Hello")
///     .with_particle_count(1000)
///     .with_mask_source(Rasterizer::from_system()?)
///     .with_haptic(|| haptics.pulse());
///
/// text.resize(DVec2::new(width, height));
/// // Per frame:
/// text.pointer_moved(location, velocity);
/// text.pump();
/// renderer.draw(text.particles());
/// ```
pub struct ParticleText {
    text: String,
    font_size: f32,
    particle_count: usize,
    seed: Option<u64>,
    source: Option<Box<dyn MaskSource>>,
    on_drag_start: Option<Box<dyn FnMut()>>,
    canvas: DVec2,
    field: ParticleField,
    tracker: DragTracker,
    clock: TickClock,
    tick_count: u64,
}

impl ParticleText {
    /// Create an animation for `text` with default settings.
    ///
    /// The field stays empty until the first non-degenerate
    /// [`resize`](Self::resize).
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: DEFAULT_FONT_SIZE,
            particle_count: DEFAULT_PARTICLE_COUNT,
            seed: None,
            source: None,
            on_drag_start: None,
            canvas: DVec2::ZERO,
            field: ParticleField::empty(),
            tracker: DragTracker::new(),
            clock: TickClock::new(),
            tick_count: 0,
        }
    }

    /// Set the number of particles (default 1000).
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Set the rasterized text size in pixels (default 240).
    pub fn with_font_size(mut self, px: f32) -> Self {
        self.font_size = px;
        self
    }

    /// Seed field generation for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the mask source. Without one, the first generation attempt
    /// loads the system font via [`Rasterizer::from_system`].
    pub fn with_mask_source(mut self, source: impl MaskSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Set the haptic callback, fired once per drag start.
    pub fn with_haptic<F: FnMut() + 'static>(mut self, pulse: F) -> Self {
        self.on_drag_start = Some(Box::new(pulse));
        self
    }

    /// Report a new canvas size. Any change regenerates the field.
    pub fn resize(&mut self, canvas: DVec2) {
        if canvas == self.canvas {
            return;
        }
        self.canvas = canvas;
        self.regenerate();
    }

    /// Replace the displayed text. A change regenerates the field.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.text {
            return;
        }
        self.text = text;
        self.regenerate();
    }

    /// Report a drag update from the gesture source.
    ///
    /// Fires the haptic callback if this update starts a new drag.
    pub fn pointer_moved(&mut self, location: DVec2, velocity: DVec2) {
        if self.tracker.update(location, velocity) {
            if let Some(pulse) = &mut self.on_drag_start {
                pulse();
            }
        }
    }

    /// Report the end of a drag. Subsequent ticks ease freely.
    pub fn pointer_ended(&mut self) {
        self.tracker.end();
    }

    /// Advance the simulation by exactly one tick.
    pub fn tick(&mut self) {
        self.field.step(self.tracker.sample());
        self.tick_count += 1;
        self.tracker.begin_frame();
    }

    /// Advance by however many 120 Hz ticks have become due since the
    /// last call, returning how many were run.
    pub fn pump(&mut self) -> u64 {
        let due = self.clock.due_ticks();
        for _ in 0..due {
            self.tick();
        }
        due
    }

    /// Read-only particle view for the renderer.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        self.field.particles()
    }

    /// The current field.
    #[inline]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// The displayed text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether a drag is currently active.
    #[inline]
    pub fn dragging(&self) -> bool {
        self.tracker.is_active()
    }

    /// Ticks run since creation.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.tick_count
    }

    /// Rebuild the field from the current text and canvas size.
    ///
    /// Deferred while the canvas is degenerate; on rasterization failure
    /// the previous field is kept unchanged.
    fn regenerate(&mut self) {
        if self.canvas.x <= 0.0 || self.canvas.y <= 0.0 {
            return;
        }
        if self.source.is_none() {
            // Lazy system-font lookup; a host without fonts simply keeps
            // its previous (possibly empty) field.
            self.source = Rasterizer::from_system()
                .ok()
                .map(|r| Box::new(r) as Box<dyn MaskSource>);
        }
        let Some(source) = &self.source else {
            return;
        };
        let Some(mask) = source.mask_for(&self.text, self.font_size) else {
            return;
        };

        let offset = ParticleField::centered_offset(&mask, self.canvas);
        self.field = match self.seed {
            Some(seed) => ParticleField::generate_seeded(
                &mask,
                self.canvas,
                self.particle_count,
                offset,
                seed,
            ),
            None => ParticleField::generate(&mask, self.canvas, self.particle_count, offset),
        };
    }
}
