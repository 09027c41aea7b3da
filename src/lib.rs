//! # glyphdust - particle text effects
//!
//! Renders arbitrary short text as a cloud of discrete particles that
//! scatter in from off-screen, settle into the shape of the glyphs, and
//! scatter again under a pointer drag - with particles near glyph edges
//! drawn slightly larger for a thicker outline.
//!
//! ## Quick Start
//!
//! ```ignore
//! use glyphdust::prelude::*;
//!
//! let mut text = ParticleText::new("Hello")
//!     .with_particle_count(1000)
//!     .with_haptic(|| haptics.pulse());
//!
//! // From the host's layout callback:
//! text.resize(DVec2::new(width, height));
//!
//! // From the host's gesture recognizer:
//! text.pointer_moved(location, velocity);   // drag active
//! text.pointer_ended();                     // drag released
//!
//! // From the host's frame callback:
//! text.pump();
//! for p in text.particles() {
//!     renderer.fill_circle(p.position, p.radius);
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Glyph masks
//!
//! Text is rasterized once into a [`GlyphMask`] - an alpha image whose
//! opaque pixels (alpha >= 128) define the glyph shape. Masks normally
//! come from [`Rasterizer`] but any alpha buffer works, including PNGs
//! loaded with [`GlyphMask::open`].
//!
//! ### Fields
//!
//! [`ParticleField::generate`] rejection-samples mask pixels to place one
//! home per particle on the glyph shape. Oversampling makes particle
//! density track glyph coverage; a 5x5 neighborhood check classifies
//! homes near the boundary as edge particles with a larger radius.
//!
//! ### Stepping
//!
//! [`ParticleField::step`] advances every particle once per tick
//! (nominally 120 Hz): ease toward home at a per-particle inertia-scaled
//! rate, plus a local repulsive push while a drag is active. The two are
//! additive, so dragged particles relax back the moment the pointer
//! leaves.
//!
//! ### The shell
//!
//! [`ParticleText`] wires the pieces to a host: regeneration on text and
//! size changes, pointer tracking with an edge-triggered haptic callback,
//! and wall-clock tick scheduling via [`TickClock`]. Rendering stays
//! external - the core never draws.

pub mod animation;
pub mod clock;
pub mod error;
pub mod field;
pub mod mask;
pub mod particle;
pub mod pointer;
pub mod rasterize;

pub use animation::{MaskSource, ParticleText};
pub use clock::{TickClock, TICK_HZ};
pub use error::{FontError, MaskError};
pub use field::{ParticleField, DEFAULT_PARTICLE_COUNT};
pub use glam::DVec2;
pub use mask::{GlyphMask, OPAQUE_THRESHOLD};
pub use particle::Particle;
pub use pointer::{DragTracker, PointerSample};
pub use rasterize::{Rasterizer, DEFAULT_FONT_SIZE};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use glyphdust::prelude::*;
/// ```
pub mod prelude {
    pub use crate::animation::{MaskSource, ParticleText};
    pub use crate::clock::TickClock;
    pub use crate::field::ParticleField;
    pub use crate::mask::GlyphMask;
    pub use crate::particle::Particle;
    pub use crate::pointer::{DragTracker, PointerSample};
    pub use crate::rasterize::Rasterizer;
    pub use crate::DVec2;
}
