//! Particle field generation and stepping.
//!
//! A [`ParticleField`] is the ordered population of particles for one
//! piece of text. It is created wholesale from a [`GlyphMask`] and
//! replaced wholesale whenever the text or canvas size changes - there is
//! no particle identity across regenerations. Between regenerations the
//! field is mutated in place, once per tick, by [`ParticleField::step`].
//!
//! Generation works by rejection sampling: draw random mask pixels until
//! one lands on the glyph shape, then park the particle's home there.
//! Oversampling is the point - denser glyph regions accumulate more
//! particles, so local particle density tracks local glyph coverage.

use crate::mask::GlyphMask;
use crate::particle::{
    Particle, EDGE_RADIUS_MAX, EDGE_RADIUS_MIN, INERTIA_MAX, INERTIA_MIN, INTERIOR_RADIUS,
};
use crate::pointer::PointerSample;
use glam::DVec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Neighborhood radius inspected by the edge classifier (5x5 window).
pub const EDGE_CHECK_RADIUS: u32 = 2;

/// Opaque-neighbor fraction below which a home pixel counts as an edge.
pub const EDGE_OPAQUE_FRACTION: f64 = 0.8;

/// Default particle population size.
pub const DEFAULT_PARTICLE_COUNT: usize = 1000;

/// Rejection sampling retry budget, as a multiple of the mask area.
const RETRY_BUDGET_PER_PIXEL: usize = 4;

/// An ordered collection of particles forming one rendered text.
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// An empty field, the state before the first successful generation.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The offset that centers `mask` within a canvas of `canvas_size`.
    pub fn centered_offset(mask: &GlyphMask, canvas_size: DVec2) -> DVec2 {
        DVec2::new(
            (canvas_size.x - mask.width() as f64) / 2.0,
            (canvas_size.y - mask.height() as f64) / 2.0,
        )
    }

    /// Generate a field of `count` particles whose homes lie on the glyph
    /// shape of `mask`, shifted by `offset` into canvas space.
    ///
    /// Starting positions are scattered across an area larger than the
    /// canvas so particles visibly fly in on first render. A degenerate
    /// canvas (either dimension <= 0) or a mask with no opaque pixels
    /// yields an empty field; callers re-invoke once valid inputs exist.
    pub fn generate(mask: &GlyphMask, canvas_size: DVec2, count: usize, offset: DVec2) -> Self {
        Self::generate_with_rng(mask, canvas_size, count, offset, &mut SmallRng::from_entropy())
    }

    /// Like [`generate`](Self::generate), but seeded for reproducible
    /// sampling, classification and scatter.
    pub fn generate_seeded(
        mask: &GlyphMask,
        canvas_size: DVec2,
        count: usize,
        offset: DVec2,
        seed: u64,
    ) -> Self {
        Self::generate_with_rng(
            mask,
            canvas_size,
            count,
            offset,
            &mut SmallRng::seed_from_u64(seed),
        )
    }

    fn generate_with_rng(
        mask: &GlyphMask,
        canvas_size: DVec2,
        count: usize,
        offset: DVec2,
        rng: &mut SmallRng,
    ) -> Self {
        if canvas_size.x <= 0.0 || canvas_size.y <= 0.0 {
            return Self::empty();
        }
        // An all-transparent mask is valid input; it just renders nothing.
        let Some(fallback) = mask.first_opaque() else {
            return Self::empty();
        };

        let (width, height) = (mask.width(), mask.height());
        let budget = mask.area().saturating_mul(RETRY_BUDGET_PER_PIXEL).max(64);

        let particles = (0..count)
            .map(|_| {
                // Rejection-sample a home pixel on the glyph. The budget
                // keeps a pathological mask from looping forever; the
                // fallback pixel is opaque by construction.
                let mut home_pixel = fallback;
                for _ in 0..budget {
                    let x = rng.gen_range(0..width);
                    let y = rng.gen_range(0..height);
                    if mask.is_opaque(x, y) {
                        home_pixel = (x, y);
                        break;
                    }
                }
                let (x, y) = home_pixel;

                let near_edge =
                    mask.opaque_fraction_around(x, y, EDGE_CHECK_RADIUS) < EDGE_OPAQUE_FRACTION;
                let radius = if near_edge {
                    rng.gen_range(EDGE_RADIUS_MIN..EDGE_RADIUS_MAX)
                } else {
                    INTERIOR_RADIUS
                };

                Particle {
                    position: DVec2::new(
                        rng.gen_range(-canvas_size.x..canvas_size.x * 2.0),
                        rng.gen_range(0.0..canvas_size.y * 2.0),
                    ),
                    home: DVec2::new(x as f64 + offset.x, y as f64 + offset.y),
                    inertia: rng.gen_range(INERTIA_MIN..INERTIA_MAX),
                    radius,
                }
            })
            .collect();

        Self { particles }
    }

    /// Advance every particle by one tick.
    ///
    /// In-place and allocation-free; meant to be called at the animation
    /// cadence (nominally 120 Hz) from a single timeline.
    pub fn step(&mut self, pointer: Option<&PointerSample>) {
        for particle in &mut self.particles {
            particle.update(pointer);
        }
    }

    /// Read-only view of the particles, in creation order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles in the field.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the field holds no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Iterate over the particles.
    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }
}

impl<'a> IntoIterator for &'a ParticleField {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::OPAQUE_THRESHOLD;

    const CANVAS: DVec2 = DVec2::new(400.0, 300.0);

    /// Fully opaque square mask.
    fn solid_mask(side: u32) -> GlyphMask {
        GlyphMask::from_alpha(side, side, vec![255; (side * side) as usize]).unwrap()
    }

    /// 20x20 mask with a single opaque pixel at (7, 9).
    fn lone_pixel_mask() -> GlyphMask {
        let mut alpha = vec![0u8; 400];
        alpha[9 * 20 + 7] = 255;
        GlyphMask::from_alpha(20, 20, alpha).unwrap()
    }

    #[test]
    fn test_count_invariant() {
        let mask = solid_mask(16);
        for count in [1, 4, 250, 1000] {
            let field = ParticleField::generate(&mask, CANVAS, count, DVec2::ZERO);
            assert_eq!(field.len(), count);
        }
    }

    #[test]
    fn test_homes_lie_on_opaque_pixels() {
        let mask = lone_pixel_mask();
        let offset = ParticleField::centered_offset(&mask, CANVAS);
        let field = ParticleField::generate(&mask, CANVAS, 100, offset);

        for particle in &field {
            let x = (particle.home.x - offset.x).round() as u32;
            let y = (particle.home.y - offset.y).round() as u32;
            assert!(mask.alpha(x, y) >= OPAQUE_THRESHOLD);
        }
    }

    #[test]
    fn test_degenerate_canvas_yields_empty_field() {
        let mask = solid_mask(8);
        let field = ParticleField::generate(&mask, DVec2::new(0.0, 300.0), 100, DVec2::ZERO);
        assert!(field.is_empty());

        let field = ParticleField::generate(&mask, DVec2::new(400.0, -1.0), 100, DVec2::ZERO);
        assert!(field.is_empty());
    }

    #[test]
    fn test_transparent_mask_yields_empty_field() {
        let mask = GlyphMask::from_alpha(12, 12, vec![0; 144]).unwrap();
        let field = ParticleField::generate(&mask, CANVAS, 100, DVec2::ZERO);
        assert!(field.is_empty());
    }

    #[test]
    fn test_scatter_bounds() {
        let mask = solid_mask(10);
        let field = ParticleField::generate(&mask, CANVAS, 500, DVec2::ZERO);
        for particle in &field {
            assert!(particle.position.x >= -CANVAS.x && particle.position.x < CANVAS.x * 2.0);
            assert!(particle.position.y >= 0.0 && particle.position.y < CANVAS.y * 2.0);
        }
    }

    #[test]
    fn test_inertia_and_radius_ranges() {
        let mask = solid_mask(10);
        let field = ParticleField::generate(&mask, CANVAS, 500, DVec2::ZERO);
        for particle in &field {
            assert!(particle.inertia >= INERTIA_MIN && particle.inertia < INERTIA_MAX);
            let interior = particle.radius == INTERIOR_RADIUS;
            let edge = particle.radius >= EDGE_RADIUS_MIN && particle.radius < EDGE_RADIUS_MAX;
            assert!(interior || edge);
        }
    }

    #[test]
    fn test_edge_classification() {
        // The lone opaque pixel has an almost entirely transparent
        // neighborhood: every particle is an edge particle.
        let field = ParticleField::generate(&lone_pixel_mask(), CANVAS, 50, DVec2::ZERO);
        for particle in &field {
            assert!(particle.radius >= EDGE_RADIUS_MIN && particle.radius < EDGE_RADIUS_MAX);
        }

        // In a large solid mask, interior pixels dominate: with 200 draws
        // some particle lands away from the border and stays interior.
        let field = ParticleField::generate(&solid_mask(64), CANVAS, 200, DVec2::ZERO);
        assert!(field.iter().any(|p| p.radius == INTERIOR_RADIUS));
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let mask = solid_mask(32);
        let a = ParticleField::generate_seeded(&mask, CANVAS, 200, DVec2::new(5.0, 5.0), 7);
        let b = ParticleField::generate_seeded(&mask, CANVAS, 200, DVec2::new(5.0, 5.0), 7);
        assert_eq!(a.particles(), b.particles());

        let c = ParticleField::generate_seeded(&mask, CANVAS, 200, DVec2::new(5.0, 5.0), 8);
        assert_ne!(a.particles(), c.particles());
    }

    #[test]
    fn test_field_converges_without_pointer() {
        let mask = solid_mask(10);
        let mut field = ParticleField::generate_seeded(&mask, CANVAS, 64, DVec2::ZERO, 3);

        for _ in 0..2000 {
            field.step(None);
        }
        for particle in &field {
            assert!(particle.at_home());
        }
    }
}
