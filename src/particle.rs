//! Particle state and the per-tick physics update.
//!
//! Each particle tracks two locations: `position`, where it is drawn this
//! frame, and `home`, the glyph pixel it settles onto. Every tick the
//! particle eases toward home at a rate set by its `inertia`; an active
//! pointer adds a local repulsive push on top of the easing, so dragged
//! particles still relax back once the pointer moves away.
//!
//! The exact coefficients below are tuning knobs, not contracts - they
//! were picked to read well at 120 Hz on a roughly 1000x1000 pt canvas.

use crate::pointer::PointerSample;
use glam::DVec2;

/// Rendered radius for particles inside the glyph body.
pub const INTERIOR_RADIUS: f64 = 2.0;

/// Rendered radius range for particles near a glyph boundary.
pub const EDGE_RADIUS_MIN: f64 = 2.5;
/// Upper bound (exclusive) of the edge radius range.
pub const EDGE_RADIUS_MAX: f64 = 3.5;

/// Inertia range. Higher inertia means a smaller per-tick step toward
/// home, so convergence time scales with this value.
pub const INERTIA_MIN: f64 = 5.0;
/// Upper bound (exclusive) of the inertia range.
pub const INERTIA_MAX: f64 = 20.0;

/// Distance from home below which a particle snaps exactly onto it.
pub const SNAP_EPSILON: f64 = 0.1;

/// Radius of the pointer's influence, in canvas units.
pub const INTERACTION_RADIUS: f64 = 100.0;

/// Base repulsion displacement per tick for a particle at the pointer.
pub const REPULSION_STRENGTH: f64 = 6.0;

/// Extra repulsion per unit of pointer speed (points per second).
pub const VELOCITY_BOOST: f64 = 0.0005;

/// A single particle of the text cloud.
///
/// `home`, `inertia` and `radius` are set at creation and never mutated
/// afterward; only `position` evolves tick over tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Current rendered location.
    pub position: DVec2,
    /// Glyph-derived resting location.
    pub home: DVec2,
    /// Inverse responsiveness in [`INERTIA_MIN`, `INERTIA_MAX`).
    pub inertia: f64,
    /// Rendered circle radius.
    pub radius: f64,
}

impl Particle {
    /// Advance this particle by one tick.
    ///
    /// Always eases toward `home` by `1 / inertia` of the remaining
    /// distance, snapping exactly onto it within [`SNAP_EPSILON`]. While a
    /// drag is active, particles within [`INTERACTION_RADIUS`] of the
    /// pointer additionally get pushed away from it, harder near the
    /// pointer and harder still for fast drags. The two displacements are
    /// additive.
    pub fn update(&mut self, pointer: Option<&PointerSample>) {
        let to_home = self.home - self.position;
        if to_home.length() <= SNAP_EPSILON {
            self.position = self.home;
        } else {
            self.position += to_home / self.inertia;
        }

        if let Some(sample) = pointer {
            let away = self.position - sample.location;
            let distance = away.length();
            if distance < INTERACTION_RADIUS && distance > f64::EPSILON {
                let falloff = (INTERACTION_RADIUS - distance) / INTERACTION_RADIUS;
                let boost = 1.0 + sample.velocity.length() * VELOCITY_BOOST;
                self.position += (away / distance) * falloff * REPULSION_STRENGTH * boost;
            }
        }
    }

    /// Distance from the current position to home.
    #[inline]
    pub fn distance_to_home(&self) -> f64 {
        self.position.distance(self.home)
    }

    /// Whether this particle has settled exactly onto its home.
    #[inline]
    pub fn at_home(&self) -> bool {
        self.position == self.home
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle_at(position: DVec2, home: DVec2, inertia: f64) -> Particle {
        Particle {
            position,
            home,
            inertia,
            radius: INTERIOR_RADIUS,
        }
    }

    #[test]
    fn test_easing_is_monotonic() {
        let mut p = particle_at(DVec2::new(200.0, -50.0), DVec2::new(40.0, 40.0), 12.0);
        let mut last = p.distance_to_home();
        for _ in 0..500 {
            p.update(None);
            let now = p.distance_to_home();
            assert!(now <= last, "distance to home increased: {} -> {}", last, now);
            last = now;
        }
        assert!(p.at_home());
    }

    #[test]
    fn test_snap_is_exact_and_idempotent() {
        let home = DVec2::new(10.0, 10.0);
        let mut p = particle_at(home + DVec2::new(0.05, 0.0), home, 8.0);

        p.update(None);
        assert_eq!(p.position, home);

        // Further ticks at rest leave the position bit-identical.
        for _ in 0..10 {
            p.update(None);
            assert_eq!(p.position, home);
        }
    }

    #[test]
    fn test_higher_inertia_converges_slower() {
        let start = DVec2::new(100.0, 0.0);
        let home = DVec2::ZERO;
        let mut quick = particle_at(start, home, INERTIA_MIN);
        let mut slow = particle_at(start, home, 19.9);

        for _ in 0..10 {
            quick.update(None);
            slow.update(None);
        }
        assert!(quick.distance_to_home() < slow.distance_to_home());
    }

    #[test]
    fn test_pointer_outside_radius_has_no_effect() {
        let home = DVec2::new(50.0, 50.0);
        let mut with_pointer = particle_at(DVec2::new(60.0, 50.0), home, 10.0);
        let mut without = with_pointer;

        let far = PointerSample {
            location: home + DVec2::new(INTERACTION_RADIUS + 50.0, 0.0),
            velocity: DVec2::new(900.0, 0.0),
        };
        with_pointer.update(Some(&far));
        without.update(None);

        assert_eq!(with_pointer.position, without.position);
    }

    #[test]
    fn test_pointer_repels_nearby_particle() {
        let home = DVec2::new(50.0, 50.0);
        let mut p = particle_at(home, home, 10.0);

        // Pointer just left of the particle pushes it to the right.
        let sample = PointerSample {
            location: home - DVec2::new(20.0, 0.0),
            velocity: DVec2::ZERO,
        };
        p.update(Some(&sample));
        assert!(p.position.x > home.x);
        assert_eq!(p.position.y, home.y);
    }

    #[test]
    fn test_faster_drags_push_harder() {
        let home = DVec2::new(50.0, 50.0);
        let location = home - DVec2::new(20.0, 0.0);

        let mut slow = particle_at(home, home, 10.0);
        let mut fast = particle_at(home, home, 10.0);

        slow.update(Some(&PointerSample {
            location,
            velocity: DVec2::ZERO,
        }));
        fast.update(Some(&PointerSample {
            location,
            velocity: DVec2::new(2000.0, 0.0),
        }));

        assert!(fast.position.x > slow.position.x);
    }

    #[test]
    fn test_repulsion_and_easing_are_additive() {
        // A particle displaced from home with a pointer behind it keeps
        // moving toward home: the easing term is not suppressed.
        let home = DVec2::new(0.0, 0.0);
        let mut p = particle_at(DVec2::new(60.0, 0.0), home, 5.0);
        let sample = PointerSample {
            location: DVec2::new(90.0, 0.0),
            velocity: DVec2::ZERO,
        };

        let before = p.position.x;
        p.update(Some(&sample));
        // Easing pulls 12 units left, repulsion pushes ~4.2 left (away
        // from the pointer on the right) - net movement is toward home.
        assert!(p.position.x < before);
    }
}
