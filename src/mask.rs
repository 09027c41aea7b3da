//! Glyph masks - rasterized alpha images of rendered text.
//!
//! A [`GlyphMask`] answers one question for the field generator: which
//! pixels lie "on" the text? Masks are immutable for the duration of a
//! generation call; the core only ever reads them.
//!
//! Masks usually come from [`crate::rasterize::Rasterizer`], but any alpha
//! buffer works - a pre-rendered logo loaded from a PNG behaves exactly
//! like rasterized text:
//!
//! ```ignore
//! let mask = GlyphMask::open("assets/logo.png")?;
//! let field = ParticleField::generate(&mask, canvas, 1000, offset);
//! ```

use crate::error::MaskError;
use std::path::Path;

/// Alpha value at or above which a pixel counts as part of the glyph shape.
pub const OPAQUE_THRESHOLD: u8 = 128;

/// A rasterized alpha image of rendered text.
///
/// Row-major, one byte per pixel, origin at the top-left.
#[derive(Debug, Clone)]
pub struct GlyphMask {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl GlyphMask {
    /// Create a mask from a raw alpha buffer.
    ///
    /// `alpha.len()` must equal `width * height`.
    pub fn from_alpha(width: u32, height: u32, alpha: Vec<u8>) -> Result<Self, MaskError> {
        let expected = width as usize * height as usize;
        if alpha.len() != expected {
            return Err(MaskError::SizeMismatch {
                expected,
                actual: alpha.len(),
            });
        }
        Ok(Self {
            width,
            height,
            alpha,
        })
    }

    /// Create a mask from a raw RGBA buffer, keeping only the alpha channel.
    ///
    /// `rgba.len()` must equal `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self, MaskError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(MaskError::SizeMismatch {
                expected,
                actual: rgba.len(),
            });
        }
        let alpha = rgba.chunks_exact(4).map(|px| px[3]).collect();
        Ok(Self {
            width,
            height,
            alpha,
        })
    }

    /// Create a mask from a decoded RGBA image.
    pub fn from_rgba_image(image: &image::RgbaImage) -> Self {
        let alpha = image.pixels().map(|px| px.0[3]).collect();
        Self {
            width: image.width(),
            height: image.height(),
            alpha,
        }
    }

    /// Load a mask from an image file (PNG).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, MaskError> {
        let image = image::open(path)?.to_rgba8();
        Ok(Self::from_rgba_image(&image))
    }

    /// Mask width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total pixel count.
    #[inline]
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Alpha value at `(x, y)`. Out-of-bounds reads return 0.
    #[inline]
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.alpha[y as usize * self.width as usize + x as usize]
    }

    /// Whether the pixel at `(x, y)` is part of the glyph shape.
    #[inline]
    pub fn is_opaque(&self, x: u32, y: u32) -> bool {
        self.alpha(x, y) >= OPAQUE_THRESHOLD
    }

    /// Fraction of opaque pixels in the square neighborhood of `radius`
    /// around `(x, y)`, counting only in-bounds neighbors.
    ///
    /// Returns 0.0 for a degenerate mask where nothing is in bounds.
    pub fn opaque_fraction_around(&self, x: u32, y: u32, radius: u32) -> f64 {
        let r = radius as i64;
        let (cx, cy) = (x as i64, y as i64);
        let mut opaque = 0u32;
        let mut checked = 0u32;

        for ny in (cy - r)..=(cy + r) {
            for nx in (cx - r)..=(cx + r) {
                if nx < 0 || ny < 0 || nx >= self.width as i64 || ny >= self.height as i64 {
                    continue;
                }
                checked += 1;
                if self.is_opaque(nx as u32, ny as u32) {
                    opaque += 1;
                }
            }
        }

        if checked == 0 {
            return 0.0;
        }
        opaque as f64 / checked as f64
    }

    /// First opaque pixel in row-major order, if any.
    ///
    /// Used as the deterministic fallback when rejection sampling runs out
    /// of budget.
    pub fn first_opaque(&self) -> Option<(u32, u32)> {
        self.alpha
            .iter()
            .position(|&a| a >= OPAQUE_THRESHOLD)
            .map(|i| {
                let x = (i % self.width as usize) as u32;
                let y = (i / self.width as usize) as u32;
                (x, y)
            })
    }
}
