//! Text rasterization backend.
//!
//! Turns a string plus a pixel size into a [`GlyphMask`] the field
//! generator can sample. font-kit discovers a usable system font,
//! fontdue lays the text out and rasterizes per-glyph coverage, and the
//! coverage bitmaps are composited into a single alpha mask.
//!
//! Rasterization failure is never fatal: [`Rasterizer::rasterize`]
//! returns `None` for text with no visible glyphs, and callers keep their
//! previous particle field.

use crate::error::FontError;
use crate::mask::GlyphMask;
use font_kit::family_name::FamilyName;
use font_kit::properties::Properties;
use font_kit::source::SystemSource;
use fontdue::layout::{CoordinateSystem, Layout, TextStyle};
use fontdue::{Font, FontSettings};

/// Default text size in pixels, matching the large display-text look of
/// the original effect.
pub const DEFAULT_FONT_SIZE: f32 = 240.0;

/// Rasterizes text into glyph masks using a single loaded font.
pub struct Rasterizer {
    font: Font,
}

impl Rasterizer {
    /// Load a font from raw TTF/OTF bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, FontError> {
        let font = Font::from_bytes(data, FontSettings::default()).map_err(FontError::Parse)?;
        Ok(Self { font })
    }

    /// Load the system's best-matching sans-serif font.
    pub fn from_system() -> Result<Self, FontError> {
        let handle = SystemSource::new()
            .select_best_match(&[FamilyName::SansSerif], &Properties::new())?;
        let font = handle.load()?;
        let data = font.copy_font_data().ok_or(FontError::NoFontData)?;
        Self::from_bytes(&data)
    }

    /// Rasterize `text` at `px` pixels into an alpha mask.
    ///
    /// Returns `None` if the text produces no visible glyphs (empty or
    /// whitespace-only strings, zero-area layouts).
    pub fn rasterize(&self, text: &str, px: f32) -> Option<GlyphMask> {
        if px <= 0.0 {
            return None;
        }

        let mut layout = Layout::new(CoordinateSystem::PositiveYDown);
        layout.append(&[&self.font], &TextStyle::new(text, px, 0));

        // Bounding box over the glyphs that actually have coverage.
        let mut min_x = f32::MAX;
        let mut min_y = f32::MAX;
        let mut max_x = f32::MIN;
        let mut max_y = f32::MIN;
        for glyph in layout.glyphs() {
            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }
            min_x = min_x.min(glyph.x);
            min_y = min_y.min(glyph.y);
            max_x = max_x.max(glyph.x + glyph.width as f32);
            max_y = max_y.max(glyph.y + glyph.height as f32);
        }
        if min_x > max_x || min_y > max_y {
            return None;
        }

        let width = (max_x - min_x).ceil() as u32;
        let height = (max_y - min_y).ceil() as u32;
        if width == 0 || height == 0 {
            return None;
        }

        let mut alpha = vec![0u8; width as usize * height as usize];
        for glyph in layout.glyphs() {
            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }
            let (metrics, coverage) = self.font.rasterize_config(glyph.key);
            let base_x = (glyph.x - min_x).round() as usize;
            let base_y = (glyph.y - min_y).round() as usize;

            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let x = base_x + col;
                    let y = base_y + row;
                    if x >= width as usize || y >= height as usize {
                        continue;
                    }
                    let dst = &mut alpha[y * width as usize + x];
                    // Overlapping glyphs keep the strongest coverage.
                    *dst = (*dst).max(coverage[row * metrics.width + col]);
                }
            }
        }

        GlyphMask::from_alpha(width, height, alpha).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(Rasterizer::from_bytes(&[0u8; 32]).is_err());
    }

    // The system-font tests bail out quietly on hosts with no fonts
    // installed (minimal CI containers).

    #[test]
    fn test_rasterized_text_has_opaque_pixels() {
        let Ok(rasterizer) = Rasterizer::from_system() else {
            return;
        };
        let mask = rasterizer.rasterize("Hi", 64.0).expect("visible text");
        assert!(mask.width() > 0 && mask.height() > 0);
        assert!(mask.first_opaque().is_some());
    }

    #[test]
    fn test_invisible_text_yields_no_mask() {
        let Ok(rasterizer) = Rasterizer::from_system() else {
            return;
        };
        assert!(rasterizer.rasterize("", 64.0).is_none());
        assert!(rasterizer.rasterize("   ", 64.0).is_none());
        assert!(rasterizer.rasterize("Hi", 0.0).is_none());
    }

    #[test]
    fn test_larger_size_yields_larger_mask() {
        let Ok(rasterizer) = Rasterizer::from_system() else {
            return;
        };
        let small = rasterizer.rasterize("A", 32.0).expect("visible text");
        let large = rasterizer.rasterize("A", 128.0).expect("visible text");
        assert!(large.width() > small.width());
        assert!(large.height() > small.height());
    }
}
