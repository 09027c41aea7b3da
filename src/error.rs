//! Error types for glyphdust.
//!
//! Only the boundaries can fail: loading a font or loading a mask image.
//! Everything on the simulation path recovers locally - a bad mask or a
//! degenerate canvas produces an empty or unchanged field, never an error.

use std::fmt;

/// Errors that can occur while loading a font for rasterization.
#[derive(Debug)]
pub enum FontError {
    /// No matching system font could be selected.
    Selection(font_kit::error::SelectionError),
    /// A matching font was found but could not be loaded.
    Loading(font_kit::error::FontLoadingError),
    /// The loaded font exposes no raw data to parse.
    NoFontData,
    /// fontdue could not parse the font bytes.
    Parse(&'static str),
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontError::Selection(e) => write!(f, "Failed to select a system font: {}", e),
            FontError::Loading(e) => write!(f, "Failed to load font: {}", e),
            FontError::NoFontData => write!(f, "Selected font exposes no raw font data"),
            FontError::Parse(msg) => write!(f, "Failed to parse font: {}", msg),
        }
    }
}

impl std::error::Error for FontError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FontError::Selection(e) => Some(e),
            FontError::Loading(e) => Some(e),
            _ => None,
        }
    }
}

impl From<font_kit::error::SelectionError> for FontError {
    fn from(e: font_kit::error::SelectionError) -> Self {
        FontError::Selection(e)
    }
}

impl From<font_kit::error::FontLoadingError> for FontError {
    fn from(e: font_kit::error::FontLoadingError) -> Self {
        FontError::Loading(e)
    }
}

/// Errors that can occur while constructing a glyph mask.
#[derive(Debug)]
pub enum MaskError {
    /// Buffer length does not match the declared dimensions.
    SizeMismatch {
        /// Length the dimensions require.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },
    /// Failed to decode an image file.
    Image(image::ImageError),
}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskError::SizeMismatch { expected, actual } => write!(
                f,
                "Mask buffer length {} does not match dimensions (expected {})",
                actual, expected
            ),
            MaskError::Image(e) => write!(f, "Failed to load mask image: {}", e),
        }
    }
}

impl std::error::Error for MaskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MaskError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for MaskError {
    fn from(e: image::ImageError) -> Self {
        MaskError::Image(e)
    }
}
