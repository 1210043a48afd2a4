//! Font selection.
//!
//! Fonts are tried tier by tier: a tier is used only when both its bold and its
//! regular file load. When no tier loads, a built-in 8x8 bitmap font is used.
//! Missing fonts are never an error.

use std::path::PathBuf;

#[cfg(feature = "raster")]
mod face;

#[cfg(feature = "raster")]
pub use face::{Face, FontLoadError, FontSet};

/// A bold/regular pair of font files.
#[derive(Debug, Clone, PartialEq)]
pub struct FontTier {
    pub bold: PathBuf,
    pub regular: PathBuf,
}

impl FontTier {
    pub fn new(bold: impl Into<PathBuf>, regular: impl Into<PathBuf>) -> Self {
        Self {
            bold: bold.into(),
            regular: regular.into(),
        }
    }
}

/// DejaVu on Linux, then Helvetica on macOS.
pub fn default_tiers() -> Vec<FontTier> {
    vec![
        FontTier::new(
            "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        ),
        FontTier::new(
            "/System/Library/Fonts/Helvetica.ttc",
            "/System/Library/Fonts/Helvetica.ttc",
        ),
    ]
}

/// What a piece of text is for. Decides weight and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Title,
    Subtitle,
    Description,
    Cta,
}

impl TextRole {
    /// Font size in pixels.
    pub fn size(self) -> f32 {
        match self {
            TextRole::Title => 60.0,
            TextRole::Subtitle => 32.0,
            TextRole::Description => 24.0,
            TextRole::Cta => 28.0,
        }
    }

    pub fn is_bold(self) -> bool {
        matches!(self, TextRole::Title | TextRole::Cta)
    }
}
