use std::fs;
use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale};
use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

use super::{FontTier, TextRole};

const GLYPH_SIZE: u32 = 8;

/// Errors from loading a font file. Always recovered by falling back.
#[derive(Debug, thiserror::Error)]
pub enum FontLoadError {
    #[error("Failed to read font {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid font file {0}")]
    Invalid(String),
}

fn load_font(path: &Path) -> Result<FontVec, FontLoadError> {
    let data = fs::read(path).map_err(|source| FontLoadError::Read {
        path: path.display().to_string(),
        source,
    })?;
    FontVec::try_from_vec(data).map_err(|_| FontLoadError::Invalid(path.display().to_string()))
}

enum Typefaces {
    Outline { bold: FontVec, regular: FontVec },
    Builtin,
}

/// The fonts used to draw one preview image.
pub struct FontSet {
    faces: Typefaces,
}

impl FontSet {
    /// Load the first tier whose fonts all load, or the built-in font.
    pub fn load(tiers: &[FontTier]) -> Self {
        for tier in tiers {
            match Self::load_tier(tier) {
                Ok(set) => {
                    tracing::debug!(
                        "Using fonts {} / {}",
                        tier.bold.display(),
                        tier.regular.display()
                    );
                    return set;
                }
                Err(e) => tracing::debug!("Font tier unavailable: {}", e),
            }
        }

        tracing::warn!("Using built-in font - install TrueType fonts for better results");
        Self::builtin()
    }

    fn load_tier(tier: &FontTier) -> Result<Self, FontLoadError> {
        Ok(Self {
            faces: Typefaces::Outline {
                bold: load_font(&tier.bold)?,
                regular: load_font(&tier.regular)?,
            },
        })
    }

    /// The built-in bitmap font.
    pub fn builtin() -> Self {
        Self {
            faces: Typefaces::Builtin,
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.faces, Typefaces::Builtin)
    }

    /// The face to use for `role`.
    pub fn face(&self, role: TextRole) -> Face<'_> {
        match &self.faces {
            Typefaces::Outline { bold, regular } => {
                let font = if role.is_bold() { bold } else { regular };
                Face::Outline {
                    font,
                    scale: em_scale(role.size(), font.height_unscaled(), font.units_per_em()),
                }
            }
            Typefaces::Builtin => Face::Bitmap {
                scale: (role.size() / 20.0).round().max(1.0) as u32,
            },
        }
    }
}

/// A font at a fixed size.
pub enum Face<'a> {
    Outline { font: &'a FontVec, scale: PxScale },
    /// 8x8 glyphs, each pixel drawn as a `scale`x`scale` block
    Bitmap { scale: u32 },
}

impl Face<'_> {
    /// Rendered width of `text` in pixels.
    pub fn text_width(&self, text: &str) -> u32 {
        match self {
            Face::Outline { font, scale } => text_size(*scale, *font, text).0,
            Face::Bitmap { scale } => text.chars().count() as u32 * GLYPH_SIZE * scale,
        }
    }

    /// Draw `text` with its top-left corner at `(x, y)`.
    pub fn draw(&self, canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, text: &str) {
        match self {
            Face::Outline { font, scale } => {
                draw_text_mut(canvas, color, x, y, *scale, *font, text)
            }
            Face::Bitmap { scale } => draw_bitmap_text(canvas, color, x, y, *scale, text),
        }
    }
}

/// Scale at which one em spans `size` pixels.
///
/// `PxScale` measures ascent to descent, which is taller than the em box for
/// most fonts.
fn em_scale(size: f32, height_unscaled: f32, units_per_em: Option<f32>) -> PxScale {
    match units_per_em {
        Some(upem) if upem > 0.0 => PxScale::from(size * height_unscaled / upem),
        _ => PxScale::from(size),
    }
}

fn glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

fn draw_bitmap_text(canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, scale: u32, text: &str) {
    let advance = (GLYPH_SIZE * scale) as i32;
    let block = scale as i32;

    for (index, c) in text.chars().enumerate() {
        let origin_x = x + index as i32 * advance;
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                // Bit 0 is the leftmost pixel.
                if bits & (1 << col) == 0 {
                    continue;
                }
                let rect = Rect::at(origin_x + col as i32 * block, y + row as i32 * block)
                    .of_size(scale, scale);
                draw_filled_rect_mut(canvas, rect, color);
            }
        }
    }
}
