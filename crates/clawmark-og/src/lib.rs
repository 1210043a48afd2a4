//! Open Graph preview image generator for ClawMark.
//!
//! Derives the preview text and palette from a site configuration and draws a
//! fixed-layout PNG card: gradient background, two accent circles, centered
//! title/subtitle/description, a rounded call-to-action button and a small
//! diagonal flourish.

pub mod color;
pub mod config;
pub mod fonts;
pub mod generator;
#[cfg(feature = "raster")]
pub mod render;

pub use config::{OgConfig, Palette};
pub use fonts::FontTier;
pub use generator::{
    create_og_image, create_og_image_with_fonts, ensure_raster_support, OgError, OgReport,
    RASTER_AVAILABLE,
};
