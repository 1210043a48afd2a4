//! Generating the preview image from a configuration file.

use std::path::{Path, PathBuf};

use clawmark_config::{load_config, ConfigError};

use crate::config::OgConfig;
use crate::fonts::{default_tiers, FontTier};

/// Whether this build can draw images.
pub const RASTER_AVAILABLE: bool = cfg!(feature = "raster");

/// Summary of a generated image.
#[derive(Debug, Clone, PartialEq)]
pub struct OgReport {
    pub output: PathBuf,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub width: u32,
    pub height: u32,
}

/// Errors that can occur while generating the preview image.
#[derive(Debug, thiserror::Error)]
pub enum OgError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid {section}: {message}")]
    InvalidOverride { section: String, message: String },

    #[error("Invalid colour for '{key}': '{value}' (expected #rrggbb or #rgb)")]
    InvalidColor { key: String, value: String },

    #[error("Invalid image size {width}x{height}: width and height must be between 1 and {max}", max = crate::config::MAX_DIMENSION)]
    InvalidDimensions { width: u32, height: u32 },

    #[error("{0}")]
    MissingOptionalDependency(String),

    #[error("Failed to encode PNG {path}: {message}")]
    Encode { path: String, message: String },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Fail early when the drawing stack was not compiled in.
pub fn ensure_raster_support() -> Result<(), OgError> {
    if RASTER_AVAILABLE {
        Ok(())
    } else {
        Err(OgError::MissingOptionalDependency(
            "Image drawing support is not available. Rebuild clawmark-og with the `raster` feature \
             enabled (cargo install clawmark --features raster), or create a 1200x630 PNG by hand."
                .to_string(),
        ))
    }
}

/// Load `config_path`, derive the preview settings and write the PNG.
pub fn create_og_image(config_path: &Path) -> Result<OgReport, OgError> {
    create_og_image_with_fonts(config_path, &default_tiers())
}

/// Same as [`create_og_image`] with an explicit font search order.
pub fn create_og_image_with_fonts(
    config_path: &Path,
    fonts: &[FontTier],
) -> Result<OgReport, OgError> {
    ensure_raster_support()?;

    let doc = load_config(config_path)?;
    let og = OgConfig::derive(&doc)?;
    og.validate()?;

    write_image(&og, fonts)?;

    Ok(OgReport {
        output: og.output,
        title: og.title,
        subtitle: og.subtitle,
        description: og.description,
        width: og.width,
        height: og.height,
    })
}

#[cfg(feature = "raster")]
fn write_image(og: &OgConfig, fonts: &[FontTier]) -> Result<(), OgError> {
    use image::{ImageError, ImageFormat};

    use crate::fonts::FontSet;
    use crate::render::render_og_image;

    let fonts = FontSet::load(fonts);
    let canvas = render_og_image(og, &fonts)?;

    if let Some(parent) = og.output.parent() {
        std::fs::create_dir_all(parent).map_err(|source| OgError::Write {
            path: parent.display().to_string(),
            source,
        })?;
    }

    canvas
        .save_with_format(&og.output, ImageFormat::Png)
        .map_err(|e| match e {
            ImageError::IoError(source) => OgError::Write {
                path: og.output.display().to_string(),
                source,
            },
            other => OgError::Encode {
                path: og.output.display().to_string(),
                message: other.to_string(),
            },
        })
}

#[cfg(not(feature = "raster"))]
fn write_image(_og: &OgConfig, _fonts: &[FontTier]) -> Result<(), OgError> {
    ensure_raster_support()
}

#[cfg(all(test, feature = "raster"))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn no_fonts() -> Vec<FontTier> {
        vec![FontTier::new("/nonexistent/bold.ttf", "/nonexistent/regular.ttf")]
    }

    #[test]
    fn writes_png_with_configured_size() {
        let temp = tempdir().unwrap();
        let output = temp.path().join("nested/dir/card.png");
        let config = temp.path().join("config.yaml");
        fs::write(
            &config,
            format!(
                "profile:\n  name: Ada\n  bio: Builds things\nadvanced:\n  og_image_config:\n    width: 600\n    height: 315\n    output: {}\n",
                output.display()
            ),
        )
        .unwrap();

        let report = create_og_image_with_fonts(&config, &no_fonts()).unwrap();

        assert_eq!(report.output, output);
        assert_eq!(report.title, "Ada");
        assert_eq!(report.subtitle, "Builds things");
        assert_eq!((report.width, report.height), (600, 315));

        let png = image::open(&output).unwrap();
        assert_eq!((png.width(), png.height()), (600, 315));
        assert!(png.as_rgb8().is_some());
    }

    #[test]
    fn overwrites_existing_image() {
        let temp = tempdir().unwrap();
        let output = temp.path().join("card.png");
        fs::write(&output, b"old").unwrap();
        let config = temp.path().join("config.yaml");
        fs::write(
            &config,
            format!("advanced:\n  og_image_config:\n    output: {}\n", output.display()),
        )
        .unwrap();

        create_og_image_with_fonts(&config, &no_fonts()).unwrap();

        assert_eq!(image::open(&output).unwrap().width(), 1200);
    }

    #[test]
    fn reports_unwritable_output_as_write_error() {
        let temp = tempdir().unwrap();
        let output = temp.path().join("card.png");
        fs::create_dir(&output).unwrap();
        let config = temp.path().join("config.yaml");
        fs::write(
            &config,
            format!("advanced:\n  og_image_config:\n    output: {}\n", output.display()),
        )
        .unwrap();

        let err = create_og_image_with_fonts(&config, &no_fonts()).unwrap_err();

        let expected = output.display().to_string();
        assert!(matches!(err, OgError::Write { ref path, .. } if *path == expected));
        assert!(output.is_dir());
    }

    #[test]
    fn missing_config_writes_nothing() {
        let temp = tempdir().unwrap();

        let err = create_og_image_with_fonts(&temp.path().join("config.yaml"), &no_fonts())
            .unwrap_err();

        assert!(matches!(err, OgError::Config(ConfigError::NotFound(_))));
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn invalid_color_writes_nothing() {
        let temp = tempdir().unwrap();
        let output = temp.path().join("card.png");
        let config = temp.path().join("config.yaml");
        fs::write(
            &config,
            format!(
                "advanced:\n  og_image_config:\n    output: {}\n    colors:\n      text: white\n",
                output.display()
            ),
        )
        .unwrap();

        let err = create_og_image_with_fonts(&config, &no_fonts()).unwrap_err();

        assert!(err.to_string().contains("'text'"));
        assert!(!output.exists());
    }
}
