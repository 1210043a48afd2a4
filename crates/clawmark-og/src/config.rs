//! Preview image settings derived from a site configuration.
//!
//! Values are layered, each layer touching only the keys it sets:
//!
//! 1. built-in defaults
//! 2. `profile.name` as title, first 50 characters of `profile.bio` as subtitle
//! 3. `site.title` as title
//! 4. characters 50..120 of a bio longer than 60 characters as description
//! 5. `advanced.og_image_config` text, size and output keys
//! 6. `advanced.og_image_config.colors`, or failing that `advanced.theme_options`

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use clawmark_config::SiteDocument;

use crate::color::{parse_hex_color, Rgb8};
use crate::generator::OgError;

/// Largest accepted width or height, in pixels.
pub const MAX_DIMENSION: u32 = 10_000;

const SUBTITLE_CHARS: usize = 50;
const DESCRIPTION_END: usize = 120;
const DESCRIPTION_MIN_BIO: usize = 60;

/// The eight named colours of the preview card, as hex strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub bg_start: String,
    pub bg_end: String,
    pub text: String,
    pub subtitle: String,
    pub description: String,
    pub button: String,
    pub accent1: String,
    pub accent2: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            bg_start: "#1e1b4b".to_string(),
            bg_end: "#4f46e5".to_string(),
            text: "#ffffff".to_string(),
            subtitle: "#c7d2fe".to_string(),
            description: "#a5b4fc".to_string(),
            button: "#6366f1".to_string(),
            accent1: "#6366f1".to_string(),
            accent2: "#8b5cf6".to_string(),
        }
    }
}

/// Parsed palette, ready for drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbPalette {
    pub bg_start: Rgb8,
    pub bg_end: Rgb8,
    pub text: Rgb8,
    pub subtitle: Rgb8,
    pub description: Rgb8,
    pub button: Rgb8,
    pub accent1: Rgb8,
    pub accent2: Rgb8,
}

impl Palette {
    /// Set a colour by key. Returns `false` for unknown keys.
    pub fn set(&mut self, key: &str, value: String) -> bool {
        let slot = match key {
            "bg_start" => &mut self.bg_start,
            "bg_end" => &mut self.bg_end,
            "text" => &mut self.text,
            "subtitle" => &mut self.subtitle,
            "description" => &mut self.description,
            "button" => &mut self.button,
            "accent1" => &mut self.accent1,
            "accent2" => &mut self.accent2,
            _ => return false,
        };
        *slot = value;
        true
    }

    /// Parse every colour.
    pub fn to_rgb(&self) -> Result<RgbPalette, OgError> {
        let parse = |key: &str, value: &str| {
            parse_hex_color(value).ok_or_else(|| OgError::InvalidColor {
                key: key.to_string(),
                value: value.to_string(),
            })
        };

        Ok(RgbPalette {
            bg_start: parse("bg_start", &self.bg_start)?,
            bg_end: parse("bg_end", &self.bg_end)?,
            text: parse("text", &self.text)?,
            subtitle: parse("subtitle", &self.subtitle)?,
            description: parse("description", &self.description)?,
            button: parse("button", &self.button)?,
            accent1: parse("accent1", &self.accent1)?,
            accent2: parse("accent2", &self.accent2)?,
        })
    }
}

/// Everything needed to draw and save the preview image.
#[derive(Debug, Clone, PartialEq)]
pub struct OgConfig {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub cta: String,
    pub colors: Palette,
    pub width: u32,
    pub height: u32,
    pub output: PathBuf,
}

impl Default for OgConfig {
    fn default() -> Self {
        Self {
            title: "Your Name".to_string(),
            subtitle: "Your Bio".to_string(),
            description: String::new(),
            cta: "View All Links".to_string(),
            colors: Palette::default(),
            width: 1200,
            height: 630,
            output: PathBuf::from("assets/images/og-preview.png"),
        }
    }
}

/// `advanced.og_image_config`
#[derive(Debug, Default, Deserialize)]
struct OgOverrides {
    title: Option<String>,
    subtitle: Option<String>,
    description: Option<String>,
    cta: Option<String>,
    colors: Option<BTreeMap<String, String>>,
    width: Option<u32>,
    height: Option<u32>,
    output: Option<PathBuf>,
}

/// `advanced.theme_options`
#[derive(Debug, Default, Deserialize)]
struct ThemeOptions {
    primary_color: Option<String>,
    secondary_color: Option<String>,
}

fn advanced_section<T>(doc: &SiteDocument, key: &str) -> Result<T, OgError>
where
    T: DeserializeOwned + Default,
{
    match doc.advanced_entry(key) {
        Some(value) => {
            serde_yaml::from_value(value.clone()).map_err(|e| OgError::InvalidOverride {
                section: format!("advanced.{key}"),
                message: e.to_string(),
            })
        }
        None => Ok(T::default()),
    }
}

/// Characters `start..end` of `text`, counted in Unicode scalar values.
fn char_range(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end.saturating_sub(start)).collect()
}

impl OgConfig {
    /// Derive the preview settings from a site document.
    pub fn derive(doc: &SiteDocument) -> Result<Self, OgError> {
        let overrides: OgOverrides = advanced_section(doc, "og_image_config")?;
        let mut og = Self::default();

        let bio = doc.profile_str("bio");
        if let Some(name) = doc.profile_str("name") {
            og.title = name.to_string();
        }
        if let Some(bio) = bio {
            og.subtitle = char_range(bio, 0, SUBTITLE_CHARS);
        }

        if let Some(title) = doc.site_title() {
            og.title = title.to_string();
        }

        if let Some(bio) = bio {
            if bio.chars().count() > DESCRIPTION_MIN_BIO {
                og.description = char_range(bio, SUBTITLE_CHARS, DESCRIPTION_END);
            }
        }

        if let Some(title) = overrides.title {
            og.title = title;
        }
        if let Some(subtitle) = overrides.subtitle {
            og.subtitle = subtitle;
        }
        if let Some(description) = overrides.description {
            og.description = description;
        }
        if let Some(cta) = overrides.cta {
            og.cta = cta;
        }
        if let Some(width) = overrides.width {
            og.width = width;
        }
        if let Some(height) = overrides.height {
            og.height = height;
        }
        if let Some(output) = overrides.output {
            og.output = output;
        }

        match overrides.colors {
            Some(colors) => {
                for (key, value) in colors {
                    if !og.colors.set(&key, value) {
                        tracing::warn!("Ignoring unknown colour key '{}' in og_image_config", key);
                    }
                }
            }
            None => {
                let theme: ThemeOptions = advanced_section(doc, "theme_options")?;
                if let Some(primary) = theme.primary_color {
                    og.colors.button = primary.clone();
                    og.colors.accent1 = primary;
                }
                if let Some(secondary) = theme.secondary_color {
                    og.colors.accent2 = secondary;
                }
            }
        }

        Ok(og)
    }

    /// Check dimensions and colours before anything is drawn.
    pub fn validate(&self) -> Result<RgbPalette, OgError> {
        let in_range = |v: u32| (1..=MAX_DIMENSION).contains(&v);
        if !in_range(self.width) || !in_range(self.height) {
            return Err(OgError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        self.colors.to_rgb()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clawmark_config::parse_config;
    use pretty_assertions::assert_eq;

    fn derive(yaml: &str) -> OgConfig {
        OgConfig::derive(&parse_config(yaml).unwrap()).unwrap()
    }

    #[test]
    fn empty_document_uses_defaults() {
        assert_eq!(derive(""), OgConfig::default());
    }

    #[test]
    fn profile_fills_title_and_subtitle() {
        let og = derive("profile:\n  name: Ada\n  bio: Short bio\n");

        assert_eq!(og.title, "Ada");
        assert_eq!(og.subtitle, "Short bio");
        assert_eq!(og.description, "");
    }

    #[test]
    fn site_title_beats_profile_name() {
        let og = derive("site:\n  title: Ada's Links\nprofile:\n  name: Ada\n");

        assert_eq!(og.title, "Ada's Links");
    }

    #[test]
    fn long_bio_splits_into_subtitle_and_description() {
        let bio: String = ('a'..='z').cycle().take(90).collect();
        let og = derive(&format!("profile:\n  bio: {bio}\n"));

        assert_eq!(og.subtitle, &bio[..50]);
        assert_eq!(og.description, &bio[50..]);
        assert_eq!(og.description.chars().count(), 40);
    }

    #[test]
    fn description_stops_at_120_characters() {
        let bio = "x".repeat(200);
        let og = derive(&format!("profile:\n  bio: {bio}\n"));

        assert_eq!(og.description.len(), 70);
    }

    #[test]
    fn bio_of_sixty_characters_has_no_description() {
        let bio = "y".repeat(60);
        let og = derive(&format!("profile:\n  bio: {bio}\n"));

        assert_eq!(og.subtitle.len(), 50);
        assert_eq!(og.description, "");
    }

    #[test]
    fn bio_is_split_on_characters_not_bytes() {
        let bio = "é".repeat(70);
        let og = derive(&format!("profile:\n  bio: {bio}\n"));

        assert_eq!(og.subtitle.chars().count(), 50);
        assert_eq!(og.description.chars().count(), 20);
    }

    #[test]
    fn explicit_overrides_win() {
        let bio = "z".repeat(100);
        let og = derive(&format!(
            r#"
site:
  title: Site
profile:
  name: Ada
  bio: {bio}
advanced:
  og_image_config:
    title: Custom
    subtitle: ""
    description: Hand written
    cta: Say hi
    width: 800
    height: 400
    output: out/card.png
"#
        ));

        assert_eq!(og.title, "Custom");
        assert_eq!(og.subtitle, "");
        assert_eq!(og.description, "Hand written");
        assert_eq!(og.cta, "Say hi");
        assert_eq!((og.width, og.height), (800, 400));
        assert_eq!(og.output, PathBuf::from("out/card.png"));
    }

    #[test]
    fn theme_options_color_the_button_and_accents() {
        let og = derive(
            "advanced:\n  theme_options:\n    primary_color: \"#ff0000\"\n    secondary_color: \"#00ff00\"\n",
        );

        assert_eq!(og.colors.button, "#ff0000");
        assert_eq!(og.colors.accent1, "#ff0000");
        assert_eq!(og.colors.accent2, "#00ff00");
        assert_eq!(og.colors.bg_start, Palette::default().bg_start);
    }

    #[test]
    fn explicit_colors_suppress_theme_options() {
        let og = derive(
            r##"
advanced:
  og_image_config:
    colors:
      button: "#000000"
  theme_options:
    primary_color: "#ffffff"
    secondary_color: "#ffffff"
"##,
        );

        assert_eq!(og.colors.button, "#000000");
        assert_eq!(og.colors.accent1, Palette::default().accent1);
        assert_eq!(og.colors.accent2, Palette::default().accent2);
    }

    #[test]
    fn unknown_color_keys_are_ignored() {
        let og = derive("advanced:\n  og_image_config:\n    colors:\n      glow: \"#123456\"\n");

        assert_eq!(og.colors, Palette::default());
    }

    #[test]
    fn malformed_override_is_reported() {
        let doc = parse_config("advanced:\n  og_image_config:\n    width: wide\n").unwrap();

        let err = OgConfig::derive(&doc).unwrap_err();

        assert!(matches!(err, OgError::InvalidOverride { ref section, .. } if section == "advanced.og_image_config"));
    }

    #[test]
    fn validate_rejects_bad_colors_and_sizes() {
        let mut og = OgConfig::default();
        assert!(og.validate().is_ok());

        og.colors.button = "blue".to_string();
        let err = og.validate().unwrap_err();
        assert!(err.to_string().contains("button"));

        og.colors.button = "#0000ff".to_string();
        og.width = 0;
        assert!(matches!(
            og.validate(),
            Err(OgError::InvalidDimensions { width: 0, .. })
        ));
    }
}
