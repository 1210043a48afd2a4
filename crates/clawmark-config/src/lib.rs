//! Configuration document for ClawMark sites.
//!
//! This crate provides the typed view of a `config.yaml` file shared by the
//! site builder and the preview image generator, and the loader that reads it.

pub mod document;
pub mod loader;

pub use document::{SiteDocument, SiteSection, DEFAULT_THEME};
pub use loader::{load_config, parse_config, ConfigError};
