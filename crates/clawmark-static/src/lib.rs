//! Static site builder for ClawMark.
//!
//! Renders a single `index.html` from a configuration document and a theme, then
//! merges theme and project assets into the output tree.

pub mod assets;
pub mod builder;
pub mod templates;
pub mod theme;

pub use builder::{BuildConfig, BuildError, BuildResult, SiteBuilder};
pub use templates::{RenderContext, TemplateSet};
pub use theme::{resolve_theme, Theme};
