//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use minijinja::ErrorKind;

use clawmark_config::{load_config, ConfigError, SiteDocument};

use crate::assets::{copy_custom_assets, copy_theme_assets};
use crate::templates::{RenderContext, TemplateSet, PAGE_TEMPLATE};
use crate::theme::resolve_theme;

/// Configuration for building a site.
///
/// All paths are resolved against the working directory unless absolute.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Configuration document
    pub config_path: PathBuf,

    /// Directory holding one subdirectory per theme
    pub themes_dir: PathBuf,

    /// Shared templates directory
    pub templates_dir: PathBuf,

    /// Project assets merged over the theme's assets
    pub assets_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("config.yaml"),
            themes_dir: PathBuf::from("themes"),
            templates_dir: PathBuf::from("templates"),
            assets_dir: PathBuf::from("assets"),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl BuildConfig {
    /// Default layout anchored at `root` instead of the working directory.
    pub fn rooted(root: &Path) -> Self {
        let defaults = Self::default();
        Self {
            config_path: root.join(defaults.config_path),
            themes_dir: root.join(defaults.themes_dir),
            templates_dir: root.join(defaults.templates_dir),
            assets_dir: root.join(defaults.assets_dir),
            output_dir: root.join(defaults.output_dir),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Theme used
    pub theme: String,

    /// Path of the rendered page
    pub index_path: PathBuf,

    /// Number of theme asset files copied
    pub theme_assets: usize,

    /// Number of custom asset files copied, `None` without a project assets directory
    pub custom_assets: Option<usize>,

    /// Total build time in milliseconds
    pub duration_ms: u64,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Theme '{name}' not found in themes directory. Available themes: {}", format_names(.available))]
    ThemeNotFound {
        name: String,
        available: Vec<String>,
    },

    #[error("Template '{template}' not found for theme '{theme}'")]
    TemplateNotFound { template: String, theme: String },

    #[error("Failed to render template: {0}")]
    Template(String),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy assets at {path}: {source}")]
    AssetCopy {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

fn format_names(names: &[String]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}

/// Builds `index.html` and the asset tree for one configuration.
pub struct SiteBuilder {
    config: BuildConfig,
}

impl SiteBuilder {
    /// Create a new site builder.
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Load the configuration file and build the site.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let doc = load_config(&self.config.config_path)?;
        self.build_document(&doc)
    }

    /// Build the site from an already loaded document.
    ///
    /// Nothing is written until the page has rendered successfully.
    pub fn build_document(&self, doc: &SiteDocument) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let theme = resolve_theme(doc.theme_name(), &self.config.themes_dir)?;
        let metadata = theme.load_metadata();
        let templates = TemplateSet::for_theme(&theme, &self.config.templates_dir);

        let page = templates.page(PAGE_TEMPLATE).map_err(|e| match e.kind() {
            ErrorKind::TemplateNotFound => BuildError::TemplateNotFound {
                template: PAGE_TEMPLATE.to_string(),
                theme: theme.name.clone(),
            },
            _ => BuildError::Template(e.to_string()),
        })?;

        let context = RenderContext::new(doc, metadata, timestamp());
        let html = page
            .render(&context)
            .map_err(|e| BuildError::Template(e.to_string()))?;

        let index_path = self.write_page(&html)?;

        let output_assets = self.config.output_dir.join("assets");
        let theme_assets = match theme.assets_dir() {
            Some(dir) => copy_theme_assets(&dir, &output_assets)?,
            None => 0,
        };
        let custom_assets = copy_custom_assets(&self.config.assets_dir, &output_assets)?;

        Ok(BuildResult {
            theme: theme.name,
            index_path,
            theme_assets,
            custom_assets,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Write the rendered page, creating the output directory if needed.
    fn write_page(&self, html: &str) -> Result<PathBuf, BuildError> {
        let output_dir = &self.config.output_dir;
        fs::create_dir_all(output_dir).map_err(|source| BuildError::Write {
            path: output_dir.display().to_string(),
            source,
        })?;

        let index_path = output_dir.join(PAGE_TEMPLATE);
        fs::write(&index_path, html).map_err(|source| BuildError::Write {
            path: index_path.display().to_string(),
            source,
        })?;

        Ok(index_path)
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
