//! Template engine for rendering the link page.

use std::path::{Path, PathBuf};

use minijinja::{path_loader, AutoEscape, Environment, Template};
use serde::Serialize;
use serde_yaml::{Mapping, Value};

use clawmark_config::SiteDocument;

use crate::theme::Theme;

/// Name of the page template every theme must provide (directly or via the shared directory).
pub const PAGE_TEMPLATE: &str = "index.html";

/// Context bound to the page template.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    pub site: clawmark_config::SiteSection,
    pub profile: Mapping,
    pub links: Vec<Value>,
    pub social: Mapping,
    pub advanced: Mapping,
    /// Contents of the theme's `theme.yaml`
    pub theme: Mapping,
    /// Build timestamp, informational only
    pub generated_at: String,
}

impl RenderContext {
    /// Assemble the context from a document and theme metadata.
    pub fn new(doc: &SiteDocument, theme: Mapping, generated_at: String) -> Self {
        Self {
            site: doc.site.clone(),
            profile: doc.profile.clone(),
            links: doc.links.clone(),
            social: doc.social.clone(),
            advanced: doc.advanced.clone(),
            theme,
            generated_at,
        }
    }
}

/// Template environment over an ordered list of directories.
pub struct TemplateSet {
    env: Environment<'static>,
    search_path: Vec<PathBuf>,
}

impl TemplateSet {
    /// Create a template set that looks up templates in `search_path`, first match wins.
    ///
    /// Output is HTML-escaped for every template regardless of its extension.
    pub fn new(search_path: Vec<PathBuf>) -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);

        let loaders: Vec<_> = search_path.iter().cloned().map(path_loader).collect();
        env.set_loader(move |name| {
            for load in &loaders {
                if let Some(source) = load(name)? {
                    return Ok(Some(source));
                }
            }
            Ok(None)
        });

        Self { env, search_path }
    }

    /// Theme templates first, then the shared directory.
    pub fn for_theme(theme: &Theme, shared_dir: &Path) -> Self {
        if !shared_dir.is_dir() {
            tracing::warn!(
                "Shared templates directory not found: {}",
                shared_dir.display()
            );
        }

        let mut search_path = Vec::with_capacity(2);
        if let Some(dir) = theme.templates_dir() {
            tracing::debug!("Using theme templates from {}", dir.display());
            search_path.push(dir);
        }
        search_path.push(shared_dir.to_path_buf());

        Self::new(search_path)
    }

    /// Directories searched, in order.
    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    /// Look up a template by name.
    pub fn page(&self, name: &str) -> Result<Template<'_, '_>, minijinja::Error> {
        self.env.get_template(name)
    }

    /// Render a template with the given context.
    pub fn render_page(
        &self,
        name: &str,
        context: &RenderContext,
    ) -> Result<String, minijinja::Error> {
        self.page(name)?.render(context)
    }
}
