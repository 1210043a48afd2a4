//! Theme lookup and metadata.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::builder::BuildError;

/// A resolved theme directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Theme name (directory name under `themes/`)
    pub name: String,

    /// Theme root directory
    pub dir: PathBuf,
}

impl Theme {
    /// The theme's own `templates/` directory, if it has one.
    pub fn templates_dir(&self) -> Option<PathBuf> {
        existing_dir(self.dir.join("templates"))
    }

    /// The theme's `assets/` directory, if it has one.
    pub fn assets_dir(&self) -> Option<PathBuf> {
        existing_dir(self.dir.join("assets"))
    }

    /// Load `theme.yaml`.
    ///
    /// Returns an empty mapping when the file is absent, empty, or unreadable.
    pub fn load_metadata(&self) -> Mapping {
        let path = self.dir.join("theme.yaml");
        if !path.exists() {
            return Mapping::new();
        }

        let parsed = fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|source| {
                serde_yaml::from_str::<Value>(&source).map_err(|e| e.to_string())
            });

        match parsed {
            Ok(Value::Mapping(metadata)) => metadata,
            Ok(Value::Null) => Mapping::new(),
            Ok(_) => {
                tracing::warn!("Ignoring {}: expected a mapping", path.display());
                Mapping::new()
            }
            Err(e) => {
                tracing::warn!("Ignoring {}: {}", path.display(), e);
                Mapping::new()
            }
        }
    }
}

fn existing_dir(path: PathBuf) -> Option<PathBuf> {
    path.is_dir().then_some(path)
}

/// Find `themes_dir/<name>`.
pub fn resolve_theme(name: &str, themes_dir: &Path) -> Result<Theme, BuildError> {
    let dir = themes_dir.join(name);
    if !dir.is_dir() {
        return Err(BuildError::ThemeNotFound {
            name: name.to_string(),
            available: available_themes(themes_dir),
        });
    }

    Ok(Theme {
        name: name.to_string(),
        dir,
    })
}

/// Names of all directories under `themes_dir`, sorted.
pub fn available_themes(themes_dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(themes_dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn resolves_existing_theme() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("default")).unwrap();

        let theme = resolve_theme("default", temp.path()).unwrap();

        assert_eq!(theme.name, "default");
        assert_eq!(theme.dir, temp.path().join("default"));
        assert_eq!(theme.templates_dir(), None);
        assert_eq!(theme.assets_dir(), None);
    }

    #[test]
    fn missing_theme_lists_available() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("neon")).unwrap();
        fs::create_dir_all(temp.path().join("minimal")).unwrap();
        fs::write(temp.path().join("README.md"), "not a theme").unwrap();

        let err = resolve_theme("retro", temp.path()).unwrap_err();

        match &err {
            BuildError::ThemeNotFound { name, available } => {
                assert_eq!(name, "retro");
                assert_eq!(available, &vec!["minimal".to_string(), "neon".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
        let message = err.to_string();
        assert!(message.contains("minimal"));
        assert!(message.contains("neon"));
    }

    #[test]
    fn missing_themes_dir_has_no_available_themes() {
        let temp = tempdir().unwrap();

        assert!(available_themes(&temp.path().join("themes")).is_empty());
    }

    #[test]
    fn loads_metadata_mapping() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("neon");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("theme.yaml"), "name: Neon\nauthor: Ada\n").unwrap();

        let theme = resolve_theme("neon", temp.path()).unwrap();
        let metadata = theme.load_metadata();

        assert_eq!(metadata.get("name").and_then(Value::as_str), Some("Neon"));
    }

    #[test]
    fn metadata_is_empty_when_absent_or_broken() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("neon");
        fs::create_dir_all(&dir).unwrap();
        let theme = resolve_theme("neon", temp.path()).unwrap();

        assert!(theme.load_metadata().is_empty());

        fs::write(dir.join("theme.yaml"), "name: [broken\n").unwrap();
        assert!(theme.load_metadata().is_empty());

        fs::write(dir.join("theme.yaml"), "").unwrap();
        assert!(theme.load_metadata().is_empty());
    }
}
