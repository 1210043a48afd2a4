//! Reading configuration documents from disk.

use std::fs;
use std::path::Path;

use serde_yaml::Value;

use crate::document::SiteDocument;

/// Errors that can occur when loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file '{0}' not found")]
    NotFound(String),

    #[error("Failed to read configuration file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing YAML configuration '{path}': {message}")]
    Parse { path: String, message: String },
}

/// Load and parse a configuration file.
pub fn load_config(path: &Path) -> Result<SiteDocument, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let doc = parse_config(&source).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    tracing::info!("Configuration loaded from {}", path.display());
    Ok(doc)
}

/// Parse configuration text.
///
/// An empty document (or one holding only comments) yields the default document.
pub fn parse_config(source: &str) -> Result<SiteDocument, serde_yaml::Error> {
    let value: Value = serde_yaml::from_str(source)?;
    if value.is_null() {
        return Ok(SiteDocument::default());
    }
    serde_yaml::from_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn loads_existing_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "site:\n  title: Hello\n").unwrap();

        let doc = load_config(&path).unwrap();

        assert_eq!(doc.site_title(), Some("Hello"));
    }

    #[test]
    fn errors_on_missing_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nope.yaml");

        let err = load_config(&path).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(err.to_string().contains("nope.yaml"));
    }

    #[test]
    fn errors_on_invalid_yaml() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "site: [unclosed\n").unwrap();

        let err = load_config(&path).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn errors_on_wrong_section_shape() {
        let result = parse_config("profile: 3\n");

        assert!(result.is_err());
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(parse_config("").unwrap(), SiteDocument::default());
        assert_eq!(
            parse_config("# nothing here\n").unwrap(),
            SiteDocument::default()
        );
    }

    #[test]
    fn rejects_non_mapping_document() {
        assert!(parse_config("- just\n- a list\n").is_err());
    }
}
