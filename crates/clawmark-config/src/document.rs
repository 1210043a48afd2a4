//! Configuration document model.

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};

/// Theme used when `site.theme` is missing or empty.
pub const DEFAULT_THEME: &str = "default";

/// A parsed `config.yaml`.
///
/// Every section is optional. Sections the core does not interpret
/// (`profile`, `links`, `social`, `advanced`) are kept as raw YAML so they reach
/// templates verbatim.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SiteDocument {
    /// Site-wide settings
    #[serde(default, deserialize_with = "null_as_default")]
    pub site: SiteSection,

    /// Profile block (name, bio, avatar, ...)
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile: Mapping,

    /// Ordered link records
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Vec<Value>,

    /// Platform name to handle or URL
    #[serde(default, deserialize_with = "null_as_default")]
    pub social: Mapping,

    /// Power-user overrides (`og_image_config`, `theme_options`, ...)
    #[serde(default, deserialize_with = "null_as_default")]
    pub advanced: Mapping,
}

/// The `site` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SiteSection {
    /// Theme directory name under `themes/`
    #[serde(
        default,
        deserialize_with = "scalar_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub theme: Option<String>,

    /// Page title
    #[serde(
        default,
        deserialize_with = "scalar_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,

    /// Any other keys (description, url, favicon, ...), passed to templates as-is
    #[serde(flatten)]
    pub extra: Mapping,
}

impl SiteDocument {
    /// Name of the selected theme, falling back to [`DEFAULT_THEME`].
    pub fn theme_name(&self) -> &str {
        self.site
            .theme
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_THEME)
    }

    /// `site.title` when set to a non-empty string.
    pub fn site_title(&self) -> Option<&str> {
        self.site.title.as_deref().filter(|t| !t.is_empty())
    }

    /// A string field of the `profile` section.
    pub fn profile_str(&self, key: &str) -> Option<&str> {
        self.profile.get(key).and_then(Value::as_str)
    }

    /// A non-null entry of the `advanced` section.
    pub fn advanced_entry(&self, key: &str) -> Option<&Value> {
        self.advanced.get(key).filter(|v| !v.is_null())
    }
}

/// Treat an explicit `null` (e.g. `profile:` with nothing under it) like an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept any YAML scalar (`title: 2024`, `theme: true`) as its string form.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(serde::de::Error::invalid_type(
            unexpected(&other),
            &"a string or other scalar",
        )),
    }
}

fn unexpected(value: &Value) -> serde::de::Unexpected<'static> {
    use serde::de::Unexpected;

    match value {
        Value::Sequence(_) => Unexpected::Seq,
        Value::Mapping(_) => Unexpected::Map,
        _ => Unexpected::Other("tagged value"),
    }
}
