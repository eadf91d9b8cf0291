//! Template definitions: named presets of required and optional components
//! plus the base variables every generated project starts from.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::Path;

/// Presentation metadata for an optional component.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OptionalComponent {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub help: String,
    #[serde(default)]
    pub default: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TemplateDefinition {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required_components: Vec<String>,
    #[serde(default)]
    pub optional_components: IndexMap<String, OptionalComponent>,
    #[serde(default)]
    pub base_cookiecutter_config: IndexMap<String, serde_json::Value>,
}

impl TemplateDefinition {
    /// Parses a template definition from YAML (JSON is accepted too).
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("invalid template definition: {e}")))
    }

    /// Reads and parses a template definition file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading template definition from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("cannot read '{}': {e}", path.display()))
        })?;
        Self::parse(&content)
    }

    /// Optional components that are selected unless the user says otherwise.
    pub fn default_selection(&self) -> Vec<String> {
        self.optional_components
            .iter()
            .filter(|(_, option)| option.default)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// `required_components` followed by `user_selected`, first occurrence wins.
    pub fn requested_components<S: AsRef<str>>(&self, user_selected: &[S]) -> Vec<String> {
        let mut requested: Vec<String> = Vec::new();
        let names = self
            .required_components
            .iter()
            .map(String::as_str)
            .chain(user_selected.iter().map(AsRef::as_ref));
        for name in names {
            if !requested.iter().any(|r| r == name) {
                requested.push(name.to_string());
            }
        }
        requested
    }
}
