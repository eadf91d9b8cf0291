//! Component descriptors.
//! A component is a directory holding a `component.yaml` descriptor, a `files/`
//! directory with the sources its file mappings point at, and optionally a
//! `hooks/` directory with action scripts.

use crate::constants::{COMPONENT_FILES, COMPONENT_FILES_DIR, DEFAULT_CATEGORY, HOOKS_DIR};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::{Component as PathComponent, Path, PathBuf};

/// A single `{src, dest}` file mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileMapping {
    /// Path relative to the component's `files/` directory
    pub src: PathBuf,
    /// Path relative to the generated project root; may contain template placeholders
    pub dest: String,
}

/// Raw descriptor as it appears on disk. Required fields are optional here so
/// that a missing one is reported as a validation error rather than a parse error.
#[derive(Debug, Default, Deserialize)]
pub struct ComponentDescriptor {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub conflicts: Vec<String>,
    #[serde(default)]
    pub cookiecutter_vars: IndexMap<String, serde_json::Value>,
    #[serde(default)]
    pub files: Vec<FileMapping>,
    #[serde(default)]
    pub hooks: IndexMap<String, Vec<String>>,
}

/// A validated component, immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub category: String,
    pub dependencies: Vec<String>,
    pub conflicts: Vec<String>,
    pub cookiecutter_vars: IndexMap<String, serde_json::Value>,
    pub files: Vec<FileMapping>,
    pub hooks: IndexMap<String, Vec<String>>,
    /// Directory the descriptor was loaded from
    pub root: PathBuf,
}

impl ComponentDescriptor {
    /// Parses descriptor content.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the content is not a valid YAML mapping
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("invalid component descriptor: {e}")))
    }

    /// Checks required fields and field values, producing a [`Component`] rooted at `root`.
    ///
    /// # Errors
    /// * `Error::ValidationError` naming the first missing or invalid field
    pub fn validate<P: AsRef<Path>>(self, root: P) -> Result<Component> {
        let root = root.as_ref();
        let name = required(self.name, "name", root)?;
        let display_name = required(self.display_name, "display_name", root)?;
        let description = required(self.description, "description", root)?;

        for mapping in &self.files {
            if !is_relative_inside(&mapping.src) {
                return Err(Error::ValidationError(format!(
                    "component '{name}': source '{}' must be a relative path inside the files directory",
                    mapping.src.display()
                )));
            }
            if !is_valid_dest(&mapping.dest) {
                return Err(Error::ValidationError(format!(
                    "component '{name}': destination '{}' must be a relative path inside the project",
                    mapping.dest
                )));
            }
        }

        for (phase, identifiers) in &self.hooks {
            if let Some(bad) = identifiers.iter().find(|id| !is_hook_identifier(id)) {
                return Err(Error::ValidationError(format!(
                    "component '{name}': invalid {phase} hook identifier '{bad}'"
                )));
            }
        }

        Ok(Component {
            name,
            display_name,
            description,
            category: self.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            dependencies: self.dependencies,
            conflicts: self.conflicts,
            cookiecutter_vars: self.cookiecutter_vars,
            files: self.files,
            hooks: self.hooks,
            root: root.to_path_buf(),
        })
    }
}

fn required(value: Option<String>, field: &str, root: &Path) -> Result<String> {
    value.ok_or_else(|| {
        Error::ValidationError(format!(
            "missing required field '{field}' in component at '{}'",
            root.display()
        ))
    })
}

fn is_relative_inside(path: &Path) -> bool {
    !path.as_os_str().is_empty()
        && path.components().all(|c| matches!(c, PathComponent::Normal(_) | PathComponent::CurDir))
}

/// Destinations are kept as strings since they may hold placeholders like
/// `{{cookiecutter.package_name}}`; only the separators matter here.
fn is_valid_dest(dest: &str) -> bool {
    !dest.is_empty()
        && !dest.starts_with('/')
        && !dest.contains('\\')
        && dest.split('/').all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

/// Hook identifiers are written verbatim into shell scripts.
pub fn is_hook_identifier(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('-')
        && !id.chars().all(|c| c == '.')
        && id.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

impl Component {
    /// Loads a component from its directory.
    ///
    /// # Returns
    /// * `Ok(None)` if the directory holds no descriptor file
    ///
    /// # Errors
    /// * `Error::ConfigError` for unreadable or malformed descriptors
    /// * `Error::ValidationError` for missing required fields
    pub fn from_dir<P: AsRef<Path>>(component_dir: P) -> Result<Option<Self>> {
        let component_dir = component_dir.as_ref();
        let Some(descriptor_path) = COMPONENT_FILES
            .iter()
            .map(|file| component_dir.join(file))
            .find(|path| path.is_file())
        else {
            return Ok(None);
        };

        debug!("Loading component descriptor {}", descriptor_path.display());
        let content = std::fs::read_to_string(&descriptor_path).map_err(|e| {
            Error::ConfigError(format!("cannot read '{}': {e}", descriptor_path.display()))
        })?;

        ComponentDescriptor::parse(&content)?.validate(component_dir).map(Some)
    }

    /// Absolute location of a mapping's source file.
    pub fn source_path(&self, mapping: &FileMapping) -> PathBuf {
        self.root.join(COMPONENT_FILES_DIR).join(&mapping.src)
    }

    /// Location of an action script the component may ship for a hook identifier.
    pub fn hook_action_path(&self, identifier: &str) -> PathBuf {
        self.root.join(HOOKS_DIR).join(identifier)
    }
}
