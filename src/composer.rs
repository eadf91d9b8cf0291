//! Template composition.
//!
//! Turns a template definition plus a user selection into a self-contained,
//! cookiecutter-style template directory:
//!
//! ```text
//! <working dir>/
//!   cookiecutter.json                 merged variables
//!   {{cookiecutter.package_name}}/    merged component files
//!   hooks/pre_gen_project
//!   hooks/post_gen_project
//!   hooks/actions/*                   action scripts shipped by components
//! ```

use crate::component::Component;
use crate::constants::{GENERATOR_CONFIG_FILE, PROJECT_ROOT_DIR};
use crate::error::{Error, Result};
use crate::hooks::write_hook_scripts;
use crate::registry::ComponentRegistry;
use crate::resolver::DependencyResolver;
use crate::template::TemplateDefinition;
use indexmap::IndexMap;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Variables handed to the generator, in insertion order.
pub type GeneratorConfig = IndexMap<String, serde_json::Value>;

/// Everything decided before touching the filesystem.
#[derive(Debug)]
pub struct Composition<'a> {
    /// Resolved components in resolution order
    pub components: Vec<&'a Component>,
    /// Base variables overlaid with every component's variables
    pub config: GeneratorConfig,
}

impl Composition<'_> {
    pub fn component_names(&self) -> Vec<&str> {
        self.components.iter().map(|c| c.name.as_str()).collect()
    }

    /// Writes the generator config, merged files and hook scripts below `root`.
    ///
    /// # Errors
    /// * `Error::FileOperationError` for a missing source or a failed write
    pub fn write_to<P: AsRef<Path>>(&self, root: P) -> Result<()> {
        let root = root.as_ref();

        let config_path = root.join(GENERATOR_CONFIG_FILE);
        let config = serde_json::to_string_pretty(&self.config)
            .map_err(|e| Error::ConfigError(format!("cannot serialize generator config: {e}")))?;
        fs::write(&config_path, config).map_err(|e| Error::file_operation(&config_path, e))?;

        merge_component_files(&self.components, root.join(PROJECT_ROOT_DIR))?;
        write_hook_scripts(&self.components, root)
    }
}

/// Starts from `base` and overlays each component's variables in order.
/// Flat merge, later components win.
pub fn build_generator_config(base: &GeneratorConfig, components: &[&Component]) -> GeneratorConfig {
    let mut config = base.clone();
    for component in components {
        for (key, value) in &component.cookiecutter_vars {
            config.insert(key.clone(), value.clone());
        }
    }
    config
}

/// Copies every file mapping of `components`, in order, into `target_dir`.
/// A destination written by an earlier component is overwritten by a later one.
///
/// # Errors
/// * `Error::FileOperationError` naming the missing source, or the destination
///   when the source exists but cannot be written there
pub fn merge_component_files<P: AsRef<Path>>(components: &[&Component], target_dir: P) -> Result<()> {
    let target_dir = target_dir.as_ref();
    fs::create_dir_all(target_dir).map_err(|e| Error::file_operation(target_dir, e))?;

    for component in components {
        for mapping in &component.files {
            let source = component.source_path(mapping);
            let dest = target_dir.join(&mapping.dest);

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent).map_err(|e| Error::file_operation(parent, e))?;
            }
            if dest.exists() {
                debug!("Component '{}' overwrites '{}'", component.name, mapping.dest);
            }
            fs::copy(&source, &dest).map_err(|e| {
                let culprit = if source.is_file() { &dest } else { &source };
                Error::file_operation(culprit, e)
            })?;
        }
    }

    Ok(())
}

/// Composes templates from the components of one registry.
pub struct TemplateComposer<'a> {
    registry: &'a ComponentRegistry,
    temp_root: Option<PathBuf>,
}

impl<'a> TemplateComposer<'a> {
    pub fn new(registry: &'a ComponentRegistry) -> Self {
        Self { registry, temp_root: None }
    }

    /// Allocates working directories below `temp_root` instead of the OS temp directory.
    pub fn with_temp_root<P: Into<PathBuf>>(registry: &'a ComponentRegistry, temp_root: P) -> Self {
        Self { registry, temp_root: Some(temp_root.into()) }
    }

    /// Resolves the selection and merges variables without any filesystem writes.
    ///
    /// # Errors
    /// * `Error::ComponentNotFoundError` if a requested component or dependency is unknown
    /// * `Error::ConflictError` if resolved components conflict with each other
    pub fn plan<S: AsRef<str>>(
        &self,
        definition: &TemplateDefinition,
        user_selected: &[S],
    ) -> Result<Composition<'a>> {
        let requested = definition.requested_components(user_selected);
        let resolver = DependencyResolver::new(self.registry);

        let resolved = resolver.resolve(&requested)?;
        let names: Vec<&str> = resolved.iter().map(String::as_str).collect();
        let conflicts = resolver.validate(&names);
        if !conflicts.is_empty() {
            return Err(Error::ConflictError { conflicts });
        }

        let registry = self.registry;
        let components = resolved
            .iter()
            .map(|name| {
                registry
                    .get(name)
                    .ok_or_else(|| Error::ComponentNotFoundError { name: name.clone() })
            })
            .collect::<Result<Vec<_>>>()?;
        let config = build_generator_config(&definition.base_cookiecutter_config, &components);

        Ok(Composition { components, config })
    }

    /// Composes `definition` with `user_selected` into a fresh temporary directory.
    ///
    /// The directory is only allocated once resolution and conflict checks pass,
    /// and it is removed again if writing fails. On success the caller owns it.
    pub fn compose<S: AsRef<str>>(
        &self,
        definition: &TemplateDefinition,
        user_selected: &[S],
    ) -> Result<PathBuf> {
        let composition = self.plan(definition, user_selected)?;

        let mut builder = tempfile::Builder::new();
        builder.prefix("repo-scaffold-");
        let working_dir = match &self.temp_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(Error::IoError)?;

        composition.write_to(working_dir.path())?;

        let path = working_dir.keep();
        info!(
            "Composed template '{}' from [{}] in {}",
            definition.name,
            composition.component_names().join(", "),
            path.display()
        );
        Ok(path)
    }
}
