//! Component discovery.
//! Loads every component found in the immediate subdirectories of a
//! components directory. A broken descriptor only costs that one component.

use crate::component::Component;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Read-only collection of loaded components keyed by name.
#[derive(Debug, Default, Clone)]
pub struct ComponentRegistry {
    components: IndexMap<String, Component>,
}

impl ComponentRegistry {
    /// Loads all components below `components_dir`.
    ///
    /// Subdirectories are visited in name order. Subdirectories without a
    /// descriptor are skipped silently; descriptors that fail to parse or
    /// validate are logged and skipped.
    ///
    /// # Returns
    /// * An empty registry if `components_dir` does not exist
    ///
    /// # Errors
    /// * `Error::IoError` if an existing directory cannot be listed
    pub fn load<P: AsRef<Path>>(components_dir: P) -> Result<Self> {
        let components_dir = components_dir.as_ref();
        if !components_dir.is_dir() {
            debug!("Components directory {} does not exist", components_dir.display());
            return Ok(Self::default());
        }

        let mut dirs: Vec<PathBuf> = fs::read_dir(components_dir)
            .map_err(Error::IoError)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_dir())
            .collect();
        dirs.sort();

        let mut registry = Self::default();
        for dir in dirs {
            match Component::from_dir(&dir) {
                Ok(Some(component)) => registry.insert(component),
                Ok(None) => debug!("Skipping {}: no component descriptor", dir.display()),
                Err(e) => warn!("Failed to load component from {}: {}", dir.display(), e),
            }
        }

        debug!("Loaded {} components from {}", registry.len(), components_dir.display());
        Ok(registry)
    }

    /// Builds a registry from already constructed components.
    pub fn from_components<I: IntoIterator<Item = Component>>(components: I) -> Self {
        let mut registry = Self::default();
        for component in components {
            registry.insert(component);
        }
        registry
    }

    fn insert(&mut self, component: Component) {
        if let Some(existing) = self.components.get(&component.name) {
            warn!(
                "Component '{}' from {} is already defined by {}, skipping",
                component.name,
                component.root.display(),
                existing.root.display()
            );
            return;
        }
        self.components.insert(component.name.clone(), component);
    }

    pub fn get(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// All components, in load order.
    pub fn list(&self) -> Vec<&Component> {
        self.components.values().collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.components.keys().map(String::as_str).collect()
    }

    /// Components whose category equals `category`.
    pub fn by_category(&self, category: &str) -> Vec<&Component> {
        self.components.values().filter(|c| c.category == category).collect()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
