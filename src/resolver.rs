//! Dependency resolution and conflict detection over a [`ComponentRegistry`].

use crate::error::{Error, Result};
use crate::registry::ComponentRegistry;
use indexmap::IndexSet;
use log::debug;
use std::collections::HashSet;

/// Computes dependency closures for selections of component names.
pub struct DependencyResolver<'a> {
    registry: &'a ComponentRegistry,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(registry: &'a ComponentRegistry) -> Self {
        Self { registry }
    }

    /// Returns the transitive closure of `selected` under `dependencies`.
    ///
    /// The result is in depth-first post-order: every component follows the
    /// dependencies it declares, and independent selections keep their input
    /// order. Dependency cycles are not an error; descent stops at the first
    /// revisit and every member of the cycle is still included.
    ///
    /// # Errors
    /// * `Error::ComponentNotFoundError` for the first name missing from the registry
    pub fn resolve<S: AsRef<str>>(&self, selected: &[S]) -> Result<IndexSet<String>> {
        let mut resolved = IndexSet::new();
        let mut processing = HashSet::new();

        for name in selected {
            self.visit(name.as_ref(), &mut resolved, &mut processing)?;
        }

        debug!("Resolved components: {resolved:?}");
        Ok(resolved)
    }

    fn visit(
        &self,
        name: &str,
        resolved: &mut IndexSet<String>,
        processing: &mut HashSet<String>,
    ) -> Result<()> {
        if resolved.contains(name) {
            return Ok(());
        }
        if processing.contains(name) {
            debug!("Dependency cycle through '{name}', not descending further");
            return Ok(());
        }

        let component = self
            .registry
            .get(name)
            .ok_or_else(|| Error::ComponentNotFoundError { name: name.to_string() })?;

        processing.insert(name.to_string());
        for dependency in &component.dependencies {
            self.visit(dependency, resolved, processing)?;
        }
        processing.remove(name);
        resolved.insert(name.to_string());

        Ok(())
    }

    /// Reports every selected component that lists another selected component
    /// in its `conflicts`. Names missing from the registry are ignored.
    pub fn validate<S: AsRef<str>>(&self, selected: &[S]) -> Vec<String> {
        let selected: IndexSet<&str> = selected.iter().map(AsRef::as_ref).collect();

        selected
            .iter()
            .filter_map(|name| self.registry.get(name))
            .flat_map(|component| {
                component
                    .conflicts
                    .iter()
                    .filter(|conflict| selected.contains(conflict.as_str()))
                    .map(move |conflict| format!("{} conflicts with {}", component.name, conflict))
            })
            .collect()
    }
}
