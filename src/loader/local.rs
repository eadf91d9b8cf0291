use crate::error::{Error, Result};
use crate::loader::interface::{LoadedTemplate, TemplateLoader};
use std::path::Path;

/// Loader for templates from the local filesystem.
pub struct LocalLoader<P: AsRef<Path>> {
    path: P,
}

impl<P: AsRef<Path>> LocalLoader<P> {
    pub fn new(path: P) -> Self {
        Self { path }
    }
}

impl<P: AsRef<Path>> TemplateLoader for LocalLoader<P> {
    /// # Errors
    /// * `Error::TemplateDoesNotExistsError` if the path is not a directory
    fn load(&self) -> Result<LoadedTemplate> {
        let path = self.path.as_ref();
        if !path.is_dir() {
            return Err(Error::TemplateDoesNotExistsError {
                template_dir: path.display().to_string(),
            });
        }

        Ok(LoadedTemplate::local(path))
    }
}
