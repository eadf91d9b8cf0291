use crate::error::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A template available on the local filesystem.
///
/// Remote templates are cloned into a temporary directory that lives as long
/// as this value.
#[derive(Debug)]
pub struct LoadedTemplate {
    path: PathBuf,
    _checkout: Option<TempDir>,
}

impl LoadedTemplate {
    pub fn local<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into(), _checkout: None }
    }

    pub fn checkout(path: PathBuf, checkout: TempDir) -> Self {
        Self { path, _checkout: Some(checkout) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Trait for loading templates from different sources.
pub trait TemplateLoader {
    /// Makes the template available locally.
    fn load(&self) -> Result<LoadedTemplate>;
}
