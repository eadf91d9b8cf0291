//! Error handling for repo-scaffold.
//! Defines the error type and result alias used throughout the crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur while loading components, composing templates
/// and generating projects.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// A structured-data file (component descriptor, template definition,
    /// generator config) could not be parsed.
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// A descriptor parsed but is missing required fields or holds invalid values.
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// A requested or depended-upon component is not in the registry.
    #[error("Component '{name}' not found.")]
    ComponentNotFoundError { name: String },

    /// Two or more selected components declare each other as conflicting.
    #[error("Conflicting components selected: {}.", conflicts.join("; "))]
    ConflictError { conflicts: Vec<String> },

    /// Copying or writing a specific file failed.
    #[error("File operation failed for '{}': {source}.", path.display())]
    FileOperationError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Represents errors that occur during template processing
    #[error("Template error: {0}.")]
    TemplateError(String),

    /// Represents errors that occur during hook script execution
    #[error("Hook execution error: {0}.")]
    HookError(String),

    #[error("Cannot clone template repository: {0}.")]
    Git2Error(#[from] git2::Error),

    #[error("Cannot render template: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("Output directory '{output_dir}' already exists. Use --force to overwrite it.")]
    OutputDirectoryExistsError { output_dir: String },

    #[error("Template directory '{template_dir}' does not exist.")]
    TemplateDoesNotExistsError { template_dir: String },
}

impl Error {
    /// Wraps an IO error together with the path it happened on.
    pub fn file_operation<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Error::FileOperationError { path: path.into(), source }
    }
}

/// Convenience type alias for results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
