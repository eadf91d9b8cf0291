//! repo-scaffold composes project templates from reusable components.
//! Components bundle template variables, file mappings and hooks; a template
//! definition picks required and optional components. The composer resolves
//! dependencies, rejects conflicting selections and writes a cookiecutter-style
//! template directory that the generator turns into a project.

/// Command-line interface module
pub mod cli;

/// Component descriptors and their validation
pub mod component;

/// Template composition: variable merge, file merge, hook scripts
pub mod composer;

/// Common constants
pub mod constants;

/// Error types and handling
pub mod error;

/// Project generation from a composed template
pub mod generator;

/// Pre and post generation hook scripts:
/// - hooks/pre_gen_project
/// - hooks/post_gen_project
pub mod hooks;

/// Template loading from local paths and git repositories
pub mod loader;

/// User input and interaction handling
pub mod prompt;

/// Component discovery
pub mod registry;

/// Template rendering functionality
pub mod renderer;

/// Dependency resolution and conflict detection
pub mod resolver;

/// Command execution
pub mod runner;

/// Template definitions
pub mod template;
