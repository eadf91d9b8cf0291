//! Project generation from a composed (cookiecutter-style) template directory.
//!
//! This is the consumer side of the composer: it reads the generator config,
//! collects answers, renders the project-root tree into the output directory
//! and runs the pre/post generation hooks.

use crate::composer::GeneratorConfig;
use crate::constants::{CONTEXT_NAMESPACE, GENERATOR_CONFIG_FILE};
use crate::error::{Error, Result};
use crate::hooks::{get_hook_files, has_hook_commands, run_hook};
use crate::prompt::Prompter;
use crate::renderer::TemplateRenderer;
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::{debug, info, warn};
use std::fs;
use std::path::{Component as PathComponent, Path, PathBuf};
use walkdir::WalkDir;

/// Config key listing glob patterns of files copied without rendering
pub const COPY_WITHOUT_RENDER_KEY: &str = "_copy_without_render";

/// Turns a template directory into a project on disk.
pub trait Generator {
    /// Generates a project from `template_dir` below `output_dir`.
    ///
    /// # Returns
    /// * The directory of the generated project
    fn generate(&self, template_dir: &Path, output_dir: &Path, interactive: bool) -> Result<PathBuf>;
}

/// Generator that renders paths and file contents with a [`TemplateRenderer`].
pub struct MiniJinjaGenerator<'a> {
    renderer: &'a dyn TemplateRenderer,
    prompter: &'a dyn Prompter,
    force: bool,
    skip_hooks_check: bool,
}

impl<'a> MiniJinjaGenerator<'a> {
    pub fn new(
        renderer: &'a dyn TemplateRenderer,
        prompter: &'a dyn Prompter,
        force: bool,
        skip_hooks_check: bool,
    ) -> Self {
        Self { renderer, prompter, force, skip_hooks_check }
    }

    fn should_run_hooks(&self, template_dir: &Path, interactive: bool) -> Result<bool> {
        if !has_hook_commands(template_dir) {
            return Ok(false);
        }
        if self.skip_hooks_check {
            return Ok(true);
        }
        if !interactive {
            warn!("Skipping template hooks; pass --skip-hooks-check to run them without input");
            return Ok(false);
        }
        self.prompter.confirm(
            false,
            "WARNING: This template contains hooks that will execute commands on your system. Do you want to run these hooks?".to_string(),
        )
    }

    fn write_entry(
        &self,
        source: &Path,
        target: &Path,
        context: &serde_json::Value,
        render: bool,
    ) -> Result<()> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::file_operation(parent, e))?;
        }
        if !render {
            fs::copy(source, target).map_err(|e| Error::file_operation(source, e))?;
            return Ok(());
        }

        let bytes = fs::read(source).map_err(|e| Error::file_operation(source, e))?;
        match String::from_utf8(bytes) {
            Ok(content) => {
                let rendered = self.renderer.render(&content, context).map_err(|e| {
                    Error::TemplateError(format!("cannot render '{}': {e}", source.display()))
                })?;
                fs::write(target, rendered).map_err(|e| Error::file_operation(target, e))
            }
            Err(_) => {
                debug!("Copying binary file {}", source.display());
                fs::copy(source, target).map(|_| ()).map_err(|e| Error::file_operation(source, e))
            }
        }
    }
}

impl Generator for MiniJinjaGenerator<'_> {
    fn generate(&self, template_dir: &Path, output_dir: &Path, interactive: bool) -> Result<PathBuf> {
        if !template_dir.is_dir() {
            return Err(Error::TemplateDoesNotExistsError {
                template_dir: template_dir.display().to_string(),
            });
        }

        let config = load_generator_config(template_dir)?;
        let copy_without_render = copy_without_render_patterns(&config)?;
        let context = build_context(self.renderer, self.prompter, &config, interactive)?;

        let project_root = find_project_root(template_dir)?;
        let root_name = relative_str(&project_root, template_dir)?;
        let project_name = self.renderer.render(&root_name, &context)?;
        if !is_rendered_path_valid(&project_name) || project_name.contains('/') {
            return Err(Error::TemplateError(format!(
                "project directory name '{project_name}' rendered from '{root_name}' is invalid"
            )));
        }

        let project_dir = output_dir.join(&project_name);
        if project_dir.exists() && !self.force {
            return Err(Error::OutputDirectoryExistsError {
                output_dir: project_dir.display().to_string(),
            });
        }
        fs::create_dir_all(&project_dir).map_err(|e| Error::file_operation(&project_dir, e))?;

        let execute_hooks = self.should_run_hooks(template_dir, interactive)?;
        let (pre_hook, post_hook) = get_hook_files(template_dir);
        if execute_hooks {
            run_hook(&pre_hook, &project_dir, &context)?;
        }

        for entry in WalkDir::new(&project_root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::TemplateError(e.to_string()))?;
            let relative = relative_str(entry.path(), &project_root)?;
            let rendered = self.renderer.render(&relative, &context)?;

            if rendered.trim().is_empty() {
                debug!("Skipping '{relative}': rendered path is empty");
                continue;
            }
            if !is_rendered_path_valid(&rendered) {
                warn!("Skipping '{relative}': rendered path '{rendered}' is invalid");
                continue;
            }

            let target = project_dir.join(&rendered);
            if entry.file_type().is_dir() {
                fs::create_dir_all(&target).map_err(|e| Error::file_operation(&target, e))?;
            } else {
                let render = !copy_without_render.is_match(&relative);
                self.write_entry(entry.path(), &target, &context, render)?;
                debug!("{}: '{}'", if render { "Rendered" } else { "Copied" }, target.display());
            }
        }

        if execute_hooks {
            run_hook(&post_hook, &project_dir, &context)?;
        }

        info!("Generated project in {}", project_dir.display());
        Ok(project_dir)
    }
}

/// Reads the generator config at the root of `template_dir`.
///
/// # Errors
/// * `Error::ConfigError` if the file is missing or is not a JSON object
pub fn load_generator_config<P: AsRef<Path>>(template_dir: P) -> Result<GeneratorConfig> {
    let config_path = template_dir.as_ref().join(GENERATOR_CONFIG_FILE);
    let content = fs::read_to_string(&config_path).map_err(|e| {
        Error::ConfigError(format!("cannot read '{}': {e}", config_path.display()))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::ConfigError(format!("invalid generator config '{}': {e}", config_path.display()))
    })
}

fn copy_without_render_patterns(config: &GeneratorConfig) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    if let Some(patterns) = config.get(COPY_WITHOUT_RENDER_KEY).and_then(|v| v.as_array()) {
        for pattern in patterns.iter().filter_map(|p| p.as_str()) {
            builder.add(Glob::new(pattern).map_err(|e| {
                Error::ConfigError(format!("invalid {COPY_WITHOUT_RENDER_KEY} pattern: {e}"))
            })?);
        }
    }
    builder
        .build()
        .map_err(|e| Error::ConfigError(format!("invalid {COPY_WITHOUT_RENDER_KEY} patterns: {e}")))
}

fn namespaced(answers: &serde_json::Map<String, serde_json::Value>) -> serde_json::Value {
    let mut context = serde_json::Map::new();
    context.insert(CONTEXT_NAMESPACE.to_string(), serde_json::Value::Object(answers.clone()));
    serde_json::Value::Object(context)
}

fn choice_label(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Builds the rendering context `{"cookiecutter": {...}}` from the generator config.
///
/// Values are processed in order, and string defaults may refer to earlier
/// answers. Lists are choices, the first being the default. Keys starting
/// with `_` are private and never prompted.
pub fn build_context(
    renderer: &dyn TemplateRenderer,
    prompter: &dyn Prompter,
    config: &GeneratorConfig,
    interactive: bool,
) -> Result<serde_json::Value> {
    let mut answers = serde_json::Map::new();

    for (key, value) in config {
        let current_context = namespaced(&answers);
        let ask = interactive && !key.starts_with('_');

        let answer = match value {
            serde_json::Value::String(default) => {
                let default = renderer.render(default, &current_context)?;
                if ask {
                    serde_json::Value::String(prompter.input(key.clone(), default)?)
                } else {
                    serde_json::Value::String(default)
                }
            }
            serde_json::Value::Array(choices) if !key.starts_with('_') => {
                let choices = choices
                    .iter()
                    .map(|choice| renderer.render(&choice_label(choice), &current_context))
                    .collect::<Result<Vec<_>>>()?;
                let index = if ask && choices.len() > 1 {
                    prompter.select(key.clone(), &choices, 0)?
                } else {
                    0
                };
                choices
                    .get(index)
                    .cloned()
                    .map(serde_json::Value::String)
                    .unwrap_or(serde_json::Value::Null)
            }
            serde_json::Value::Bool(default) if ask => {
                serde_json::Value::Bool(prompter.confirm_with_default(key.clone(), *default)?)
            }
            other => other.clone(),
        };

        answers.insert(key.clone(), answer);
    }

    Ok(namespaced(&answers))
}

/// Finds the top-level directory whose name is a template expression.
///
/// # Errors
/// * `Error::TemplateError` if there is none
pub fn find_project_root<P: AsRef<Path>>(template_dir: P) -> Result<PathBuf> {
    let template_dir = template_dir.as_ref();
    let mut candidates: Vec<PathBuf> = fs::read_dir(template_dir)
        .map_err(|e| Error::file_operation(template_dir, e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_dir()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.contains("{{") && n.contains("}}"))
        })
        .collect();
    candidates.sort();

    candidates.into_iter().next().ok_or_else(|| {
        Error::TemplateError(format!(
            "no project directory (a directory named like '{{{{{CONTEXT_NAMESPACE}.project_name}}}}') in '{}'",
            template_dir.display()
        ))
    })
}

/// `path` relative to `base`, with `/` separators.
fn relative_str(path: &Path, base: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(base)
        .map_err(|e| Error::TemplateError(e.to_string()))?;
    let parts = relative
        .components()
        .map(|c| {
            c.as_os_str().to_str().map(str::to_string).ok_or_else(|| {
                Error::TemplateError(format!("non UTF-8 path '{}'", path.display()))
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join("/"))
}

/// A rendered path is usable when it is relative, has no empty segments and
/// does not leave the project directory.
pub fn is_rendered_path_valid(path: &str) -> bool {
    !path.is_empty()
        && !path.starts_with('/')
        && path.split('/').all(|segment| !segment.trim().is_empty())
        && Path::new(path).components().all(|c| matches!(c, PathComponent::Normal(_)))
}
