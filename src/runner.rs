//! Command execution for the repo-scaffold binary.

use crate::cli::{Args, Command, ComposeArgs, CreateArgs, GenerateOptions, ListArgs};
use crate::composer::TemplateComposer;
use crate::constants::LOCAL_TEMPLATE_DIR;
use crate::error::{Error, Result};
use crate::generator::{Generator, MiniJinjaGenerator};
use crate::loader::TemplateSource;
use crate::prompt::{select_optional_components, DialoguerPrompter};
use crate::registry::ComponentRegistry;
use crate::renderer::MiniJinjaRenderer;
use crate::template::TemplateDefinition;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Runs the parsed command.
pub fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Create(create_args) => create(create_args),
        Command::Compose(compose_args) => compose(compose_args),
        Command::List(list_args) => list(list_args),
    }
}

fn generate(template_dir: &Path, options: &GenerateOptions) -> Result<PathBuf> {
    let renderer = MiniJinjaRenderer::new();
    let prompter = DialoguerPrompter::new();
    let generator =
        MiniJinjaGenerator::new(&renderer, &prompter, options.force, options.skip_hooks_check);
    generator.generate(template_dir, &options.output_dir, !options.no_input)
}

fn create(args: CreateArgs) -> Result<()> {
    let source = if args.local {
        let cwd = std::env::current_dir().map_err(Error::IoError)?;
        TemplateSource::FileSystem(cwd.join(LOCAL_TEMPLATE_DIR))
    } else {
        TemplateSource::from_string(&args.template)
    };

    let template = source.load()?;
    let project_dir = generate(template.path(), &args.options)?;

    println!("Project generated successfully in {}.", project_dir.display());
    Ok(())
}

fn compose(args: ComposeArgs) -> Result<()> {
    let registry = ComponentRegistry::load(&args.components)?;
    if registry.is_empty() {
        warn!("No components found in {}", args.components.display());
    }
    let definition = TemplateDefinition::from_file(&args.definition)?;

    let prompter = DialoguerPrompter::new();
    let selected =
        select_optional_components(&prompter, &definition, &args.select, !args.options.no_input)?;

    let composer = match &args.work_dir {
        Some(work_dir) => TemplateComposer::with_temp_root(&registry, work_dir),
        None => TemplateComposer::new(&registry),
    };
    let composed_dir = composer.compose(&definition, &selected)?;
    let generated = generate(&composed_dir, &args.options);

    if args.keep_composed {
        println!("Composed template kept in {}.", composed_dir.display());
    } else if let Err(e) = std::fs::remove_dir_all(&composed_dir) {
        warn!("Cannot remove composed template {}: {}", composed_dir.display(), e);
    } else {
        debug!("Removed composed template {}", composed_dir.display());
    }

    let project_dir = generated?;
    println!(
        "Project '{}' generated successfully in {}.",
        definition.name,
        project_dir.display()
    );
    Ok(())
}

fn list(args: ListArgs) -> Result<()> {
    let registry = ComponentRegistry::load(&args.components)?;
    let components = match &args.category {
        Some(category) => registry.by_category(category),
        None => registry.list(),
    };

    if components.is_empty() {
        println!("No components found.");
        return Ok(());
    }

    for component in components {
        println!(
            "{} [{}] {}: {}",
            component.name, component.category, component.display_name, component.description
        );
        if !component.dependencies.is_empty() {
            println!("    depends on: {}", component.dependencies.join(", "));
        }
        if !component.conflicts.is_empty() {
            println!("    conflicts with: {}", component.conflicts.join(", "));
        }
    }
    Ok(())
}
