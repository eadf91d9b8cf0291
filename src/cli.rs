//! Command-line interface implementation for repo-scaffold.
//! Provides argument parsing and help text formatting using clap.

use crate::constants::DEFAULT_TEMPLATE;
use clap::{error::ErrorKind, Args as ClapArgs, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for repo-scaffold.
#[derive(Parser, Debug)]
#[command(author, version, about = "repo-scaffold: compose project templates from reusable components", long_about = None)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project from a cookiecutter-style template
    Create(CreateArgs),
    /// Compose a template from components and generate a project from it
    Compose(ComposeArgs),
    /// List available components
    List(ListArgs),
}

/// Options shared by every command that generates a project.
#[derive(ClapArgs, Debug)]
pub struct GenerateOptions {
    /// Where to output the generated project directory
    #[arg(short, long, value_name = "OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Use default values instead of asking questions
    #[arg(long)]
    pub no_input: bool,

    /// Force overwrite of an existing project directory
    #[arg(short, long)]
    pub force: bool,

    /// Skip confirmation prompts when executing hooks.
    /// This will automatically execute any pre/post hooks defined in the template
    /// without asking for confirmation first.
    #[arg(long)]
    pub skip_hooks_check: bool,
}

#[derive(ClapArgs, Debug)]
pub struct CreateArgs {
    /// Template directory or git repository URL
    #[arg(short, long, value_name = "TEMPLATE", default_value = DEFAULT_TEMPLATE)]
    pub template: String,

    /// Use the local template in ./template-python
    #[arg(short, long)]
    pub local: bool,

    #[command(flatten)]
    pub options: GenerateOptions,
}

#[derive(ClapArgs, Debug)]
pub struct ComposeArgs {
    /// Directory containing one subdirectory per component
    #[arg(short, long, value_name = "COMPONENTS_DIR")]
    pub components: PathBuf,

    /// Template definition file (YAML)
    #[arg(short, long, value_name = "DEFINITION")]
    pub definition: PathBuf,

    /// Optional component to include; may be repeated
    #[arg(short, long = "select", value_name = "NAME")]
    pub select: Vec<String>,

    /// Keep the composed template directory instead of removing it after generation
    #[arg(long)]
    pub keep_composed: bool,

    /// Directory in which the composed template is staged (defaults to the system temp directory)
    #[arg(long, value_name = "WORK_DIR")]
    pub work_dir: Option<PathBuf>,

    #[command(flatten)]
    pub options: GenerateOptions,
}

#[derive(ClapArgs, Debug)]
pub struct ListArgs {
    /// Directory containing one subdirectory per component
    #[arg(short, long, value_name = "COMPONENTS_DIR")]
    pub components: PathBuf,

    /// Only list components of this category
    #[arg(long)]
    pub category: Option<String>,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::MissingSubcommand
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                // Nothing useful can be done if stdout is gone.
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
