//! User interaction: hook confirmation, variable prompts and optional
//! component selection.

use crate::error::{Error, Result};
use crate::template::TemplateDefinition;
use dialoguer::{Confirm, Input, Select};
use log::debug;

/// Trait for asking the user questions, so generation can run without a terminal in tests.
pub trait Prompter {
    /// Asks a yes/no question defaulting to "no". Returns `true` without
    /// asking when `skip_prompt` is set.
    fn confirm(&self, skip_prompt: bool, prompt: String) -> Result<bool>;

    /// Asks a yes/no question with an explicit default.
    fn confirm_with_default(&self, prompt: String, default: bool) -> Result<bool>;

    /// Asks for free text.
    fn input(&self, prompt: String, default: String) -> Result<String>;

    /// Asks to pick one of `items`, returning its index.
    fn select(&self, prompt: String, items: &[String], default: usize) -> Result<usize>;
}

/// Terminal prompter backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, skip_prompt: bool, prompt: String) -> Result<bool> {
        if skip_prompt {
            return Ok(true);
        }
        self.confirm_with_default(prompt, false)
    }

    fn confirm_with_default(&self, prompt: String, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|e| Error::IoError(e.into()))
    }

    fn input(&self, prompt: String, default: String) -> Result<String> {
        Input::new()
            .with_prompt(prompt)
            .default(default)
            .interact_text()
            .map_err(|e| Error::IoError(e.into()))
    }

    fn select(&self, prompt: String, items: &[String], default: usize) -> Result<usize> {
        Select::new()
            .with_prompt(prompt)
            .default(default)
            .items(items)
            .interact()
            .map_err(|e| Error::IoError(e.into()))
    }
}

/// Chooses which optional components of `definition` to include.
///
/// `preselected` names are always included. When `interactive`, every other
/// optional component is offered with its prompt, help and default;
/// otherwise the defaults are taken.
pub fn select_optional_components(
    prompter: &dyn Prompter,
    definition: &TemplateDefinition,
    preselected: &[String],
    interactive: bool,
) -> Result<Vec<String>> {
    let mut selected: Vec<String> = preselected.to_vec();

    for (name, option) in &definition.optional_components {
        if selected.contains(name) {
            continue;
        }
        let include = if interactive {
            let prompt = match (option.prompt.is_empty(), option.help.is_empty()) {
                (true, _) => format!("Include {name}?"),
                (false, true) => option.prompt.clone(),
                (false, false) => format!("{} ({})", option.prompt, option.help),
            };
            prompter.confirm_with_default(prompt, option.default)?
        } else {
            option.default
        };
        if include {
            selected.push(name.clone());
        }
    }

    debug!("Selected components: {selected:?}");
    Ok(selected)
}
