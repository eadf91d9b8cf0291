//! Pre and post generation hooks.
//!
//! The composer writes one shell script per recognized phase into the
//! composed template's `hooks/` directory; the generator runs them around
//! project generation. Each script calls `run_action` once per hook
//! identifier contributed by the selected components, and every action
//! receives the JSON context on its stdin.

use crate::component::Component;
use crate::constants::{HOOKS_DIR, HOOK_ACTIONS_DIR, HOOK_PHASES};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::{debug, warn};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

const SCRIPT_PRELUDE: &str = r#"#!/bin/sh
set -e
HOOK_DIR="$(cd "$(dirname "$0")" && pwd)"
CONTEXT="$(cat)"

run_action() {
    if [ -f "$HOOK_DIR/actions/$1" ] && [ -x "$HOOK_DIR/actions/$1" ]; then
        printf '%s' "$CONTEXT" | "$HOOK_DIR/actions/$1"
    else
        echo "hook action '$1' is not provided by this template, skipping" >&2
    fi
}
"#;

/// Returns the paths of the pre and post generation hook scripts of a template.
pub fn get_hook_files<P: AsRef<Path>>(template_dir: P) -> (PathBuf, PathBuf) {
    let hooks_dir = template_dir.as_ref().join(HOOKS_DIR);
    let [(_, pre), (_, post)] = HOOK_PHASES;
    (hooks_dir.join(pre), hooks_dir.join(post))
}

/// Collects hook identifiers per recognized phase, in component order.
/// Every recognized phase is present in the result, possibly empty.
pub fn collect_hook_actions(components: &[&Component]) -> IndexMap<&'static str, Vec<String>> {
    let mut actions: IndexMap<&'static str, Vec<String>> =
        HOOK_PHASES.iter().map(|(phase, _)| (*phase, Vec::new())).collect();

    for component in components {
        for (phase, identifiers) in &component.hooks {
            match actions.get_mut(phase.as_str()) {
                Some(accumulated) => accumulated.extend(identifiers.iter().cloned()),
                None => warn!(
                    "Component '{}' declares hooks for unknown phase '{}', ignoring",
                    component.name, phase
                ),
            }
        }
    }

    actions
}

/// Renders the shell script for one phase.
pub fn render_hook_script(phase: &str, actions: &[String]) -> String {
    let mut script = String::from(SCRIPT_PRELUDE);
    script.push_str(&format!("\n# {phase} actions\n"));
    if actions.is_empty() {
        script.push_str(":\n");
    }
    for action in actions {
        script.push_str(&format!("run_action {action}\n"));
    }
    script
}

/// Writes one hook script per recognized phase into `template_root/hooks`,
/// plus any action scripts the components ship in their own `hooks/` directory.
///
/// # Errors
/// * `Error::FileOperationError` if a script or action cannot be written
pub fn write_hook_scripts<P: AsRef<Path>>(components: &[&Component], template_root: P) -> Result<()> {
    let hooks_dir = template_root.as_ref().join(HOOKS_DIR);
    fs::create_dir_all(&hooks_dir).map_err(|e| Error::file_operation(&hooks_dir, e))?;

    let actions = collect_hook_actions(components);
    for (phase, file_name) in HOOK_PHASES {
        let script_path = hooks_dir.join(file_name);
        let script = render_hook_script(phase, &actions[phase]);
        fs::write(&script_path, script).map_err(|e| Error::file_operation(&script_path, e))?;
        make_executable(&script_path)?;
        debug!("Wrote {} hook with {} actions", phase, actions[phase].len());
    }

    let actions_dir = hooks_dir.join(HOOK_ACTIONS_DIR);
    for component in components {
        let recognized = HOOK_PHASES.iter().filter_map(|(phase, _)| component.hooks.get(*phase));
        for identifier in recognized.flatten() {
            let source = component.hook_action_path(identifier);
            if !source.is_file() {
                continue;
            }
            fs::create_dir_all(&actions_dir).map_err(|e| Error::file_operation(&actions_dir, e))?;
            let target = actions_dir.join(identifier);
            fs::copy(&source, &target).map_err(|e| Error::file_operation(&source, e))?;
            make_executable(&target)?;
            debug!("Copied hook action '{}' from component '{}'", identifier, component.name);
        }
    }

    Ok(())
}

/// Whether the template has a hook script that does more than the empty
/// script the composer writes for a phase without actions.
pub fn has_hook_commands<P: AsRef<Path>>(template_dir: P) -> bool {
    let hooks_dir = template_dir.as_ref().join(HOOKS_DIR);
    HOOK_PHASES.iter().any(|(phase, file_name)| match fs::read_to_string(hooks_dir.join(file_name)) {
        Ok(script) => script != render_hook_script(phase, &[]),
        Err(_) => hooks_dir.join(file_name).exists(),
    })
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .map_err(|e| Error::file_operation(path, e))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Runs a hook script with `project_dir` as working directory, writing the
/// JSON context to its stdin. Missing scripts are not an error.
///
/// # Errors
/// * `Error::HookError` if the script cannot be started or exits unsuccessfully
pub fn run_hook<P: AsRef<Path>>(
    script_path: P,
    project_dir: P,
    context: &serde_json::Value,
) -> Result<()> {
    let script_path = script_path.as_ref();
    if !script_path.exists() {
        return Ok(());
    }

    debug!("Running hook {}", script_path.display());
    let mut child = Command::new(script_path)
        .current_dir(project_dir.as_ref())
        .stdin(Stdio::piped())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| Error::HookError(format!("cannot start '{}': {e}", script_path.display())))?;

    // The script may exit without reading its input.
    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(context.to_string().as_bytes()) {
            debug!("Hook did not consume its context: {e}");
        }
    }

    let status = child.wait().map_err(Error::IoError)?;
    if !status.success() {
        return Err(Error::HookError(format!(
            "'{}' failed with status: {}",
            script_path.display(),
            status
        )));
    }

    Ok(())
}
