mod common;

use common::{write_component, write_standard_components, LIBRARY_DEFINITION};
use indexmap::IndexMap;
use repo_scaffold::composer::TemplateComposer;
use repo_scaffold::error::{Error, Result};
use repo_scaffold::generator::{build_context, find_project_root, Generator, MiniJinjaGenerator};
use repo_scaffold::prompt::Prompter;
use repo_scaffold::registry::ComponentRegistry;
use repo_scaffold::renderer::MiniJinjaRenderer;
use repo_scaffold::template::TemplateDefinition;
use serde_json::json;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Answers text questions from a script and everything else with defaults.
struct ScriptedPrompter {
    inputs: RefCell<VecDeque<String>>,
    confirm_hooks: bool,
    hook_questions: RefCell<usize>,
}

impl ScriptedPrompter {
    fn new(inputs: &[&str], confirm_hooks: bool) -> Self {
        Self {
            inputs: RefCell::new(inputs.iter().map(|s| s.to_string()).collect()),
            confirm_hooks,
            hook_questions: RefCell::new(0),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, skip_prompt: bool, _prompt: String) -> Result<bool> {
        *self.hook_questions.borrow_mut() += 1;
        Ok(skip_prompt || self.confirm_hooks)
    }

    fn confirm_with_default(&self, _prompt: String, default: bool) -> Result<bool> {
        Ok(default)
    }

    fn input(&self, _prompt: String, default: String) -> Result<String> {
        Ok(self.inputs.borrow_mut().pop_front().unwrap_or(default))
    }

    fn select(&self, _prompt: String, items: &[String], _default: usize) -> Result<usize> {
        Ok(items.len() - 1)
    }
}

fn compose_library(workspace: &Path, selection: &[&str]) -> PathBuf {
    let components_dir = workspace.join("components");
    if !components_dir.exists() {
        write_standard_components(&components_dir);
    }
    let registry = ComponentRegistry::load(&components_dir).unwrap();
    let definition = TemplateDefinition::parse(LIBRARY_DEFINITION).unwrap();
    TemplateComposer::with_temp_root(&registry, workspace)
        .compose(&definition, selection)
        .unwrap()
}

#[test_log::test]
fn test_generate_non_interactive() {
    let workspace = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let composed = compose_library(workspace.path(), &["cli_support"]);
    let renderer = MiniJinjaRenderer::new();
    let prompter = ScriptedPrompter::new(&[], false);

    let project = MiniJinjaGenerator::new(&renderer, &prompter, false, false)
        .generate(&composed, output.path(), false)
        .unwrap();

    assert_eq!(project, output.path().join("my_python_library"));
    assert_eq!(
        fs::read_to_string(project.join("pyproject.toml")).unwrap(),
        "[project]\nname = \"my_python_library\"\n"
    );
    assert_eq!(
        fs::read_to_string(project.join("src/my_python_library/cli.py")).unwrap(),
        "import click\n"
    );
    assert!(project.join("src/my_python_library/__init__.py").is_file());
}

#[test]
fn test_generate_interactive_answers() {
    let workspace = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let composed = compose_library(workspace.path(), &[]);
    let renderer = MiniJinjaRenderer::new();
    let prompter = ScriptedPrompter::new(&["Demo App"], false);

    let project = MiniJinjaGenerator::new(&renderer, &prompter, false, false)
        .generate(&composed, output.path(), true)
        .unwrap();

    assert_eq!(project, output.path().join("demo_app"));
}

#[test]
fn test_existing_project_requires_force() {
    let workspace = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let composed = compose_library(workspace.path(), &[]);
    fs::create_dir_all(output.path().join("my_python_library")).unwrap();
    let renderer = MiniJinjaRenderer::new();
    let prompter = ScriptedPrompter::new(&[], false);

    let err = MiniJinjaGenerator::new(&renderer, &prompter, false, false)
        .generate(&composed, output.path(), false)
        .unwrap_err();
    assert!(matches!(err, Error::OutputDirectoryExistsError { .. }));

    let project = MiniJinjaGenerator::new(&renderer, &prompter, true, false)
        .generate(&composed, output.path(), false)
        .unwrap();
    assert!(project.join("pyproject.toml").is_file());
}

#[test]
fn test_build_context_renders_in_order() {
    let renderer = MiniJinjaRenderer::new();
    let prompter = ScriptedPrompter::new(&["Ignored"], false);
    let mut config = IndexMap::new();
    config.insert("project_name".to_string(), json!("Hello World"));
    config.insert(
        "package_name".to_string(),
        json!("{{ cookiecutter.project_name.lower().replace(' ', '_') }}"),
    );
    config.insert("license".to_string(), json!(["MIT", "BSD"]));
    config.insert("use_cli".to_string(), json!(true));
    config.insert("_private".to_string(), json!(["*.png"]));
    config.insert("retries".to_string(), json!(3));

    let context = build_context(&renderer, &prompter, &config, false).unwrap();

    assert_eq!(
        context,
        json!({"cookiecutter": {
            "project_name": "Hello World",
            "package_name": "hello_world",
            "license": "MIT",
            "use_cli": true,
            "_private": ["*.png"],
            "retries": 3
        }})
    );

    let context = build_context(&renderer, &prompter, &config, true).unwrap();
    assert_eq!(context["cookiecutter"]["project_name"], json!("Ignored"));
    assert_eq!(context["cookiecutter"]["license"], json!("BSD"));
}

#[test]
fn test_copy_without_render() {
    let workspace = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let template = workspace.path().join("template");
    let root = template.join("{{cookiecutter.name}}");
    fs::create_dir_all(root.join("assets")).unwrap();
    fs::write(
        template.join("cookiecutter.json"),
        r#"{"name": "demo", "_copy_without_render": ["assets/*"]}"#,
    )
    .unwrap();
    fs::write(root.join("README.md"), "# {{ cookiecutter.name }}\n").unwrap();
    fs::write(root.join("assets/raw.txt"), "${{ github.ref }}\n").unwrap();
    let renderer = MiniJinjaRenderer::new();
    let prompter = ScriptedPrompter::new(&[], false);

    let project = MiniJinjaGenerator::new(&renderer, &prompter, false, false)
        .generate(&template, output.path(), false)
        .unwrap();

    assert_eq!(fs::read_to_string(project.join("README.md")).unwrap(), "# demo\n");
    assert_eq!(fs::read_to_string(project.join("assets/raw.txt")).unwrap(), "${{ github.ref }}\n");
}

#[test]
fn test_missing_generator_config() {
    let template = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::create_dir_all(template.path().join("{{cookiecutter.name}}")).unwrap();
    let renderer = MiniJinjaRenderer::new();
    let prompter = ScriptedPrompter::new(&[], false);

    let err = MiniJinjaGenerator::new(&renderer, &prompter, false, false)
        .generate(template.path(), output.path(), false)
        .unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));
}

#[test]
fn test_find_project_root() {
    let template = TempDir::new().unwrap();
    fs::create_dir_all(template.path().join("hooks")).unwrap();
    assert!(matches!(find_project_root(template.path()), Err(Error::TemplateError(_))));

    fs::create_dir_all(template.path().join("{{cookiecutter.package_name}}")).unwrap();
    assert_eq!(
        find_project_root(template.path()).unwrap(),
        template.path().join("{{cookiecutter.package_name}}")
    );
}

#[cfg(unix)]
#[test]
fn test_hooks_run_when_trusted() {
    let workspace = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let components_dir = workspace.path().join("components");
    write_standard_components(&components_dir);
    let hooks_dir = components_dir.join("python_core/hooks");
    fs::create_dir_all(&hooks_dir).unwrap();
    fs::write(hooks_dir.join("setup_python_env"), "#!/bin/sh\ntouch hook_ran\n").unwrap();
    let composed = compose_library(workspace.path(), &["cli_support"]);
    let renderer = MiniJinjaRenderer::new();
    let prompter = ScriptedPrompter::new(&[], false);

    let project = MiniJinjaGenerator::new(&renderer, &prompter, false, true)
        .generate(&composed, output.path(), false)
        .unwrap();

    assert!(project.join("hook_ran").is_file());
}

#[cfg(unix)]
#[test]
fn test_hooks_skipped_without_confirmation() {
    let workspace = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let components_dir = workspace.path().join("components");
    write_standard_components(&components_dir);
    let hooks_dir = components_dir.join("python_core/hooks");
    fs::create_dir_all(&hooks_dir).unwrap();
    fs::write(hooks_dir.join("setup_python_env"), "#!/bin/sh\ntouch hook_ran\n").unwrap();
    let composed = compose_library(workspace.path(), &[]);
    let renderer = MiniJinjaRenderer::new();
    let prompter = ScriptedPrompter::new(&[], false);

    let project = MiniJinjaGenerator::new(&renderer, &prompter, false, false)
        .generate(&composed, output.path(), true)
        .unwrap();

    assert!(!project.join("hook_ran").exists());
    assert_eq!(*prompter.hook_questions.borrow(), 1);
}

#[test]
fn test_no_hook_question_without_actions() {
    let workspace = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let components_dir = workspace.path().join("components");
    write_standard_components(&components_dir);
    let registry = ComponentRegistry::load(&components_dir).unwrap();
    let definition = TemplateDefinition {
        name: "container".to_string(),
        required_components: vec!["docker".to_string()],
        base_cookiecutter_config: [("package_name".to_string(), json!("demo"))].into_iter().collect(),
        ..Default::default()
    };
    let composed = TemplateComposer::with_temp_root(&registry, workspace.path())
        .compose(&definition, &[] as &[&str])
        .unwrap();
    let renderer = MiniJinjaRenderer::new();
    let prompter = ScriptedPrompter::new(&[], true);

    let project = MiniJinjaGenerator::new(&renderer, &prompter, false, false)
        .generate(&composed, output.path(), true)
        .unwrap();

    assert!(project.join("Dockerfile").is_file());
    assert_eq!(*prompter.hook_questions.borrow(), 0);
}

#[cfg(unix)]
#[test]
fn test_every_action_receives_context() {
    let workspace = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let components_dir = workspace.path().join("components");
    write_component(
        &components_dir,
        "recorder",
        "name: recorder\ndisplay_name: Recorder\ndescription: Recorder\nhooks:\n  post_gen: [first, second]\n",
        &[],
    );
    let hooks_dir = components_dir.join("recorder/hooks");
    fs::create_dir_all(&hooks_dir).unwrap();
    fs::write(hooks_dir.join("first"), "#!/bin/sh\ncat > first.json\n").unwrap();
    fs::write(hooks_dir.join("second"), "#!/bin/sh\ncat > second.json\n").unwrap();
    let registry = ComponentRegistry::load(&components_dir).unwrap();
    let definition = TemplateDefinition {
        name: "recorder".to_string(),
        required_components: vec!["recorder".to_string()],
        base_cookiecutter_config: [("package_name".to_string(), json!("demo"))].into_iter().collect(),
        ..Default::default()
    };
    let composed = TemplateComposer::with_temp_root(&registry, workspace.path())
        .compose(&definition, &[] as &[&str])
        .unwrap();
    let renderer = MiniJinjaRenderer::new();
    let prompter = ScriptedPrompter::new(&[], false);

    let project = MiniJinjaGenerator::new(&renderer, &prompter, false, true)
        .generate(&composed, output.path(), false)
        .unwrap();

    for recorded in ["first.json", "second.json"] {
        let context: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(project.join(recorded)).unwrap()).unwrap();
        assert_eq!(context["cookiecutter"]["package_name"], json!("demo"));
    }
}

#[cfg(unix)]
#[test]
fn test_failing_hook_is_reported() {
    let workspace = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let components_dir = workspace.path().join("components");
    write_component(
        &components_dir,
        "failing",
        "name: failing\ndisplay_name: Failing\ndescription: Failing\nhooks:\n  pre_gen: [explode]\n",
        &[],
    );
    let hooks_dir = components_dir.join("failing/hooks");
    fs::create_dir_all(&hooks_dir).unwrap();
    fs::write(hooks_dir.join("explode"), "#!/bin/sh\nexit 3\n").unwrap();
    let registry = ComponentRegistry::load(&components_dir).unwrap();
    let definition = TemplateDefinition {
        name: "failing".to_string(),
        required_components: vec!["failing".to_string()],
        base_cookiecutter_config: [("package_name".to_string(), json!("demo"))].into_iter().collect(),
        ..Default::default()
    };
    let composed = TemplateComposer::with_temp_root(&registry, workspace.path())
        .compose(&definition, &["failing"])
        .unwrap();
    let renderer = MiniJinjaRenderer::new();
    let prompter = ScriptedPrompter::new(&[], false);

    let err = MiniJinjaGenerator::new(&renderer, &prompter, false, true)
        .generate(&composed, output.path(), false)
        .unwrap_err();
    assert!(matches!(err, Error::HookError(_)));
}
