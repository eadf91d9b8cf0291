#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Writes a component directory with its descriptor and `files/` sources.
pub fn write_component(components_dir: &Path, dir_name: &str, descriptor: &str, files: &[(&str, &str)]) -> PathBuf {
    let component_dir = components_dir.join(dir_name);
    fs::create_dir_all(component_dir.join("files")).unwrap();
    fs::write(component_dir.join("component.yaml"), descriptor).unwrap();
    for (name, content) in files {
        let path = component_dir.join("files").join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    component_dir
}

pub const PYTHON_CORE: &str = r#"
name: python_core
display_name: Python Core
description: Core Python project structure
category: core
cookiecutter_vars:
  use_python: true
  python_version: "3.12"
files:
  - src: pyproject.toml.j2
    dest: pyproject.toml
  - src: src/__init__.py.j2
    dest: "src/{{cookiecutter.package_name}}/__init__.py"
hooks:
  post_gen: [setup_python_env]
"#;

pub const CLI_SUPPORT: &str = r#"
name: cli_support
display_name: CLI Support
description: Command line interface support
category: feature
dependencies: [python_core]
cookiecutter_vars:
  use_cli: true
  cli_framework: click
files:
  - src: cli.py.j2
    dest: "src/{{cookiecutter.package_name}}/cli.py"
hooks:
  post_gen: [setup_cli_entry_point]
"#;

pub const DOCKER: &str = r#"
name: docker
display_name: Docker Support
description: Docker containerization support
category: containerization
conflicts: [podman]
cookiecutter_vars:
  use_docker: true
files:
  - src: Dockerfile.j2
    dest: Dockerfile
"#;

pub const PODMAN: &str = r#"
name: podman
display_name: Podman Support
description: Podman containerization support
category: containerization
files:
  - src: Containerfile
    dest: Dockerfile
"#;

pub const LIBRARY_DEFINITION: &str = r#"
name: python-library
display_name: Python Library
description: Create a Python library project
required_components: [python_core]
optional_components:
  cli_support:
    prompt: Add CLI support?
    help: Adds Click-based command line interface
    default: false
  docker:
    prompt: Add Docker support?
    help: Includes a Dockerfile
    default: false
base_cookiecutter_config:
  project_name: My Python Library
  package_name: "{{ cookiecutter.project_name.lower().replace(' ', '_').replace('-', '_') }}"
  author_name: Your Name
  license: [MIT, Apache-2.0]
  python_version: "3.12"
"#;

/// Registry fixture with python_core, cli_support, docker and podman.
pub fn write_standard_components(components_dir: &Path) {
    write_component(
        components_dir,
        "python_core",
        PYTHON_CORE,
        &[
            ("pyproject.toml.j2", "[project]\nname = \"{{ cookiecutter.package_name }}\"\n"),
            ("src/__init__.py.j2", "__version__ = \"0.1.0\"\n"),
        ],
    );
    write_component(
        components_dir,
        "cli_support",
        CLI_SUPPORT,
        &[("cli.py.j2", "import {{ cookiecutter.cli_framework }}\n")],
    );
    write_component(components_dir, "docker", DOCKER, &[("Dockerfile.j2", "FROM python:3.12\n")]);
    write_component(components_dir, "podman", PODMAN, &[("Containerfile", "FROM fedora\n")]);
}
