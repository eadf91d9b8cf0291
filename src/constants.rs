//! Common constants used throughout repo-scaffold.

/// Component descriptor file names, tried in order inside each component directory
pub const COMPONENT_FILES: [&str; 2] = ["component.yaml", "component.yml"];

/// Directory inside a component holding the sources referenced by `files[].src`
pub const COMPONENT_FILES_DIR: &str = "files";

/// Directory inside a component (and inside the composed template) holding hook scripts
pub const HOOKS_DIR: &str = "hooks";

/// Directory inside the composed `hooks/` directory holding per-action scripts
pub const HOOK_ACTIONS_DIR: &str = "actions";

/// Generator configuration file written at the root of a composed template
pub const GENERATOR_CONFIG_FILE: &str = "cookiecutter.json";

/// Variable namespace the generator exposes template variables under
pub const CONTEXT_NAMESPACE: &str = "cookiecutter";

/// Name of the project-root directory inside a composed template
pub const PROJECT_ROOT_DIR: &str = "{{cookiecutter.package_name}}";

/// Recognized hook phases and the script file each phase is written to
pub const HOOK_PHASES: [(&str, &str); 2] =
    [("pre_gen", "pre_gen_project"), ("post_gen", "post_gen_project")];

/// Default category for components that do not declare one
pub const DEFAULT_CATEGORY: &str = "general";

/// Template used by `create` when no template is given
pub const DEFAULT_TEMPLATE: &str = "https://github.com/ShawnDen-coder/repo-template.git";

/// Template directory used by `create --local`
pub const LOCAL_TEMPLATE_DIR: &str = "template-python";
