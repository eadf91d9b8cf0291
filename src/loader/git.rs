use crate::error::{Error, Result};
use crate::loader::interface::{LoadedTemplate, TemplateLoader};
use log::debug;
use std::path::PathBuf;
use url::Url;

/// Loader for templates from git repositories.
pub struct GitLoader<S: AsRef<str>> {
    repo: S,
}

impl<S: AsRef<str>> GitLoader<S> {
    pub fn new(repo: S) -> Self {
        Self { repo }
    }

    /// Whether `s` looks like a git remote rather than a local path.
    pub fn is_git_url(s: &str) -> bool {
        if s.starts_with("git@") {
            return true;
        }
        match Url::parse(s) {
            Ok(url) => matches!(url.scheme(), "https" | "http" | "git" | "ssh"),
            Err(_) => false,
        }
    }
}

impl<S: AsRef<str>> TemplateLoader for GitLoader<S> {
    /// Clones the repository into a temporary directory.
    ///
    /// # Errors
    /// * `Error::Git2Error` if the clone fails
    fn load(&self) -> Result<LoadedTemplate> {
        let repo_url = self.repo.as_ref();
        let checkout = tempfile::Builder::new()
            .prefix("repo-scaffold-template-")
            .tempdir()
            .map_err(Error::IoError)?;

        let repo_name = repo_url
            .trim_end_matches('/')
            .rsplit(['/', ':'])
            .next()
            .map(|name| name.trim_end_matches(".git"))
            .filter(|name| !name.is_empty())
            .unwrap_or("template");
        let clone_path = checkout.path().join(repo_name);

        debug!("Cloning repository '{}' to '{}'.", repo_url, clone_path.display());

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            let username = username_from_url.unwrap_or("git");
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                let home = std::env::var("HOME").unwrap_or_default();
                git2::Cred::ssh_key(
                    username,
                    None,
                    &PathBuf::from(home).join(".ssh").join("id_rsa"),
                    None,
                )
            } else {
                git2::Cred::default()
            }
        });

        let mut fetch_opts = git2::FetchOptions::new();
        fetch_opts.remote_callbacks(callbacks);

        let mut builder = git2::build::RepoBuilder::new();
        builder.fetch_options(fetch_opts);
        builder.clone(repo_url, &clone_path)?;

        Ok(LoadedTemplate::checkout(clone_path, checkout))
    }
}
