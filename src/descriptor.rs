//! Tutorial descriptor (`tutorial-config.json`)

use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Component, Path};
use std::sync::Arc;
use url::Url;

use crate::error::{common, ErrorExt, Result};

pub const DESCRIPTOR_FILE: &str = "tutorial-config.json";

/// Panel identifier that asks for a live preview of the learner's project
pub const BROWSER_PANEL: &str = "browser";

const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ssh", "git", "file"];

/// Author-supplied settings for one tutorial
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TutorialDescriptor {
    /// Remote repository merged into `project/`
    #[serde(default)]
    pub repository: Option<String>,
    /// Files opened on attach, in declaration order
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub panels: BTreeSet<String>,
}

impl TutorialDescriptor {
    /// Read and validate the descriptor in `root`.
    pub fn load(root: &Path) -> Result<Arc<Self>> {
        let path = root.join(DESCRIPTOR_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(common::missing_descriptor(&path));
            }
            Err(e) => {
                return Err(e).to_storage_error_at("Failed to read tutorial descriptor", &path)
            }
        };

        let descriptor = Self::parse(&content).map_err(|e| e.with_path(&path))?;
        tracing::debug!(
            "Descriptor: repository={:?} files={} panels={:?}",
            descriptor.repository,
            descriptor.files.len(),
            descriptor.panels
        );
        Ok(Arc::new(descriptor))
    }

    /// Parse descriptor JSON, normalizing a blank repository to absent.
    pub fn parse(content: &str) -> Result<Self> {
        let mut descriptor: Self = serde_json::from_str(content).map_err(|e| {
            common::invalid_descriptor(DESCRIPTOR_FILE, format!("malformed JSON: {e}"))
                .with_source(e)
        })?;

        if descriptor
            .repository
            .as_deref()
            .is_some_and(|repo| repo.trim().is_empty())
        {
            descriptor.repository = None;
        }

        descriptor.validate()?;
        Ok(descriptor)
    }

    fn validate(&self) -> Result<()> {
        if let Some(repo) = &self.repository {
            validate_repository(repo.trim())
                .map_err(|reason| common::invalid_descriptor(DESCRIPTOR_FILE, reason))?;
        }

        for file in &self.files {
            validate_relative_file(file)
                .map_err(|reason| common::invalid_descriptor(DESCRIPTOR_FILE, reason))?;
        }
        Ok(())
    }

    /// The trimmed repository, if one is configured
    pub fn repository(&self) -> Option<&str> {
        self.repository.as_deref().map(str::trim)
    }

    pub fn requests_browser(&self) -> bool {
        self.panels.contains(BROWSER_PANEL)
    }

    pub fn declares(&self, path: &str) -> bool {
        self.files.iter().any(|f| f == path)
    }
}

fn validate_repository(repo: &str) -> std::result::Result<(), String> {
    if repo.starts_with('-') {
        return Err(format!("repository '{repo}' must not start with '-'"));
    }
    match Url::parse(repo) {
        Ok(url) if ALLOWED_SCHEMES.contains(&url.scheme()) => Ok(()),
        Ok(url) => Err(format!(
            "repository scheme '{}' is not supported (expected one of {})",
            url.scheme(),
            ALLOWED_SCHEMES.join(", ")
        )),
        Err(_) if is_scp_style(repo) => Ok(()),
        Err(e) => Err(format!("repository '{repo}' is not a valid URL: {e}")),
    }
}

/// `user@host:path`
fn is_scp_style(repo: &str) -> bool {
    let Some((user_host, path)) = repo.split_once(':') else {
        return false;
    };
    let Some((user, host)) = user_host.split_once('@') else {
        return false;
    };
    !user.is_empty() && !host.is_empty() && !path.is_empty() && !repo.contains(char::is_whitespace)
}

fn validate_relative_file(file: &str) -> std::result::Result<(), String> {
    if file.trim().is_empty() {
        return Err("files entries must not be empty".to_string());
    }
    let path = Path::new(file);
    if path.has_root() {
        return Err(format!("file '{file}' must be relative to the tutorial root"));
    }
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(format!("file '{file}' must not contain '..'"));
    }
    Ok(())
}
