//! Pipeline configuration
//!
//! Configuration is resolved in three layers, later layers winning:
//! built-in defaults relative to the root directory, an optional
//! `tutorial-forge.toml` in the root, then environment variables.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{ErrorCode, ForgeError};

/// Name of the optional configuration file looked up in the root directory
pub const CONFIG_FILE_NAME: &str = "tutorial-forge.toml";

pub const DEFAULT_OWNER: &str = "YourUsername";
pub const DEFAULT_REPO: &str = "YourRepo";
pub const DEFAULT_TOOLCHAIN: &str = "npm";

/// Fully resolved configuration passed into [`crate::pipeline::Pipeline`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgeConfig {
    /// Directory scanned for the uploaded archive
    pub uploads_dir: PathBuf,
    /// Directory receiving `<tutorial>/` project roots
    pub tutorials_dir: PathBuf,
    /// Directory receiving `<tutorial>/devcontainer.json`
    pub devcontainer_dir: PathBuf,
    /// Owning account used in the launch deep link
    pub owner: String,
    /// Repository name used in the deep link and the workspace folder
    pub repo: String,
    /// Package manager executable used by the site build
    pub toolchain: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    paths: PathsSection,
    #[serde(default)]
    hosting: HostingSection,
    #[serde(default)]
    toolchain: ToolchainSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PathsSection {
    uploads: Option<PathBuf>,
    tutorials: Option<PathBuf>,
    devcontainer: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct HostingSection {
    owner: Option<String>,
    repo: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ToolchainSection {
    program: Option<String>,
}

impl ForgeConfig {
    /// Defaults for a checkout rooted at `root`.
    pub fn with_root(root: &Path) -> Self {
        Self {
            uploads_dir: root.join("uploads"),
            tutorials_dir: root.join("tutorials"),
            devcontainer_dir: root.join(".devcontainer"),
            owner: DEFAULT_OWNER.to_string(),
            repo: DEFAULT_REPO.to_string(),
            toolchain: DEFAULT_TOOLCHAIN.to_string(),
        }
    }

    /// Resolve all three layers for `root`.
    pub fn load(root: &Path) -> Result<Self, ForgeError> {
        let mut config = Self::with_root(root);

        let file_path = root.join(CONFIG_FILE_NAME);
        if file_path.is_file() {
            let content = std::fs::read_to_string(&file_path).map_err(|e| {
                ForgeError::config_with_code(
                    ErrorCode::CONFIG_NOT_READABLE,
                    format!("cannot read {}", file_path.display()),
                )
                .with_source(e)
            })?;
            config.apply_file(root, &content)?;
            tracing::debug!("Loaded configuration from {}", file_path.display());
        }

        config.merge_env_vars();
        Ok(config)
    }

    fn apply_file(&mut self, root: &Path, content: &str) -> Result<(), ForgeError> {
        let file: FileConfig = toml::from_str(content).map_err(|e| {
            ForgeError::config_with_code(
                ErrorCode::CONFIG_INVALID_TOML,
                format!("invalid {CONFIG_FILE_NAME}"),
            )
            .with_source(e)
        })?;

        if let Some(dir) = file.paths.uploads {
            self.uploads_dir = root.join(dir);
        }
        if let Some(dir) = file.paths.tutorials {
            self.tutorials_dir = root.join(dir);
        }
        if let Some(dir) = file.paths.devcontainer {
            self.devcontainer_dir = root.join(dir);
        }
        if let Some(owner) = file.hosting.owner {
            self.owner = owner;
        }
        if let Some(repo) = file.hosting.repo {
            self.repo = repo;
        }
        if let Some(program) = file.toolchain.program {
            self.toolchain = program;
        }
        Ok(())
    }

    pub fn merge_env_vars(&mut self) {
        self.merge_env(|key| std::env::var(key).ok());
    }

    /// Apply `GITHUB_REPOSITORY_OWNER` and `GITHUB_REPOSITORY` (`owner/name`).
    pub fn merge_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(owner) = lookup("GITHUB_REPOSITORY_OWNER").filter(|v| !v.is_empty()) {
            self.owner = owner;
        }

        if let Some(full_name) = lookup("GITHUB_REPOSITORY") {
            match full_name.split('/').nth(1).filter(|name| !name.is_empty()) {
                Some(name) => self.repo = name.to_string(),
                None => tracing::warn!(
                    "Ignoring GITHUB_REPOSITORY={:?}: expected owner/name",
                    full_name
                ),
            }
        }
    }
}
