use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::ports::PortAttributes;
use crate::error::{ErrorCode, ErrorExt, ForgeError, Result};

pub const BASE_IMAGE: &str = "mcr.microsoft.com/devcontainers/javascript-node:1-22-bookworm";
pub const GITHUB_CLI_FEATURE: &str = "ghcr.io/devcontainers/features/github-cli:1";
pub const DEVCONTAINER_FILE: &str = "devcontainer.json";

/// `devcontainer.json` contents
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentDescriptor {
    pub name: String,
    pub image: String,
    pub workspace_folder: String,
    pub wait_for: String,
    pub update_content_command: String,
    pub post_create_command: String,
    pub post_attach_command: String,
    pub features: BTreeMap<String, Map<String, Value>>,
    pub customizations: Customizations,
    pub ports_attributes: BTreeMap<String, PortAttributes>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customizations {
    pub vscode: VscodeCustomizations,
    pub codespaces: CodespacesCustomizations,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VscodeCustomizations {
    pub extensions: Vec<String>,
    pub settings: EditorSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorSettings {
    #[serde(rename = "editor.formatOnSave")]
    pub format_on_save: bool,
    #[serde(rename = "files.exclude")]
    pub files_exclude: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodespacesCustomizations {
    pub open_files: Vec<String>,
}

impl EnvironmentDescriptor {
    /// Serialize with four-space indentation
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer).map_err(|e| {
            ForgeError::storage_with_code(
                ErrorCode::STORAGE_SERIALIZATION_ERROR,
                "Failed to serialize devcontainer.json",
                None,
            )
            .with_source(e)
        })?;
        String::from_utf8(buf).to_storage_error("devcontainer.json is not valid UTF-8")
    }

    /// Write `<dir>/devcontainer.json`, creating `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir).to_storage_error_at("Failed to create devcontainer directory", dir)?;
        let path = dir.join(DEVCONTAINER_FILE);
        std::fs::write(&path, self.to_json()?)
            .to_storage_error_at("Failed to write devcontainer.json", &path)?;
        Ok(path)
    }
}
