//! README generation with a one-click launch badge

use std::path::{Path, PathBuf};
use tera::{Context, Tera};

use crate::devcontainer::{ports::GUIDE_PORT, DEVCONTAINER_FILE};
use crate::error::{ErrorCode, ErrorExt, ForgeError, Result};

pub const README_FILE: &str = "README.md";

const README_TEMPLATE: &str = r#"# {{ name }}

This tutorial environment has been automatically generated.

## Start Learning
Click the button below to launch a configured Codespace for this tutorial.

[![Open in GitHub Codespaces](https://github.com/codespaces/badge.svg)]({{ deep_link }})

### Environment Details
- **Tutorial Steps**: Available in the preview pane (Port {{ guide_port }}).
- **Your Workspace**: Located in `tutorials/{{ name }}`.
- **Project Code**: Located in `tutorials/{{ name }}/project`.
"#;

pub fn deep_link(owner: &str, repo: &str, name: &str) -> String {
    format!(
        "https://codespaces.new/{owner}/{repo}?devcontainer_path=.devcontainer/{name}/{DEVCONTAINER_FILE}"
    )
}

pub struct ReadmeRenderer {
    template_engine: Tera,
}

impl ReadmeRenderer {
    pub fn new() -> Result<Self> {
        let mut template_engine = Tera::default();
        template_engine
            .add_raw_template(README_FILE, README_TEMPLATE)
            .map_err(template_error)?;
        Ok(Self { template_engine })
    }

    pub fn render(&self, name: &str, owner: &str, repo: &str) -> Result<String> {
        let mut context = Context::new();
        context.insert("name", name);
        context.insert("deep_link", &deep_link(owner, repo, name));
        context.insert("guide_port", &GUIDE_PORT);

        self.template_engine
            .render(README_FILE, &context)
            .map_err(template_error)
    }

    /// Render into `<root>/README.md`, replacing any authored README.
    pub fn write(&self, root: &Path, name: &str, owner: &str, repo: &str) -> Result<PathBuf> {
        let path = root.join(README_FILE);
        let content = self.render(name, owner, repo)?;
        std::fs::write(&path, content).to_storage_error_at("Failed to write README", &path)?;
        Ok(path)
    }
}

fn template_error(err: tera::Error) -> ForgeError {
    ForgeError::storage_with_code(
        ErrorCode::STORAGE_SERIALIZATION_ERROR,
        "Failed to render README template",
        None,
    )
    .with_source(err)
}
