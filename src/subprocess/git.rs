use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use super::error::ToolError;
use super::runner::{ProcessRunner, ToolCommand};

#[async_trait]
pub trait GitRunner: Send + Sync {
    /// Clone `url` into the existing, empty directory `dest`.
    async fn clone_into(&self, url: &str, dest: &Path) -> Result<(), ToolError>;
}

pub struct GitRunnerImpl {
    runner: Arc<dyn ProcessRunner>,
}

impl GitRunnerImpl {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl GitRunner for GitRunnerImpl {
    async fn clone_into(&self, url: &str, dest: &Path) -> Result<(), ToolError> {
        // `--` keeps the url from ever being read as an option
        let command = ToolCommand::new("git")
            .args(["clone", "--quiet", "--", url, "."])
            .current_dir(dest)
            // never block on a credential prompt
            .env("GIT_TERMINAL_PROMPT", "0");
        let output = self.runner.run(command.clone()).await?;

        if !output.success() && !output.stderr.is_empty() {
            tracing::warn!("git clone: {}", output.stderr.trim_end());
        }

        output.check(&command)
    }
}
