use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use super::error::ToolError;
use super::runner::{ProcessRunner, ToolCommand};

#[async_trait]
pub trait Toolchain: Send + Sync {
    /// Install dependencies and build the site in `cwd`.
    async fn install_and_build(&self, cwd: &Path) -> Result<(), ToolError>;
}

/// Runs `<program> install` followed by `<program> run build`.
pub struct NpmToolchain {
    runner: Arc<dyn ProcessRunner>,
    program: String,
}

impl NpmToolchain {
    pub fn new(runner: Arc<dyn ProcessRunner>, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    async fn run_step(&self, args: &[&str], cwd: &Path) -> Result<(), ToolError> {
        let command = ToolCommand::new(self.program.as_str())
            .args(args)
            .current_dir(cwd);
        let output = self.runner.run(command.clone()).await?;

        for line in output.stdout.lines() {
            tracing::debug!(target: "toolchain", "{}", line);
        }
        if !output.success() {
            for line in output.stderr.lines() {
                tracing::warn!(target: "toolchain", "{}", line);
            }
        }

        output.check(&command)
    }
}

#[async_trait]
impl Toolchain for NpmToolchain {
    async fn install_and_build(&self, cwd: &Path) -> Result<(), ToolError> {
        self.run_step(&["install"], cwd).await?;
        self.run_step(&["run", "build"], cwd).await
    }
}
