use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use super::error::ToolError;
use super::runner::{ProcessRunner, ToolCommand};

#[async_trait]
pub trait ArchiveExtractor: Send + Sync {
    /// Unpack `archive` into `dest`, overwriting anything already there.
    async fn extract(&self, archive: &Path, dest: &Path) -> Result<(), ToolError>;
}

/// Extracts zip archives with the `unzip` executable.
pub struct UnzipExtractor {
    runner: Arc<dyn ProcessRunner>,
}

impl UnzipExtractor {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl ArchiveExtractor for UnzipExtractor {
    async fn extract(&self, archive: &Path, dest: &Path) -> Result<(), ToolError> {
        let archive = archive.to_string_lossy();
        let dest = dest.to_string_lossy();
        let command = ToolCommand::new("unzip").args(["-q", "-o", &*archive, "-d", &*dest]);
        let output = self.runner.run(command.clone()).await?;

        // unzip exits 1 when it only emitted warnings
        if output.code == Some(1) {
            tracing::warn!("unzip reported warnings: {}", output.stderr.trim_end());
            return Ok(());
        }

        if !output.success() && !output.stderr.is_empty() {
            tracing::error!("unzip: {}", output.stderr.trim_end());
        }

        output.check(&command)
    }
}
