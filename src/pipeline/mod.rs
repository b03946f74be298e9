//! Upload-to-environment pipeline
//!
//! Stages run strictly in order, each taking the [`StagingContext`] by value
//! and returning the next one:
//!
//! 1. intake: pick the archive and derive the tutorial name
//! 2. normalize: extract and resolve the canonical root (fatal gate)
//! 3. descriptor: load `tutorial-config.json` (fatal gate)
//! 4. merge: clone the external repository into `project/` (recoverable)
//! 5. setup: relocate the interactive setup script
//! 6. package: configure `package.json`
//! 7. site: build the guide and move `dist/` to `steps/` (recoverable)
//! 8. placeholders: create declared files
//! 9. emit: write `devcontainer.json` and `README.md`
//! 10. cleanup: delete the archive

pub mod cleanup;
pub mod context;
pub mod emit;
pub mod intake;
pub mod merge;
pub mod normalize;
pub mod package;
pub mod placeholders;
pub mod setup;
pub mod site;

pub use context::StagingContext;
pub use intake::{locate_archive, sanitize_name, ArchiveCandidate};

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ForgeConfig;
use crate::descriptor::TutorialDescriptor;
use crate::error::Result;
use crate::subprocess::{ArchiveExtractor, GitRunner, SubprocessManager, Toolchain};

/// Result of one invocation
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    NothingToProcess,
    Completed(TutorialSummary),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorialSummary {
    pub name: String,
    pub root: PathBuf,
    pub devcontainer: PathBuf,
    pub readme: PathBuf,
    pub has_external_app: bool,
    pub has_setup_script: bool,
    pub steps_built: bool,
}

pub struct Pipeline {
    config: ForgeConfig,
    extractor: Arc<dyn ArchiveExtractor>,
    git: Arc<dyn GitRunner>,
    toolchain: Arc<dyn Toolchain>,
}

impl Pipeline {
    pub fn new(
        config: ForgeConfig,
        extractor: Arc<dyn ArchiveExtractor>,
        git: Arc<dyn GitRunner>,
        toolchain: Arc<dyn Toolchain>,
    ) -> Self {
        Self {
            config,
            extractor,
            git,
            toolchain,
        }
    }

    /// Collaborators backed by `unzip`, `git` and the configured toolchain
    pub fn production(config: ForgeConfig) -> Self {
        let subprocess = SubprocessManager::production();
        let toolchain = subprocess.toolchain(&config.toolchain);
        Self::new(
            config,
            Arc::new(subprocess.archive()),
            Arc::new(subprocess.git()),
            Arc::new(toolchain),
        )
    }

    pub fn config(&self) -> &ForgeConfig {
        &self.config
    }

    pub async fn run(&self) -> Result<PipelineOutcome> {
        let Some(archive) = locate_archive(&self.config.uploads_dir)? else {
            return Ok(PipelineOutcome::NothingToProcess);
        };
        tracing::info!("Processing tutorial: {}", archive.name);

        let root = self.config.tutorials_dir.join(&archive.name);
        let ctx = StagingContext::new(&archive.name, &archive.path, root);

        let ctx = normalize::run(ctx, self.extractor.as_ref()).await?;

        let descriptor: Arc<TutorialDescriptor> = TutorialDescriptor::load(ctx.root())?;
        let ctx = ctx.with_descriptor(descriptor);

        let ctx = recover("merge", ctx.clone(), merge::run(ctx, self.git.as_ref())).await?;
        let ctx = setup::run(ctx)?;
        let ctx = package::run(ctx)?;
        let ctx = recover("site build", ctx.clone(), site::run(ctx, self.toolchain.as_ref())).await?;
        let ctx = placeholders::run(ctx)?;

        let devcontainer = emit::write_environment(&ctx, &self.config)?;
        let readme = emit::write_readme(&ctx, &self.config)?;

        cleanup::run(&ctx)?;

        Ok(PipelineOutcome::Completed(TutorialSummary {
            name: ctx.name().to_string(),
            root: ctx.root().to_path_buf(),
            devcontainer,
            readme,
            has_external_app: ctx.has_external_app(),
            has_setup_script: ctx.has_setup_script(),
            steps_built: ctx.steps_built(),
        }))
    }
}

/// Await a stage; on a recoverable error log it and fall back to `prior`.
async fn recover<F>(stage: &str, prior: StagingContext, fut: F) -> Result<StagingContext>
where
    F: Future<Output = Result<StagingContext>>,
{
    match fut.await {
        Ok(next) => Ok(next),
        Err(e) if !e.is_fatal() => {
            tracing::warn!("{} failed, continuing without it: {}", stage, e);
            Ok(prior)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, ForgeError};

    fn ctx() -> StagingContext {
        StagingContext::new("t", "/up/t.zip", "/t")
    }

    #[tokio::test]
    async fn test_recover_keeps_prior_on_recoverable_error() {
        let prior = ctx();
        let result = recover("merge", prior.clone(), async {
            Err(ForgeError::external(
                ErrorCode::EXTERNAL_CLONE_FAILED,
                "offline",
                None,
            ))
        })
        .await
        .unwrap();
        assert_eq!(result, prior);
    }

    #[tokio::test]
    async fn test_recover_propagates_fatal_error() {
        let err = recover("merge", ctx(), async {
            Err(ForgeError::storage("disk full"))
        })
        .await
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::STORAGE_GENERIC);
    }

    #[tokio::test]
    async fn test_recover_passes_success_through() {
        let result = recover("site build", ctx(), async {
            Ok(ctx().with_steps_built(true))
        })
        .await
        .unwrap();
        assert!(result.steps_built());
    }

    #[tokio::test]
    async fn test_empty_uploads_is_nothing_to_process() {
        let temp = tempfile::TempDir::new().unwrap();
        let pipeline = Pipeline::production(ForgeConfig::with_root(temp.path()));
        assert_eq!(pipeline.run().await.unwrap(), PipelineOutcome::NothingToProcess);
    }
}
