//! External tools the pipeline drives
//!
//! The archive extractor, git and the npm toolchain all go through the
//! [`ProcessRunner`] trait, so each wrapper can be exercised against a
//! scripted runner instead of real processes.

pub mod archive;
pub mod error;
pub mod git;
pub mod runner;
pub mod toolchain;

#[cfg(test)]
pub mod scripted;

pub use archive::{ArchiveExtractor, UnzipExtractor};
pub use error::ToolError;
pub use git::{GitRunner, GitRunnerImpl};
pub use runner::{ProcessRunner, TokioProcessRunner, ToolCommand, ToolOutput};
pub use toolchain::{NpmToolchain, Toolchain};

use std::sync::Arc;

/// Hands out the tool wrappers, all sharing one runner
#[derive(Clone)]
pub struct SubprocessManager {
    runner: Arc<dyn ProcessRunner>,
}

impl SubprocessManager {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }

    pub fn production() -> Self {
        Self::new(Arc::new(TokioProcessRunner))
    }

    pub fn git(&self) -> GitRunnerImpl {
        GitRunnerImpl::new(Arc::clone(&self.runner))
    }

    pub fn archive(&self) -> UnzipExtractor {
        UnzipExtractor::new(Arc::clone(&self.runner))
    }

    pub fn toolchain(&self, program: &str) -> NpmToolchain {
        NpmToolchain::new(Arc::clone(&self.runner), program)
    }
}
