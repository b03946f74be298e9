use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::descriptor::TutorialDescriptor;

pub const PROJECT_DIR: &str = "project";

/// Snapshot of the tutorial being staged.
///
/// Stages take the context by value and hand back an updated copy, so a
/// stage that fails part-way never leaves half-applied flags behind.
#[derive(Debug, Clone, PartialEq)]
pub struct StagingContext {
    name: String,
    archive: PathBuf,
    root: PathBuf,
    descriptor: Arc<TutorialDescriptor>,
    has_external_app: bool,
    has_setup_script: bool,
    steps_built: bool,
}

impl StagingContext {
    pub fn new(name: impl Into<String>, archive: impl Into<PathBuf>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            archive: archive.into(),
            root: root.into(),
            descriptor: Arc::new(TutorialDescriptor::default()),
            has_external_app: false,
            has_setup_script: false,
            steps_built: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The uploaded archive this run consumes
    pub fn archive(&self) -> &Path {
        &self.archive
    }

    /// Canonical project root (`tutorials/<name>`)
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn project_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    /// Empty until the descriptor stage has run
    pub fn descriptor(&self) -> &TutorialDescriptor {
        &self.descriptor
    }

    pub fn has_external_app(&self) -> bool {
        self.has_external_app
    }

    pub fn has_setup_script(&self) -> bool {
        self.has_setup_script
    }

    pub fn steps_built(&self) -> bool {
        self.steps_built
    }

    pub fn with_descriptor(self, descriptor: Arc<TutorialDescriptor>) -> Self {
        Self { descriptor, ..self }
    }

    pub fn with_external_app(self, has_external_app: bool) -> Self {
        Self {
            has_external_app,
            ..self
        }
    }

    pub fn with_setup_script(self, has_setup_script: bool) -> Self {
        Self {
            has_setup_script,
            ..self
        }
    }

    pub fn with_steps_built(self, steps_built: bool) -> Self {
        Self {
            steps_built,
            ..self
        }
    }
}
