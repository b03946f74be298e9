//! External repository merge into `project/`

use std::path::Path;

use super::context::StagingContext;
use crate::error::{ErrorCode, ErrorExt, ForgeError, Result};
use crate::fsutil::{self, CopyReport, ExistingFile};
use crate::subprocess::GitRunner;

/// Ensure `project/` exists, then merge the configured repository into it.
///
/// Clone and copy failures come back as recoverable errors; the driver keeps
/// the prior context so `has_external_app` stays false.
pub async fn run(ctx: StagingContext, git: &dyn GitRunner) -> Result<StagingContext> {
    let project_dir = ctx.project_dir();
    std::fs::create_dir_all(&project_dir)
        .to_storage_error_at("Failed to create project directory", &project_dir)?;

    let Some(url) = ctx.descriptor().repository().map(str::to_owned) else {
        tracing::debug!("No external repository configured");
        return Ok(ctx);
    };

    tracing::info!("Cloning external source: {}", url);
    let report = merge_repository(&url, &project_dir, git).await?;
    tracing::info!(
        "External code merged into {} ({} copied, {} kept from archive)",
        project_dir.display(),
        report.copied,
        report.skipped
    );
    Ok(ctx.with_external_app(true))
}

async fn merge_repository(url: &str, project_dir: &Path, git: &dyn GitRunner) -> Result<CopyReport> {
    // dropped on every return path below
    let staging = tempfile::Builder::new()
        .prefix("tutorial-forge-clone-")
        .tempdir()
        .map_err(|e| merge_failed("Failed to create clone staging area").with_source(e))?;

    git.clone_into(url, staging.path()).await.map_err(|e| {
        ForgeError::external(
            ErrorCode::EXTERNAL_CLONE_FAILED,
            format!("Failed to clone {url}"),
            Some(format!("git clone {url} .")),
        )
        .with_source(e)
    })?;

    fsutil::remove_path(&staging.path().join(".git"))
        .map_err(|e| merge_failed("Failed to strip version control metadata").with_source(e))?;

    fsutil::copy_tree(staging.path(), project_dir, ExistingFile::Keep)
        .map_err(|e| merge_failed("Failed to copy cloned files into project").with_source(e))
}

fn merge_failed(message: &str) -> ForgeError {
    ForgeError::external(ErrorCode::EXTERNAL_MERGE_FAILED, message, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::TutorialDescriptor;
    use crate::subprocess::ToolError;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Writes a fixed set of files into the clone destination
    struct FakeGit {
        files: Vec<(&'static str, &'static str)>,
        fail: bool,
        seen_dest: Mutex<Option<PathBuf>>,
    }

    #[async_trait]
    impl GitRunner for FakeGit {
        async fn clone_into(&self, _url: &str, dest: &Path) -> std::result::Result<(), ToolError> {
            *self.seen_dest.lock().unwrap() = Some(dest.to_path_buf());
            if self.fail {
                return Err(ToolError::Failed {
                    command: "git clone".to_string(),
                    code: 128,
                });
            }
            for (rel, content) in &self.files {
                let path = dest.join(rel);
                std::fs::create_dir_all(path.parent().unwrap()).unwrap();
                std::fs::write(path, content).unwrap();
            }
            Ok(())
        }
    }

    fn context(root: &Path, repository: Option<&str>) -> StagingContext {
        let descriptor = TutorialDescriptor {
            repository: repository.map(str::to_string),
            ..Default::default()
        };
        StagingContext::new("t", root.join("t.zip"), root).with_descriptor(Arc::new(descriptor))
    }

    #[tokio::test]
    async fn test_no_repository_only_creates_project_dir() {
        let temp = TempDir::new().unwrap();
        let git = FakeGit {
            files: vec![],
            fail: false,
            seen_dest: Mutex::new(None),
        };

        let ctx = run(context(temp.path(), None), &git).await.unwrap();

        assert!(temp.path().join("project").is_dir());
        assert!(!ctx.has_external_app());
        assert!(git.seen_dest.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_merge_never_overwrites_archive_files() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("project")).unwrap();
        std::fs::write(temp.path().join("project/index.js"), "authored").unwrap();

        let git = FakeGit {
            files: vec![
                ("index.js", "cloned"),
                ("package.json", "{}"),
                (".git/HEAD", "ref: refs/heads/main"),
            ],
            fail: false,
            seen_dest: Mutex::new(None),
        };

        let ctx = run(
            context(temp.path(), Some("https://example.com/app.git")),
            &git,
        )
        .await
        .unwrap();

        assert!(ctx.has_external_app());
        let project = temp.path().join("project");
        assert_eq!(
            std::fs::read_to_string(project.join("index.js")).unwrap(),
            "authored"
        );
        assert!(project.join("package.json").exists());
        assert!(!project.join(".git").exists());

        let staging = git.seen_dest.lock().unwrap().clone().unwrap();
        assert!(!staging.exists(), "clone staging area must be removed");
    }

    #[tokio::test]
    async fn test_clone_failure_is_recoverable_and_cleans_up() {
        let temp = TempDir::new().unwrap();
        let git = FakeGit {
            files: vec![],
            fail: true,
            seen_dest: Mutex::new(None),
        };

        let err = run(
            context(temp.path(), Some("https://example.com/missing.git")),
            &git,
        )
        .await
        .unwrap_err();

        assert_eq!(err.code(), ErrorCode::EXTERNAL_CLONE_FAILED);
        assert!(!err.is_fatal());
        assert!(temp.path().join("project").is_dir());
        let staging = git.seen_dest.lock().unwrap().clone().unwrap();
        assert!(!staging.exists());
    }
}
