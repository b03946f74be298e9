//! Common test utilities and helpers
#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use tutorial_forge::subprocess::{ArchiveExtractor, GitRunner, Toolchain, ToolError};
use tutorial_forge::{ForgeConfig, Pipeline};

/// Builder for a site root holding one upload and the archive contents it
/// "extracts" to.
pub struct WorkspaceBuilder {
    temp_dir: TempDir,
    archive_name: String,
    archive_files: Vec<(PathBuf, String)>,
    root_files: Vec<(PathBuf, String)>,
}

impl WorkspaceBuilder {
    pub fn new(archive_name: &str) -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
            archive_name: archive_name.to_string(),
            archive_files: Vec::new(),
            root_files: Vec::new(),
        })
    }

    /// Add a file inside the uploaded archive
    pub fn with_archive_file(mut self, path: impl AsRef<Path>, content: &str) -> Self {
        self.archive_files
            .push((path.as_ref().to_path_buf(), content.to_string()));
        self
    }

    /// Add a file at the site root, outside the archive
    pub fn with_root_file(mut self, path: impl AsRef<Path>, content: &str) -> Self {
        self.root_files
            .push((path.as_ref().to_path_buf(), content.to_string()));
        self
    }

    /// A minimal valid tutorial: manifest plus descriptor
    pub fn with_minimal_tutorial(self, descriptor: &str) -> Self {
        self.with_archive_file("package.json", r#"{"name": "guide", "scripts": {"build": "astro build"}}"#)
            .with_archive_file("tutorial-config.json", descriptor)
    }

    pub fn build(self) -> Result<Workspace> {
        let root = self.temp_dir.path();
        let contents = root.join("archive-contents");
        fs::create_dir_all(&contents)?;
        for (rel, content) in &self.archive_files {
            write_file(&contents.join(rel), content)?;
        }
        for (rel, content) in &self.root_files {
            write_file(&root.join(rel), content)?;
        }

        let uploads = root.join("uploads");
        fs::create_dir_all(&uploads)?;
        let archive = uploads.join(&self.archive_name);
        fs::write(&archive, "PK\u{3}\u{4}")?;

        Ok(Workspace {
            temp_dir: self.temp_dir,
            archive,
            contents,
        })
    }
}

pub struct Workspace {
    temp_dir: TempDir,
    pub archive: PathBuf,
    pub contents: PathBuf,
}

impl Workspace {
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config(&self) -> ForgeConfig {
        let mut config = ForgeConfig::with_root(self.path());
        config.owner = "octo".to_string();
        config.repo = "academy".to_string();
        config
    }

    pub fn read(&self, rel: impl AsRef<Path>) -> String {
        let path = self.path().join(rel);
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read {}", path.display()))
    }

    pub fn read_json(&self, rel: impl AsRef<Path>) -> serde_json::Value {
        serde_json::from_str(&self.read(rel)).expect("valid JSON")
    }

    pub fn exists(&self, rel: impl AsRef<Path>) -> bool {
        self.path().join(rel).exists()
    }

    pub fn pipeline(&self, git: Arc<FakeGit>, toolchain: Arc<FakeToolchain>) -> Pipeline {
        Pipeline::new(
            self.config(),
            Arc::new(DirectoryExtractor::new(&self.contents)),
            git,
            toolchain,
        )
    }
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

fn copy_dir(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), target)?;
        }
    }
    Ok(())
}

/// Stands in for `unzip`: copies a prepared directory into the destination
pub struct DirectoryExtractor {
    contents: PathBuf,
    fail: bool,
}

impl DirectoryExtractor {
    pub fn new(contents: &Path) -> Self {
        Self {
            contents: contents.to_path_buf(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            contents: PathBuf::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl ArchiveExtractor for DirectoryExtractor {
    async fn extract(&self, _archive: &Path, dest: &Path) -> Result<(), ToolError> {
        if self.fail {
            return Err(ToolError::Failed {
                command: "unzip".to_string(),
                code: 9,
            });
        }
        copy_dir(&self.contents, dest)?;
        Ok(())
    }
}

/// Stands in for `git clone`
pub struct FakeGit {
    files: Vec<(String, String)>,
    fail: bool,
    pub clones: Mutex<Vec<(String, PathBuf)>>,
}

impl FakeGit {
    pub fn with_files(files: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            files: files
                .iter()
                .map(|(p, c)| (p.to_string(), c.to_string()))
                .collect(),
            fail: false,
            clones: Mutex::new(Vec::new()),
        })
    }

    pub fn unused() -> Arc<Self> {
        Self::with_files(&[])
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            files: Vec::new(),
            fail: true,
            clones: Mutex::new(Vec::new()),
        })
    }

    pub fn clone_count(&self) -> usize {
        self.clones.lock().unwrap().len()
    }
}

#[async_trait]
impl GitRunner for FakeGit {
    async fn clone_into(&self, url: &str, dest: &Path) -> Result<(), ToolError> {
        self.clones
            .lock()
            .unwrap()
            .push((url.to_string(), dest.to_path_buf()));
        if self.fail {
            return Err(ToolError::Failed {
                command: "git clone".to_string(),
                code: 128,
            });
        }
        for (rel, content) in &self.files {
            write_file(&dest.join(rel), content).map_err(|e| {
                ToolError::Io(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))
            })?;
        }
        Ok(())
    }
}

/// Stands in for `npm install && npm run build`
pub struct FakeToolchain {
    produce_dist: bool,
    fail: bool,
    pub builds: Mutex<usize>,
}

impl FakeToolchain {
    pub fn building() -> Arc<Self> {
        Arc::new(Self {
            produce_dist: true,
            fail: false,
            builds: Mutex::new(0),
        })
    }

    pub fn without_output() -> Arc<Self> {
        Arc::new(Self {
            produce_dist: false,
            fail: false,
            builds: Mutex::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            produce_dist: false,
            fail: true,
            builds: Mutex::new(0),
        })
    }
}

#[async_trait]
impl Toolchain for FakeToolchain {
    async fn install_and_build(&self, cwd: &Path) -> Result<(), ToolError> {
        *self.builds.lock().unwrap() += 1;
        if self.fail {
            return Err(ToolError::Failed {
                command: "npm install".to_string(),
                code: 1,
            });
        }
        if self.produce_dist {
            fs::create_dir_all(cwd.join("dist"))?;
            fs::write(cwd.join("dist/index.html"), "<h1>Step 1</h1>")?;
        }
        Ok(())
    }
}
