use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;

use super::error::ToolError;

/// One invocation of an external tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub cwd: Option<PathBuf>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
            cwd: None,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    /// Command line for logs and error messages
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn exited(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Default::default()
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn check(&self, command: &ToolCommand) -> Result<(), ToolError> {
        match self.code {
            Some(0) => Ok(()),
            Some(code) => Err(ToolError::Failed {
                command: command.display(),
                code,
            }),
            None => Err(ToolError::Terminated(command.display())),
        }
    }
}

#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `command` to completion and capture its output.
    async fn run(&self, command: ToolCommand) -> Result<ToolOutput, ToolError>;
}

/// Spawns real processes with `tokio::process`.
pub struct TokioProcessRunner;

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, command: ToolCommand) -> Result<ToolOutput, ToolError> {
        tracing::debug!("Running: {}", command.display());
        let start = Instant::now();

        let mut cmd = tokio::process::Command::new(&command.program);
        cmd.args(&command.args)
            .envs(&command.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &command.cwd {
            cmd.current_dir(dir);
        }

        let output = cmd.output().await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ToolError::NotInstalled(command.program.clone()),
            _ => ToolError::Io(e),
        })?;

        let result = ToolOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        tracing::debug!(
            "{} finished with {:?} in {:?}",
            command.program,
            result.code,
            start.elapsed()
        );
        Ok(result)
    }
}
