/// Why an external tool could not do its job
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("`{0}` is not installed or not on PATH")]
    NotInstalled(String),

    #[error("`{command}` exited with code {code}")]
    Failed { command: String, code: i32 },

    #[error("`{0}` was terminated without an exit code")]
    Terminated(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ToolError {
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ToolError::Failed { code, .. } => Some(*code),
            _ => None,
        }
    }
}
