use std::path::PathBuf;
use thiserror::Error;

pub mod codes;
pub mod helpers;

pub use codes::ErrorCode;
pub use helpers::{common, ErrorExt};

/// How the pipeline driver reacts to an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Abort the run, leave the archive in place
    Fatal,
    /// Log and continue with reduced capability
    Recoverable,
}

/// The unified error type for tutorial-forge
#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("[E{code:04}] Intake error: {message}")]
    Intake {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Ambiguous project structure: {message}")]
    Structure {
        code: u16,
        message: String,
        candidates: Vec<String>,
    },

    #[error("[E{code:04}] Storage error: {message}")]
    Storage {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] External operation failed: {message}")]
    External {
        code: u16,
        message: String,
        command: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Validation error: {message}")]
    Validation {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ForgeError {
    /// Create an intake error with specific code
    pub fn intake(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Intake {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create an ambiguous-root error listing the qualifying subdirectories
    pub fn ambiguous_root(root: &std::path::Path, candidates: Vec<String>) -> Self {
        let message = if candidates.is_empty() {
            format!(
                "no package.json at {} and no subdirectory contains one",
                root.display()
            )
        } else {
            format!(
                "no package.json at {} and {} subdirectories contain one: {}",
                root.display(),
                candidates.len(),
                candidates.join(", ")
            )
        };
        Self::Structure {
            code: ErrorCode::STRUCTURE_AMBIGUOUS_ROOT,
            message,
            candidates,
        }
    }

    /// Create a storage error with default code
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            code: ErrorCode::STORAGE_GENERIC,
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Create a storage error with specific code and path
    pub fn storage_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Storage {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create an external operation error
    pub fn external(code: u16, message: impl Into<String>, command: Option<String>) -> Self {
        Self::External {
            code,
            message: message.into(),
            command,
            source: None,
        }
    }

    /// Create a configuration error with specific code
    pub fn config_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create a validation error with specific code and path
    pub fn validation(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Validation {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Add a source error to this error
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::Intake { source: src, .. }
            | Self::Storage { source: src, .. }
            | Self::External { source: src, .. }
            | Self::Config { source: src, .. }
            | Self::Validation { source: src, .. } => {
                *src = Some(source.into());
            }
            Self::Structure { .. } => {}
        }
        self
    }

    /// Attach the path the error refers to
    pub fn with_path(mut self, new_path: impl Into<PathBuf>) -> Self {
        match &mut self {
            Self::Intake { path, .. }
            | Self::Storage { path, .. }
            | Self::Validation { path, .. } => {
                *path = Some(new_path.into());
            }
            Self::Structure { .. } | Self::External { .. } | Self::Config { .. } => {}
        }
        self
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Intake { code, .. }
            | Self::Structure { code, .. }
            | Self::Storage { code, .. }
            | Self::External { code, .. }
            | Self::Config { code, .. }
            | Self::Validation { code, .. } => *code,
        }
    }

    /// Only external operations (clone, build) are recovered from
    pub fn severity(&self) -> Severity {
        match self {
            Self::External { .. } => Severity::Recoverable,
            _ => Severity::Fatal,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }

    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Intake { .. } => 2,
            Self::Structure { .. } => 3,
            Self::Storage { .. } => 4,
            Self::External { .. } => 5,
            Self::Validation { .. } => 6,
            Self::Config { .. } => 7,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Intake { message, path, .. } => match path {
                Some(p) => format!("Cannot process archive {}: {}", p.display(), message),
                None => format!("Cannot process archive: {}", message),
            },
            Self::Structure { message, .. } => {
                format!("Cannot locate the project root: {}", message)
            }
            Self::Storage { message, path, .. } => match path {
                Some(p) => format!("Storage error at {}: {}", p.display(), message),
                None => format!("Storage error: {}", message),
            },
            Self::External {
                message, command, ..
            } => match command {
                Some(cmd) => format!("Command '{}' failed: {}", cmd, message),
                None => format!("External operation failed: {}", message),
            },
            Self::Config { message, .. } => format!("Configuration problem: {}", message),
            Self::Validation { message, path, .. } => match path {
                Some(p) => format!("Invalid project at {}: {}", p.display(), message),
                None => format!("Invalid project: {}", message),
            },
        }
    }
}

/// Type alias for Results using ForgeError
pub type Result<T> = std::result::Result<T, ForgeError>;

impl From<std::io::Error> for ForgeError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;

        let (code, message) = match err.kind() {
            ErrorKind::NotFound => (ErrorCode::STORAGE_NOT_FOUND, "File or directory not found"),
            ErrorKind::PermissionDenied => {
                (ErrorCode::STORAGE_PERMISSION_DENIED, "Permission denied")
            }
            _ => (ErrorCode::STORAGE_IO_ERROR, "IO operation failed"),
        };

        ForgeError::storage_with_code(code, message, None).with_source(err)
    }
}
