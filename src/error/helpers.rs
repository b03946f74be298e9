use super::{ErrorCode, ForgeError};
use std::path::Path;

/// Extension trait for convenient error conversion
pub trait ErrorExt<T> {
    /// Convert to a storage error with context
    fn to_storage_error(self, message: impl Into<String>) -> Result<T, ForgeError>;

    /// Convert to a storage error that records the offending path
    fn to_storage_error_at(
        self,
        message: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<T, ForgeError>;
}

impl<T, E> ErrorExt<T> for Result<T, E>
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    fn to_storage_error(self, message: impl Into<String>) -> Result<T, ForgeError> {
        self.map_err(|e| ForgeError::storage(message).with_source(e))
    }

    fn to_storage_error_at(
        self,
        message: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<T, ForgeError> {
        self.map_err(|e| {
            ForgeError::storage_with_code(
                ErrorCode::STORAGE_IO_ERROR,
                message,
                Some(path.as_ref().to_path_buf()),
            )
            .with_source(e)
        })
    }
}

/// Helper functions for common error scenarios
pub mod common {
    use super::*;

    /// No package.json at the canonical root
    pub fn missing_manifest(root: impl AsRef<Path>) -> ForgeError {
        ForgeError::validation(
            ErrorCode::VALIDATION_MISSING_MANIFEST,
            "package.json not found. Is this a valid Node.js project?",
            Some(root.as_ref().to_path_buf()),
        )
    }

    /// package.json is not an object, or one of its mappings is not an object
    pub fn invalid_manifest(path: impl AsRef<Path>, reason: impl Into<String>) -> ForgeError {
        ForgeError::validation(
            ErrorCode::VALIDATION_INVALID_MANIFEST,
            reason,
            Some(path.as_ref().to_path_buf()),
        )
    }

    /// tutorial-config.json is absent
    pub fn missing_descriptor(path: impl AsRef<Path>) -> ForgeError {
        ForgeError::validation(
            ErrorCode::VALIDATION_MISSING_DESCRIPTOR,
            "tutorial-config.json not found in archive root",
            Some(path.as_ref().to_path_buf()),
        )
    }

    /// tutorial-config.json could not be parsed or failed validation
    pub fn invalid_descriptor(path: impl AsRef<Path>, reason: impl Into<String>) -> ForgeError {
        ForgeError::validation(
            ErrorCode::VALIDATION_INVALID_DESCRIPTOR,
            reason,
            Some(path.as_ref().to_path_buf()),
        )
    }

    /// The archive could not be unpacked
    pub fn extraction_failed(archive: impl AsRef<Path>, reason: impl Into<String>) -> ForgeError {
        ForgeError::intake(
            ErrorCode::INTAKE_EXTRACTION_FAILED,
            reason,
            Some(archive.as_ref().to_path_buf()),
        )
    }
}
