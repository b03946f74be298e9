//! Archive discovery in the uploads directory

use std::path::{Path, PathBuf};

use crate::error::{ErrorCode, ErrorExt, ForgeError, Result};

const ARCHIVE_SUFFIX: &str = ".zip";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveCandidate {
    pub path: PathBuf,
    /// Sanitized tutorial name derived from the file name
    pub name: String,
}

/// Strip the `.zip` suffix and every character outside `[A-Za-z0-9_-]`.
pub fn sanitize_name(file_name: &str) -> String {
    file_name
        .strip_suffix(ARCHIVE_SUFFIX)
        .unwrap_or(file_name)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// Pick the first archive by file name, or `None` when there is nothing to do.
pub fn locate_archive(uploads_dir: &Path) -> Result<Option<ArchiveCandidate>> {
    if !uploads_dir.is_dir() {
        tracing::info!("No uploads directory at {}", uploads_dir.display());
        return Ok(None);
    }

    let mut archives: Vec<String> = Vec::new();
    let entries = std::fs::read_dir(uploads_dir)
        .to_storage_error_at("Failed to list uploads directory", uploads_dir)?;
    for entry in entries {
        let entry = entry.to_storage_error_at("Failed to list uploads directory", uploads_dir)?;
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if is_file && file_name.ends_with(ARCHIVE_SUFFIX) {
            archives.push(file_name);
        }
    }
    archives.sort();

    let Some(file_name) = archives.first() else {
        tracing::info!("No zip file found in {}", uploads_dir.display());
        return Ok(None);
    };
    if archives.len() > 1 {
        tracing::info!(
            "{} archives waiting, processing {} first",
            archives.len(),
            file_name
        );
    }

    let path = uploads_dir.join(file_name);
    let name = sanitize_name(file_name);
    if name.is_empty() {
        return Err(ForgeError::intake(
            ErrorCode::INTAKE_INVALID_ARCHIVE_NAME,
            format!("'{file_name}' leaves an empty tutorial name after sanitization"),
            Some(path),
        ));
    }

    Ok(Some(ArchiveCandidate { path, name }))
}
