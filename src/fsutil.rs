//! Filesystem helpers shared by the pipeline stages

use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// What to do when a destination file already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistingFile {
    Keep,
    Replace,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CopyReport {
    pub copied: usize,
    pub skipped: usize,
}

/// Copy every entry under `src` into `dst`, creating directories as needed.
/// Symbolic links are recreated as links, not followed.
pub fn copy_tree(src: &Path, dst: &Path, existing: ExistingFile) -> io::Result<CopyReport> {
    let mut report = CopyReport::default();
    fs::create_dir_all(dst)?;

    for entry in WalkDir::new(src).min_depth(1).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let target = dst.join(rel);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            if existing == ExistingFile::Replace
                && fs::symlink_metadata(&target).is_ok_and(|m| !m.is_dir())
            {
                remove_path(&target)?;
            }
            fs::create_dir_all(&target)?;
            continue;
        }

        // symlink_metadata so a dangling link at the target still counts
        if fs::symlink_metadata(&target).is_ok() {
            match existing {
                ExistingFile::Keep => {
                    tracing::trace!("Keeping existing {}", target.display());
                    report.skipped += 1;
                    continue;
                }
                ExistingFile::Replace => remove_path(&target)?,
            }
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
        report.copied += 1;
    }

    Ok(report)
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    let link_target = fs::read_link(src)?;
    std::os::unix::fs::symlink(link_target, dst)
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    fs::copy(src, dst).map(|_| ())
}

/// Remove a file, symlink or directory tree. Missing paths are fine.
pub fn remove_path(path: &Path) -> io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Move `src` to `dst`, replacing whatever is at `dst`.
pub fn move_replacing(src: &Path, dst: &Path) -> io::Result<()> {
    remove_path(dst)?;
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }

    if let Err(e) = fs::rename(src, dst) {
        // rename cannot cross filesystems
        tracing::debug!(
            "rename {} -> {} failed ({}), copying instead",
            src.display(),
            dst.display(),
            e
        );
        if fs::symlink_metadata(src)?.is_dir() {
            copy_tree(src, dst, ExistingFile::Replace)?;
        } else {
            fs::copy(src, dst)?;
        }
        remove_path(src)?;
    }
    Ok(())
}
