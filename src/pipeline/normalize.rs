//! Extraction and canonical root resolution

use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::context::StagingContext;
use crate::error::{common, ErrorExt, ForgeError, Result};
use crate::fsutil;
use crate::manifest::MANIFEST_FILE;
use crate::subprocess::ArchiveExtractor;

/// Archive tooling metadata, never a project root
pub const METADATA_DIRS: &[&str] = &["__MACOSX"];

/// Recreate the target directory, extract into it and resolve the root.
pub async fn run(ctx: StagingContext, extractor: &dyn ArchiveExtractor) -> Result<StagingContext> {
    let target = ctx.root();
    fsutil::remove_path(target).to_storage_error_at("Failed to clear target directory", target)?;
    std::fs::create_dir_all(target)
        .to_storage_error_at("Failed to create target directory", target)?;

    extractor
        .extract(ctx.archive(), target)
        .await
        .map_err(|e| common::extraction_failed(ctx.archive(), e.to_string()).with_source(e))?;
    tracing::info!("Extracted {} into {}", ctx.archive().display(), target.display());

    resolve_root(target)?;
    Ok(ctx)
}

/// Make `target` the canonical root, flattening a single nested project.
pub fn resolve_root(target: &Path) -> Result<PathBuf> {
    if target.join(MANIFEST_FILE).is_file() {
        return Ok(target.to_path_buf());
    }

    tracing::info!("{MANIFEST_FILE} not found at root, checking for a nested directory");
    let candidates = nested_candidates(target)?;
    let nested = match candidates.as_slice() {
        [only] => target.join(only),
        _ => return Err(ForgeError::ambiguous_root(target, candidates)),
    };

    tracing::info!("Found nested root in '{}', flattening", nested.display());
    flatten(&nested, target)?;

    if !target.join(MANIFEST_FILE).is_file() {
        return Err(common::missing_manifest(target));
    }
    Ok(target.to_path_buf())
}

fn nested_candidates(target: &Path) -> Result<Vec<String>> {
    let mut candidates = Vec::new();
    let entries =
        std::fs::read_dir(target).to_storage_error_at("Failed to list extracted files", target)?;

    for entry in entries {
        let entry = entry.to_storage_error_at("Failed to list extracted files", target)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if METADATA_DIRS.contains(&name.as_str()) {
            continue;
        }
        let path = entry.path();
        if path.is_dir() && path.join(MANIFEST_FILE).is_file() {
            candidates.push(name);
        }
    }
    candidates.sort();
    Ok(candidates)
}

fn flatten(nested: &Path, target: &Path) -> Result<()> {
    // a child named like its parent would otherwise collide on the way up
    let scratch = target.join(format!(".flatten-{}", Uuid::new_v4()));
    std::fs::rename(nested, &scratch).to_storage_error_at("Failed to stage nested root", nested)?;

    // merge into the root: same-named directories combine, colliding files are replaced
    let report = fsutil::copy_tree(&scratch, target, fsutil::ExistingFile::Replace)
        .to_storage_error_at("Failed to flatten nested root", &scratch)?;
    fsutil::remove_path(&scratch).to_storage_error_at("Failed to remove nested root", &scratch)?;

    tracing::debug!("Copied {} files up into {}", report.copied, target.display());
    Ok(())
}
