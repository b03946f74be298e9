use super::context::StagingContext;
use crate::error::{ErrorExt, Result};

const PLACEHOLDER_CONTENT: &str = "\n";

/// Create an empty-line file for every declared file that does not exist.
pub fn run(ctx: StagingContext) -> Result<StagingContext> {
    for file in &ctx.descriptor().files {
        let path = ctx.root().join(file);
        if std::fs::symlink_metadata(&path).is_ok() {
            continue;
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .to_storage_error_at("Failed to create placeholder directory", parent)?;
        }
        std::fs::write(&path, PLACEHOLDER_CONTENT)
            .to_storage_error_at("Failed to create placeholder", &path)?;
        tracing::info!("Created placeholder: {}", file);
    }
    Ok(ctx)
}
