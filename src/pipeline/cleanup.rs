use super::context::StagingContext;
use crate::error::{ErrorExt, Result};

/// Delete the consumed archive. Only called once every artifact is written.
pub fn run(ctx: &StagingContext) -> Result<()> {
    match std::fs::remove_file(ctx.archive()) {
        Ok(()) => {
            tracing::info!("Cleanup complete, removed {}", ctx.archive().display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Archive {} was already removed", ctx.archive().display());
            Ok(())
        }
        Err(e) => Err(e).to_storage_error_at("Failed to remove archive", ctx.archive()),
    }
}
