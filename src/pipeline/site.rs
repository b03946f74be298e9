//! Static site build and `dist/` to `steps/` relocation

use super::context::StagingContext;
use crate::error::{ErrorCode, ForgeError, Result};
use crate::fsutil;
use crate::subprocess::Toolchain;

pub const BUILD_OUTPUT_DIR: &str = "dist";
pub const STEPS_DIR: &str = "steps";

pub async fn run(ctx: StagingContext, toolchain: &dyn Toolchain) -> Result<StagingContext> {
    tracing::info!("Building tutorial site in {}", ctx.root().display());
    toolchain.install_and_build(ctx.root()).await.map_err(|e| {
        ForgeError::external(
            ErrorCode::EXTERNAL_BUILD_FAILED,
            "Site build failed",
            Some("npm install && npm run build".to_string()),
        )
        .with_source(e)
    })?;

    let dist = ctx.root().join(BUILD_OUTPUT_DIR);
    if !dist.is_dir() {
        tracing::warn!("Build finished but '{}' was not found", BUILD_OUTPUT_DIR);
        return Ok(ctx);
    }

    let steps = ctx.root().join(STEPS_DIR);
    fsutil::move_replacing(&dist, &steps).map_err(|e| {
        ForgeError::external(
            ErrorCode::EXTERNAL_BUILD_FAILED,
            format!("Failed to move {BUILD_OUTPUT_DIR} to {STEPS_DIR}"),
            None,
        )
        .with_source(e)
    })?;
    tracing::info!("Build successful, output moved to {}", steps.display());

    Ok(ctx.with_steps_built(true))
}
