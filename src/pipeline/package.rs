use super::context::StagingContext;
use crate::error::Result;
use crate::manifest::{ManifestDocument, ManifestInputs, MANIFEST_FILE};

/// Add the guide-server dependencies and scripts to the root manifest.
pub fn run(ctx: StagingContext) -> Result<StagingContext> {
    let Some(mut manifest) = ManifestDocument::load(ctx.root())? else {
        tracing::warn!(
            "{} disappeared from {}, skipping manifest configuration",
            MANIFEST_FILE,
            ctx.root().display()
        );
        return Ok(ctx);
    };

    manifest.apply(ManifestInputs {
        wants_browser: ctx.descriptor().requests_browser(),
        has_external_app: ctx.has_external_app(),
    })?;
    manifest.save()?;
    tracing::info!("Configured {}", manifest.path().display());

    Ok(ctx)
}
