//! Output artifacts: `devcontainer.json` and `README.md`

use std::path::PathBuf;

use super::context::StagingContext;
use crate::config::ForgeConfig;
use crate::devcontainer::{build_descriptor, ProjectFlags};
use crate::error::Result;
use crate::readme::ReadmeRenderer;

pub fn write_environment(ctx: &StagingContext, config: &ForgeConfig) -> Result<PathBuf> {
    let descriptor = build_descriptor(
        ctx.name(),
        &config.repo,
        ctx.descriptor(),
        ProjectFlags {
            has_external_app: ctx.has_external_app(),
            has_setup_script: ctx.has_setup_script(),
        },
    );
    let path = descriptor.write_to(&config.devcontainer_dir.join(ctx.name()))?;
    tracing::info!("Generated devcontainer configuration at {}", path.display());
    Ok(path)
}

pub fn write_readme(ctx: &StagingContext, config: &ForgeConfig) -> Result<PathBuf> {
    let path = ReadmeRenderer::new()?.write(ctx.root(), ctx.name(), &config.owner, &config.repo)?;
    tracing::info!("Generated {}", path.display());
    Ok(path)
}
