use super::context::StagingContext;
use crate::error::{ErrorExt, Result};
use crate::fsutil;

/// Checked in order; the first one found wins
pub const SETUP_SCRIPT_NAMES: &[&str] = &["setup-tutorial.js", "setup-project.js"];
pub const SETUP_SCRIPT_TARGET: &str = "setup-project.js";

/// Move an interactive setup script from the root into `project/`.
pub fn run(ctx: StagingContext) -> Result<StagingContext> {
    let Some(found) = SETUP_SCRIPT_NAMES
        .iter()
        .map(|name| ctx.root().join(name))
        .find(|path| path.is_file())
    else {
        return Ok(ctx.with_setup_script(false));
    };

    let dest = ctx.project_dir().join(SETUP_SCRIPT_TARGET);
    fsutil::move_replacing(&found, &dest)
        .to_storage_error_at("Failed to relocate setup script", &found)?;
    tracing::info!("Moved {} -> project/{}", found.display(), SETUP_SCRIPT_TARGET);

    Ok(ctx.with_setup_script(true))
}
