use anyhow::Context;
use clap::Parser;
use tracing::{debug, error, info, trace};
use tracing_subscriber::EnvFilter;

use tutorial_forge::cli::{get_log_level, Cli};
use tutorial_forge::{ForgeConfig, ForgeError, Pipeline, PipelineOutcome};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(get_log_level(cli.verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(cli.verbose >= 2)
        .with_thread_ids(cli.verbose >= 3)
        .with_line_number(cli.verbose >= 3)
        .init();

    debug!("tutorial-forge started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(cli).await {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {e:#}");
        let code = match e.downcast_ref::<ForgeError>() {
            Some(forge_err) => {
                eprintln!("{}", forge_err.user_message());
                forge_err.exit_code()
            }
            None => 1,
        };
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let root = std::fs::canonicalize(&cli.root)
        .with_context(|| format!("Root directory {} is not accessible", cli.root.display()))?;
    let config = ForgeConfig::load(&root)?;
    debug!("Resolved configuration: {:?}", config);

    match Pipeline::production(config).run().await? {
        PipelineOutcome::NothingToProcess => info!("Nothing to process"),
        PipelineOutcome::Completed(summary) => {
            info!(
                "Tutorial '{}' ready (external app: {}, setup script: {}, steps built: {})",
                summary.name, summary.has_external_app, summary.has_setup_script, summary.steps_built
            );
            info!("Environment descriptor: {}", summary.devcontainer.display());
        }
    }
    Ok(())
}
