use clap::Parser;
use std::path::PathBuf;

/// Turn an uploaded tutorial archive into a ready-to-launch dev environment
#[derive(Parser, Debug)]
#[command(name = "tutorial-forge")]
#[command(
    about = "tutorial-forge - Turn an uploaded tutorial archive into a ready-to-launch dev environment",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv to trace tutorial-forge, -vvv to trace everything)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Base directory containing uploads/, tutorials/ and .devcontainer/
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,
}
