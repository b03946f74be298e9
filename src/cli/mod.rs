//! CLI argument parsing and logging setup

pub mod args;
pub mod verbosity;

pub use args::Cli;
pub use verbosity::get_log_level;
