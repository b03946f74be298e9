//! # tutorial-forge
//!
//! Turns an uploaded tutorial archive into a launchable cloud development
//! environment.
//!
//! ## Usage
//!
//! ```bash
//! tutorial-forge [-v] [--root <DIR>]
//! ```
//!
//! ## Modules
//!
//! - `cli` - Command-line arguments and log level mapping
//! - `config` - Directory layout and hosting identifiers
//! - `descriptor` - `tutorial-config.json` loading and validation
//! - `devcontainer` - `devcontainer.json` synthesis (startup chain, ports, visibility)
//! - `error` - Coded error type shared by every stage
//! - `fsutil` - Tree copy and move helpers
//! - `manifest` - `package.json` mutation
//! - `pipeline` - The staged upload-to-environment pipeline
//! - `readme` - README generation
//! - `subprocess` - Process abstraction for unzip, git and the build toolchain
pub mod cli;
pub mod config;
pub mod descriptor;
pub mod devcontainer;
pub mod error;
pub mod fsutil;
pub mod manifest;
pub mod pipeline;
pub mod readme;
pub mod subprocess;

pub use config::ForgeConfig;
pub use error::{ForgeError, Result};
pub use pipeline::{Pipeline, PipelineOutcome};
