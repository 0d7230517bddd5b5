//! CLI module for StitchX
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config_initialization::ConfigOverrides;

pub mod args;
pub mod commands;

/// StitchX clip stitcher
///
/// Cuts a wall-clock interval out of a directory of timestamped clips and
/// joins the pieces into one video-only file without re-encoding.
#[derive(Parser)]
#[command(name = "stitcher")]
#[command(about = "StitchX - Stitch timestamped clips into one video")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (default: stitchx.toml if present)
    #[arg(long, global = true, env = "STITCHX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format (pretty, compact, json)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Configuration layer given on the command line
    pub fn overrides(&self) -> ConfigOverrides {
        let command = match &self.command {
            Commands::Stitch(args) => args.overrides(),
            Commands::Plan(args) => args.overrides(),
            Commands::Catalog(args) => args.overrides(),
        };

        ConfigOverrides {
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
            ..command
        }
    }
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Stitch the clips covering an interval into one file
    Stitch(args::StitchArgs),
    /// Show how an interval would be stitched without running the encoder
    Plan(args::PlanArgs),
    /// List the clips found in a directory
    Catalog(args::CatalogArgs),
}
