//! StitchX clip stitcher
//!
//! # Usage
//!
//! ```bash
//! stitcher stitch --dir ./clips --start "2024-10-31 08:05:00" --end "2024-10-31 08:20:00"
//! stitcher plan --dir ./clips --start "2024-10-31 08:05:00" --end "2024-10-31 08:20:00" --json
//! stitcher catalog --dir ./clips
//! ```

use anyhow::Result;
use clap::Parser;

use stitchx_cli::cli::{commands, Cli};

/// Main entry point for the StitchX CLI application
fn main() -> Result<()> {
    let cli = Cli::parse();
    commands::run(cli)
}
