//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::config_initialization::ConfigOverrides;

/// Arguments for the stitch command
#[derive(Args, Debug)]
pub struct StitchArgs {
    /// Interval start (YYYY-MM-DD HH:MM:SS); prompted for when omitted
    #[arg(short, long)]
    pub start: Option<String>,

    /// Interval end (YYYY-MM-DD HH:MM:SS); prompted for when omitted
    #[arg(short, long)]
    pub end: Option<String>,

    /// Directory holding the clips
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Output file path (default: final_output_no_audio.avi)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for trimmed segments and the concat list
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// Keep trimmed segments after concatenation
    #[arg(long)]
    pub keep_scratch: bool,

    /// Skip probing the output after concatenation
    #[arg(long)]
    pub no_verify: bool,

    /// Output the run report in JSON format
    #[arg(long)]
    pub json: bool,
}

impl StitchArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            clips_dir: self.dir.clone(),
            output: self.output.clone(),
            work_dir: self.work_dir.clone(),
            keep_scratch: self.keep_scratch.then_some(true),
            verify_output: self.no_verify.then_some(false),
            ..Default::default()
        }
    }
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Interval start (YYYY-MM-DD HH:MM:SS)
    #[arg(short, long)]
    pub start: String,

    /// Interval end (YYYY-MM-DD HH:MM:SS)
    #[arg(short, long)]
    pub end: String,

    /// Directory holding the clips
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Output the plan in JSON format
    #[arg(long)]
    pub json: bool,
}

impl PlanArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            clips_dir: self.dir.clone(),
            ..Default::default()
        }
    }
}

/// Arguments for the catalog command
#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Directory holding the clips
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

impl CatalogArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            clips_dir: self.dir.clone(),
            ..Default::default()
        }
    }
}
