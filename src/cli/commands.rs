//! Command implementations

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::app::{AppContainer, DefaultAppContainer, StitchRequest};
use crate::catalog::CatalogResult;
use crate::cli::args::{CatalogArgs, PlanArgs, StitchArgs};
use crate::cli::{Cli, Commands};
use crate::config_initialization::initialize_configuration_hierarchy;
use crate::output::RunReport;
use crate::utils::logging::LoggingSystem;
use crate::utils::time::TimeParser;
use crate::utils::Utils;

/// Resolve configuration, start logging and run the selected command
pub fn run(cli: Cli) -> Result<()> {
    let config = initialize_configuration_hierarchy(cli.config.as_deref(), cli.overrides())
        .context("Failed to load configuration")?;

    let logging = LoggingSystem::new(config.logging.clone());
    logging.initialize().context("Failed to initialize logging")?;
    logging.log_system_info();

    let container = DefaultAppContainer::new(config);

    match cli.command {
        Commands::Stitch(args) => stitch(args, &container),
        Commands::Plan(args) => plan(args, &container),
        Commands::Catalog(args) => catalog(args, &container),
    }
}

/// Execute the stitch command
pub fn stitch(args: StitchArgs, container: &dyn AppContainer) -> Result<()> {
    info!("Starting stitch operation");

    let start = match args.start {
        Some(start) => start,
        None => prompt("Enter desired start time (YYYY-MM-DD HH:MM:SS): ")?,
    };
    let end = match args.end {
        Some(end) => end,
        None => prompt("Enter desired end time (YYYY-MM-DD HH:MM:SS): ")?,
    };

    let interactor = container.stitch_interactor();
    let report = interactor
        .execute(&StitchRequest::new(start, end))
        .context("Stitch failed")?;

    print_report(&report, args.json)?;

    if !args.json {
        match interactor.output_size() {
            Ok(size) => println!("Output size: {}", Utils::format_file_size(size)),
            Err(e) => warn!("Could not read output size: {}", e),
        }
    }

    if !report.is_clean() {
        warn!("Stitch completed with warnings");
    }
    info!("Stitch operation completed successfully");
    Ok(())
}

/// Execute the plan command
pub fn plan(args: PlanArgs, container: &dyn AppContainer) -> Result<()> {
    info!("Starting plan operation");

    let report = container
        .stitch_interactor()
        .plan(&StitchRequest::new(args.start, args.end))
        .context("Planning failed")?;

    print_report(&report, args.json)?;
    info!("Plan operation completed successfully");
    Ok(())
}

/// Execute the catalog command
pub fn catalog(args: CatalogArgs, container: &dyn AppContainer) -> Result<()> {
    info!("Starting catalog operation");

    let interactor = container.stitch_interactor();
    let result = interactor
        .catalog()
        .with_context(|| format!("Failed to catalog {}", interactor.config().clips_dir.display()))?;

    if args.json {
        print_json(&result)?;
    } else {
        display_catalog(&result);
    }

    info!("Catalog operation completed successfully");
    Ok(())
}

/// Ask for a value on stdin, prompting on stderr
fn prompt(message: &str) -> Result<String> {
    eprint!("{}", message);
    io::stderr().flush().context("Failed to write prompt")?;

    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    if read == 0 {
        anyhow::bail!("No input given for prompt: {}", message.trim_end());
    }
    Ok(line.trim().to_string())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}

fn print_report(report: &RunReport, json: bool) -> Result<()> {
    if json {
        print_json(report)
    } else {
        print!("{}", report);
        Ok(())
    }
}

/// Display catalogued clips in human-readable format
fn display_catalog(result: &CatalogResult) {
    let time = TimeParser::new();

    println!("Clips ({}):", result.clips.len());
    for clip in &result.clips {
        println!(
            "  {}  {} -> {}  ({})",
            clip.path.display(),
            time.format_timestamp(&clip.start_time),
            time.format_timestamp(&clip.end_time),
            time.format_time(clip.duration)
        );
    }

    if !result.skipped.is_empty() {
        println!("Skipped ({}):", result.skipped.len());
        for item in &result.skipped {
            println!("  {}", item);
        }
    }
}
