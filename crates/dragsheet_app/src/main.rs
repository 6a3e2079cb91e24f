//! dragsheet - headless driver for the draggable modal sheet
//!
//! Runs JSON interaction scenarios against the demo host, prints the
//! effective configuration, or dumps a computed frame as JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dragsheet_app::{AppConfig, ContentView, HeadlessScenario, ScenarioRunner};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Drive the draggable modal sheet without a window
#[derive(Parser, Debug)]
#[command(name = "dragsheet")]
#[command(about = "Headless driver for the draggable modal sheet")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a JSON scenario and report the outcome
    Run {
        /// Scenario file
        #[arg(long)]
        scenario: PathBuf,

        /// Configuration file or directory containing dragsheet.toml
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the JSON report to this relative path instead of stdout
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    Config {
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the computed frame as JSON
    Frame {
        #[arg(long)]
        config: Option<PathBuf>,

        /// Show the modal and let it settle first
        #[arg(long)]
        shown: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            scenario,
            config,
            report,
        } => cmd_run(scenario, config, report),
        Commands::Config { config } => cmd_config(config),
        Commands::Frame { config, shown } => cmd_frame(config, shown),
    }
}

fn cmd_run(scenario: PathBuf, config: Option<PathBuf>, report: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load_or_default(config.as_deref())?;
    let scenario = HeadlessScenario::from_path(&scenario)?;

    tracing::info!(
        name = scenario.name.as_deref().unwrap_or("unnamed"),
        steps = scenario.steps.len(),
        "running scenario"
    );

    let mut runner = ScenarioRunner::new(&config)?;
    let outcome = runner.run(&scenario);
    let failed = outcome.is_failed();
    let report_data = outcome.into_report();

    match report {
        Some(path) => {
            report_data.write_to_path(&path)?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => report_data.write_to_writer(&mut std::io::stdout().lock())?,
    }

    if failed {
        anyhow::bail!(
            "scenario failed at step {}: {}",
            report_data.failed_step_index.unwrap_or_default(),
            report_data.message.as_deref().unwrap_or("assertion failed")
        );
    }
    Ok(())
}

fn cmd_config(config: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load_or_default(config.as_deref())?;
    print!("{}", config.to_toml()?);
    Ok(())
}

fn cmd_frame(config: Option<PathBuf>, shown: bool) -> Result<()> {
    let config = AppConfig::load_or_default(config.as_deref())?;
    let mut view = ContentView::new(&config);

    if shown {
        view.toggle();
        let dt = config.headless.tick_ms.max(1) as f32 / 1000.0;
        for _ in 0..600 {
            view.tick(dt);
            if view.modal().is_settled() {
                break;
            }
        }
    }

    let frame = view.frame().context("Failed to lay out frame")?;
    println!("{}", serde_json::to_string_pretty(&frame)?);
    Ok(())
}
