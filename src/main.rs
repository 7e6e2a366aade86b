//! sitewidgets - scenario replay for the navigation menu and services carousel
//!
//! # Overview
//!
//! This binary drives the widgets on the headless demo page. It initializes:
//! - Configuration loading ([`ConfigManager`], `sitewidgets.yaml` + `SITEWIDGETS__*` env)
//! - Logging infrastructure (file rotation + console output)
//! - Tokio runtime (realtime waits sleep on it)
//!
//! # Commands
//!
//! - `run <scenario.yaml>`: replay the steps and print the transcript of state changes
//! - `defaults [--write]`: print the default configuration, or write it to the config dir

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use sitewidgets::{APP_NAME, ConfigManager, Scenario, ScenarioRunner, VERSION, WidgetConfig};

#[derive(Parser)]
#[command(name = "sitewidgets")]
#[command(about = "Replay interaction scenarios against the site widgets")]
#[command(version)]
struct Cli {
    /// Directory holding sitewidgets.yaml
    #[arg(long, short = 'c', global = true, default_value = ".")]
    config_dir: Utf8PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scenario file and print what changed after each step
    Run {
        /// Scenario YAML file
        scenario: Utf8PathBuf,

        /// Sleep for real during wait steps instead of only advancing the virtual clock
        #[arg(long)]
        realtime: bool,
    },

    /// Print the default configuration as YAML
    Defaults {
        /// Write sitewidgets.yaml into the config directory unless one exists
        #[arg(long)]
        write: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_manager = ConfigManager::new(&cli.config_dir)?;

    match cli.command {
        Commands::Run { scenario, realtime } => {
            let mut config = config_manager.load()?;
            config.logging.debug |= cli.debug;

            // Keep the guard alive so buffered log lines are flushed on exit
            let _guard = sitewidgets::logging::setup_logging(&config.logging)?;
            tracing::info!("Starting {} v{}", APP_NAME, VERSION);

            run_scenario(config, &scenario, realtime)
        }
        Commands::Defaults { write } => {
            if write {
                if config_manager.write_defaults_if_missing()? {
                    println!("Wrote {}", config_manager.config_path());
                } else {
                    println!("{} already exists", config_manager.config_path());
                }
                return Ok(());
            }

            let yaml = serde_yaml_ng::to_string(&WidgetConfig::default())
                .context("Failed to serialize default config")?;
            print!("{yaml}");
            Ok(())
        }
    }
}

fn run_scenario(config: WidgetConfig, path: &Utf8Path, realtime: bool) -> Result<()> {
    let scenario =
        Scenario::load(path).with_context(|| format!("Failed to load scenario {}", path))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(1)
        .thread_name("sitewidgets-worker")
        .build()
        .context("Failed to create tokio runtime")?;

    let runner = ScenarioRunner::new(config).realtime(realtime);
    let report = runtime
        .block_on(runner.run(&scenario))
        .with_context(|| format!("Scenario {} failed", path))?;

    print!("{}", report.render());
    report.metrics.log_summary();

    tracing::info!("Scenario complete: {}", report.final_state.summary());
    Ok(())
}
