//! Emotion Monitor - Main Entry Point

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use emotion_monitor::{init_logging, replay, AppConfig, ReplayOptions};
use session::{SessionManager, SessionSource};
use tracing::info;

#[derive(Parser)]
#[command(name = "emotion-monitor", version, about = "Rolling emotion statistics over recorded detections")]
struct Cli {
    /// Configuration file (defaults to config/emotion-monitor.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Feed JSON-lines frame records through a session and print the chart
    Replay {
        /// Input file, or "-" for stdin
        input: PathBuf,

        /// Print the statistics every N frames
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        every: u64,

        /// Print snapshots as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Print the configured emotion classes and window
    Classes,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    init_logging(&config.log_level)?;

    info!("=== Emotion Monitor v{} ===", env!("CARGO_PKG_VERSION"));

    match cli.cmd {
        Commands::Replay { input, every, json } => {
            let classes = config.classes()?;
            let mut manager = SessionManager::new(classes, config.stats.clone())?;
            manager.start(SessionSource::File { path: input.clone() })?;

            let options = ReplayOptions {
                every,
                json,
                chart_width: config.chart_width,
            };
            let stdout = io::stdout();
            let mut out = stdout.lock();

            let summary = if input.as_os_str() == "-" {
                replay(io::stdin().lock(), &mut out, &mut manager, &options)?
            } else {
                let file = File::open(&input)
                    .with_context(|| format!("opening {}", input.display()))?;
                replay(BufReader::new(file), &mut out, &mut manager, &options)?
            };

            manager.stop();
            info!("Replay finished: {} frames", summary.frames);
        }
        Commands::Classes => {
            let classes = config.classes()?;
            for (index, label) in classes.labels().iter().enumerate() {
                println!("{:>2}  {}", index, label);
            }
            println!("window: {} frames", config.stats.window_capacity);
        }
    }

    Ok(())
}
