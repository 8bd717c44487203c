use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "ntk")]
#[command(about = "Roster reconciliation tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay recorded OCR frames through a roster and print the result
    Replay {
        /// JSON Lines file, one frame (array of string / integer / null rows) per line
        #[arg(long)]
        frames: PathBuf,

        /// Layered config paths in merge order
        #[arg(long = "config")]
        config_paths: Vec<String>,

        /// Seconds between consecutive frames
        #[arg(long, default_value_t = 5)]
        interval_secs: u64,

        /// Capture time of the first frame (RFC 3339); defaults to now
        #[arg(long)]
        start: Option<String>,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> profile -> overrides...)
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Silent if the file does not exist.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Replay {
            frames,
            config_paths,
            interval_secs,
            start,
        } => commands::replay::run(&frames, &config_paths, interval_secs, start.as_deref()),

        Commands::ConfigHash { paths } => commands::config_hash::run(&paths),
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
