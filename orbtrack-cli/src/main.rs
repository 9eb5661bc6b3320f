//! Orbtrack CLI - live ISS tracking in the terminal
//!
//! Thin front end over the `orbtrack` library: argument parsing, terminal
//! UI and process lifecycle live here, tracking semantics live in the
//! library.

mod commands;
mod error;
mod runner;
mod tui_app;
mod ui;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::track::TrackArgs;

#[derive(Parser)]
#[command(name = "orbtrack")]
#[command(version = orbtrack::VERSION)]
#[command(about = "Follow the International Space Station live from your terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Track the ISS on a live world map
    Track {
        /// Print a status line per update instead of drawing the map
        #[arg(long)]
        headless: bool,

        /// Milliseconds between position requests
        #[arg(long)]
        poll_interval_ms: Option<u64>,

        /// Milliseconds between animation frames
        #[arg(long)]
        tick_interval_ms: Option<u64>,

        /// Maximum number of trail points kept
        #[arg(long)]
        trail_capacity: Option<usize>,

        /// Initial zoom level (1 = whole world)
        #[arg(long)]
        zoom: Option<u8>,

        /// Position API endpoint
        #[arg(long)]
        position_url: Option<String>,

        /// Enable debug logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the crew currently aboard the ISS
    Crew,

    /// View or change configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Track {
            headless,
            poll_interval_ms,
            tick_interval_ms,
            trail_capacity,
            zoom,
            position_url,
            verbose,
        } => commands::track::run(TrackArgs {
            headless,
            poll_interval_ms,
            tick_interval_ms,
            trail_capacity,
            zoom,
            position_url,
            verbose,
        }),
        Commands::Crew => commands::crew::run(),
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
