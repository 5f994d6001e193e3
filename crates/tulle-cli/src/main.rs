//! Tulle CLI: simulation, benchmarking, and debugging.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tulle_cli::commands::{self, BenchmarkOptions};
use tulle_solver::SchemeKind;

#[derive(Parser)]
#[command(name = "tulle")]
#[command(version, about = "Tulle: mass-spring-damper cloth engine")]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation from a scene file.
    Simulate {
        /// Path to the scene (TOML).
        #[arg(short, long, default_value = "scene.toml")]
        config: PathBuf,

        /// Override the scene's frame limit.
        #[arg(short, long)]
        frames: Option<u64>,
    },

    /// Run benchmark suite.
    Benchmark {
        /// Which scenario to run (hanging_membrane, corner_pinned, curtain, free_fall, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Material preset (see `tulle materials`).
        #[arg(short, long)]
        material: Option<String>,

        /// Integration scheme (pc, euler).
        #[arg(long, default_value = "pc")]
        scheme: SchemeKind,

        /// Override every scenario's frame count.
        #[arg(short, long)]
        frames: Option<u64>,
    },

    /// Inspect a state snapshot file.
    Inspect {
        /// Path to snapshot file.
        path: PathBuf,
    },

    /// Validate a scene (.toml) or mesh (.json).
    Validate {
        /// Path to scene or mesh file.
        path: PathBuf,
    },

    /// List material presets.
    Materials,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Simulate { config, frames } => commands::simulate(config, *frames),
        Commands::Benchmark {
            scenario,
            output,
            material,
            scheme,
            frames,
        } => commands::benchmark(&BenchmarkOptions {
            scenario: scenario.as_str(),
            output: output.as_deref(),
            material: material.as_deref(),
            scheme: *scheme,
            frames: *frames,
        }),
        Commands::Inspect { path } => commands::inspect(path),
        Commands::Validate { path } => commands::validate(path),
        Commands::Materials => commands::materials(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
