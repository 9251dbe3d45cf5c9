//! Battling Knights command line tool.
//!
//! ## Usage
//!
//! - `battling-knights` - Play `moves.txt` and write `final_state.json`
//! - `battling-knights play <MOVES> -o <OUTPUT>` - Play a script (`-o -` for stdout)
//! - `battling-knights random --moves 40 --seed 7` - Print a random script

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use battling_knights::constants::{DEFAULT_MOVES_PATH, DEFAULT_OUTPUT_PATH, DEFAULT_RANDOM_MOVES};
use battling_knights::logging;
use battling_knights::report::save_snapshot;
use battling_knights::script::{ScriptError, format_script, load_script, random_moves};
use battling_knights::simulation::simulate;

/// Battling Knights: play a move script on the 8x8 arena
#[derive(Parser)]
#[command(name = "battling-knights")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter, e.g. `info` or `battling_knights=trace` (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a move script and write the final state
    Play {
        /// Move script to read
        #[arg(default_value = DEFAULT_MOVES_PATH)]
        moves: PathBuf,
        /// Where to write the final state (`-` for stdout)
        #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
        output: PathBuf,
    },
    /// Print a random, well-formed move script
    Random {
        /// Number of moves
        #[arg(short, long, default_value_t = DEFAULT_RANDOM_MOVES)]
        moves: usize,
        /// Seed; a random one is chosen when omitted
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref());

    let result = match cli.command {
        Some(Commands::Play { moves, output }) => play(&moves, &output),
        Some(Commands::Random { moves, seed }) => {
            random(moves, seed);
            Ok(())
        }
        None => play(Path::new(DEFAULT_MOVES_PATH), Path::new(DEFAULT_OUTPUT_PATH)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            if e.downcast_ref::<ScriptError>().is_some() {
                eprintln!("Terminating game!");
            }
            ExitCode::FAILURE
        }
    }
}

fn play(moves: &Path, output: &Path) -> Result<()> {
    let script =
        load_script(moves).with_context(|| format!("failed to load {}", moves.display()))?;
    info!(path = %moves.display(), moves = script.len(), "loaded move script");

    let snapshot = simulate(&script);
    save_snapshot(&snapshot, output).context("failed to save final state")?;
    Ok(())
}

fn random(len: usize, seed: Option<u64>) {
    let seed = seed.unwrap_or_else(|| fastrand::u64(..));
    info!(seed, len, "generating random script");
    print!("{}", format_script(&random_moves(seed, len)));
}
