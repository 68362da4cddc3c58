use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use verso_reversi::{default_player, State};

mod session;
mod storage;

use session::Seats;

/// Play a Reversi game interactively with humans and AIs.
#[derive(Parser)]
#[command(name = "verso", version, about = "Play a Reversi game interactively with humans and AIs")]
struct Cli {
    /// Half the board edge: the board is SIZE*2 cells per side
    #[arg(short, long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(1..=4))]
    size: u8,

    /// Let the AI play black
    #[arg(short, long)]
    black_ai: bool,

    /// Let the AI play white
    #[arg(short, long)]
    white_ai: bool,

    /// Let the AI play both sides
    #[arg(short, long)]
    all_ai: bool,

    /// Verbose output (debug-level logging)
    #[arg(short, long)]
    verbose: bool,

    /// Contest mode: load FILE, print the AI's move for the side to move, exit
    #[arg(short, long, value_name = "FILE")]
    contest: Option<PathBuf>,

    /// Position file to start the game from (instead of the opening position)
    file: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("verso: error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    if let Some(path) = cli.contest {
        return contest(&path);
    }

    let state = match &cli.file {
        Some(path) => storage::load(path)?,
        None => {
            let edge = usize::from(cli.size) * 2;
            State::opening(edge).with_context(|| format!("cannot open a {0}x{0} board", edge))?
        }
    };

    let seats = Seats {
        black_ai: cli.black_ai || cli.all_ai,
        white_ai: cli.white_ai || cli.all_ai,
    };
    log::debug!(
        "starting a {0}x{0} game, black ai: {1}, white ai: {2}",
        state.board.size(),
        seats.black_ai,
        seats.white_ai
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    session::run(state, seats, &mut stdin.lock(), &mut stdout.lock())
}

/// Load a position, print the default AI's answer in move notation, exit.
fn contest(path: &PathBuf) -> Result<()> {
    let state = storage::load(path)?;
    let mv = default_player(&state);
    if mv.is_sentinel() {
        println!("pass");
    } else {
        println!("{}", mv);
    }
    Ok(())
}
