//! Minesweeper in the terminal.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sweeper_core::GameEngine;

mod command;
mod config;
mod render;
mod session;

use config::{Config, GameArgs};
use session::{Ending, Session};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// TOML file with game settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    game: GameArgs,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    }
    .apply_args(&args.game);

    let (width, height) = config.board_size(config::terminal_size());
    let seed = config.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let engine = GameEngine::new_game(width, height, config.mines, seed).with_context(|| {
        format!(
            "Cannot start a {}x{} game with {} mines",
            width, height, config.mines
        )
    })?;

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    let mut session = Session::new(engine, stdin, stdout);
    let ending = session.run(config.intro).context("Terminal I/O failed")?;

    match ending {
        Ending::Finished(outcome) => log::info!(
            "Game over: {:?} with {} of {} mines flagged",
            outcome,
            session.engine().flag_count(),
            session.engine().total_mines()
        ),
        Ending::Quit => log::info!("Player quit"),
        Ending::Abandoned => log::info!("Input closed, game abandoned"),
    }
    Ok(())
}
