use std::error::Error;
use std::time::Duration;

use clap::Parser;
use log::info;

use raycast_arena::config;
use raycast_arena::logging;
use raycast_arena::Game;

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Simulated seconds to run on the standard map.
    #[arg(long, default_value_t = 10)]
    seconds: u64,

    /// Number of bots opposing the player.
    #[arg(long, default_value_t = config::DEFAULT_BOT_COUNT)]
    bots: usize,

    /// Seed for bot wander choices; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Debug filter to specify log topics (e.g., "move,shot,bot,spawn,ray")
    /// Available topics: move, shot, bot, spawn, ray
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    logging::init_logger(logging::parse_level(&args.log_level), args.debug_filter.clone())?;
    info!("Starting headless arena run with args: {:?}", args);

    let mut game = Game::new(args.bots, args.seed)?;
    for second in 1..=args.seconds {
        game.advance(Duration::from_secs(1));
        info!(
            "t={}s frames={} kills={} deaths={} health={}",
            second,
            game.frames(),
            game.arena.kills(),
            game.arena.deaths(),
            game.arena.player().health
        );
    }

    info!(
        "Finished after {:?}: {} kills, {} deaths.",
        game.elapsed(),
        game.arena.kills(),
        game.arena.deaths()
    );
    Ok(())
}
