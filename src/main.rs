//! Cat Platformer headless runner
//!
//! Plays the level with the demo pilot and reports what happened.
//!
//! Usage: `cat-platformer [LEVEL.json] [SEED]`, in either order. An empty
//! level argument selects the built-in level.

use std::process::ExitCode;

use cat_platformer::consts::SIM_HZ;
use cat_platformer::sim::{DemoPilot, GameState, TickOutcome, tick};
use cat_platformer::Level;

/// Two minutes of play at the simulation rate
const DEMO_TICKS: u32 = 120 * SIM_HZ;
const DEFAULT_SEED: u64 = 1;

/// Command line: a numeric argument is the seed, anything else the level path
#[derive(Debug, PartialEq, Eq)]
struct RunArgs {
    level: Option<String>,
    seed: u64,
}

impl RunArgs {
    fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let mut parsed = Self {
            level: None,
            seed: DEFAULT_SEED,
        };
        for arg in args {
            if arg.is_empty() {
                continue;
            }
            match arg.parse::<u64>() {
                Ok(seed) => parsed.seed = seed,
                Err(_) if parsed.level.is_none() => parsed.level = Some(arg),
                Err(_) => log::warn!("Ignoring extra argument {arg:?}"),
            }
        }
        parsed
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Cat Platformer (headless) starting...");

    let args = RunArgs::parse(std::env::args().skip(1));
    let level = match &args.level {
        Some(path) => match Level::load(path) {
            Ok(level) => level,
            Err(e) => {
                log::error!("Could not load level: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Level::builtin(),
    };
    let seed = args.seed;

    let mut state = GameState::new(&level);
    let mut pilot = DemoPilot::new(seed);

    for _ in 0..DEMO_TICKS {
        let input = pilot.next_input(&state, &level);
        match tick(&mut state, &input, &level) {
            TickOutcome::HazardReset(hazard) => {
                log::info!("t={} {:?}, back to spawn", state.time_ticks, hazard)
            }
            TickOutcome::GoalReached => log::info!("t={} goal reached", state.time_ticks),
            TickOutcome::None => {}
        }
    }

    println!(
        "seed {seed}: {} clears, {} resets, {}s left, cat at ({:.1}, {:.1})",
        state.clears, state.resets, state.time_left, state.actor.pos.x, state.actor.pos.y
    );
    ExitCode::SUCCESS
}
