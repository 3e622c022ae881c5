//! Session driver
//!
//! Runs a whole game without a prompt: start, optionally stock the inventory, queue
//! one of every creatable, tick, show the kingdom, and finish.

use std::io::Write;
use std::path::Path;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use kingdom_core::config::DEFAULT_CONFIG_PATH;
use kingdom_core::{ConfigError, CreatableSource, Game, GameConfig, GameError, ResourceSource};

use crate::logger::EventLogger;
use crate::view::{GameView, MapView};

/// Range of units given per resource by `fill`
pub const FILL_RANGE: std::ops::RangeInclusive<u32> = 20..=60;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("output failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub ticks: u64,
    /// Stock every catalogued resource before queueing creations
    pub fill: bool,
    pub fill_seed: u64,
    pub show_map: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            ticks: 10,
            fill: false,
            fill_seed: 42,
            show_map: false,
        }
    }
}

/// Configuration for a session. A path given explicitly must load; otherwise the
/// default file is used when present and built-in defaults when not.
pub fn resolve_config(path: Option<&Path>) -> Result<GameConfig, SessionError> {
    match path {
        Some(path) => Ok(GameConfig::load(path)?),
        None => Ok(GameConfig::load_or_default(DEFAULT_CONFIG_PATH)),
    }
}

/// Print and log every pending event
fn flush_events<W: Write>(
    game: &mut Game,
    logger: &mut EventLogger,
    out: &mut W,
) -> Result<(), SessionError> {
    while let Some(event) = game.next_event() {
        writeln!(out, " * {}", event)?;
        logger.log(&event)?;
    }
    Ok(())
}

/// Give a random amount of every catalogued resource
fn fill_inventory<W: Write>(game: &mut Game, seed: u64, out: &mut W) -> Result<(), SessionError> {
    let names: Vec<String> = game
        .resources()
        .map(|catalog| catalog.list_names().into_iter().map(String::from).collect())
        .unwrap_or_default();

    let mut rng = SmallRng::seed_from_u64(seed);
    for name in names {
        let count = rng.gen_range(FILL_RANGE);
        game.add_resource(&name, count)?;
        writeln!(out, "Added {} {}", count, name)?;
    }
    Ok(())
}

/// Drive `game` through one complete session, writing everything to `out`
pub fn run_session<S, W>(
    game: &mut Game,
    data: &S,
    options: &SessionOptions,
    logger: &mut EventLogger,
    out: &mut W,
) -> Result<(), SessionError>
where
    S: ResourceSource + CreatableSource + ?Sized,
    W: Write,
{
    writeln!(out, "Welcome to {}!", game)?;
    game.start(data)?;
    flush_events(game, logger, out)?;

    if options.fill {
        fill_inventory(game, options.fill_seed, out)?;
    }

    let names: Vec<String> = game
        .creatables()
        .map(|catalog| catalog.list_names().into_iter().map(String::from).collect())
        .unwrap_or_default();
    for name in names {
        game.add_creation_by_name(&name)?;
        let affordable = game
            .creations()
            .last()
            .is_some_and(|creation| game.inventory().can_afford(creation));
        if affordable {
            writeln!(out, "Queued {}", name)?;
        } else {
            writeln!(out, "Queued {} (not enough resources yet)", name)?;
        }
    }

    for _ in 0..options.ticks {
        game.tick()?;
        flush_events(game, logger, out)?;
    }

    writeln!(out, "{}", GameView { game: &*game })?;
    if options.show_map {
        if let Some(map) = game.map() {
            writeln!(
                out,
                "{}",
                MapView {
                    map,
                    catalog: game.resources(),
                }
            )?;
        }
    }

    game.game_over()?;
    flush_events(game, logger, out)?;
    writeln!(out, "Goodbye from {}.", game)?;
    logger.flush()?;
    Ok(())
}
