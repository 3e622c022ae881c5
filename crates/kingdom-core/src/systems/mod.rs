//! Tick Systems
//!
//! Everything that happens when the game advances one tick, in order:
//! the clock moves and announces itself, creations progress, finished ones are pruned.

pub mod clock;
pub mod creation;

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;

pub use clock::{advance_clock, GameClock};
pub use creation::{advance_creations, prune_completed, EconomyRules};

/// The per-tick schedule. Runs single-threaded so event order is deterministic.
pub fn build_tick_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems((advance_clock, advance_creations, prune_completed).chain());
    schedule
}
