//! Session clock

use bevy_ecs::prelude::*;
use kingdom_events::EventType;

use crate::events::GameEvents;

/// Resource: ticks elapsed in this session
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct GameClock {
    pub tick: u64,
}

/// System: advance the clock and announce the new tick
pub fn advance_clock(mut clock: ResMut<GameClock>, mut events: ResMut<GameEvents>) {
    clock.tick += 1;
    let tick = clock.tick;
    events.raise("tick", format!("Game ticked to {}", tick), EventType::Tick, tick);
    tracing::debug!("Tick {}", tick);
}
