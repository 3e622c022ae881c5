//! Creation System
//!
//! Advances every queued creation by one tick, gated by the inventory.

use bevy_ecs::prelude::*;
use kingdom_events::EventType;

use super::clock::GameClock;
use crate::catalog::creatable::OutputAction;
use crate::components::creatable::{Creatable, Creations};
use crate::components::inventory::Inventory;
use crate::config::{EconomyConfig, EconomyMode};
use crate::events::GameEvents;

/// Resource: how creations use the inventory
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EconomyRules {
    pub mode: EconomyMode,
    pub retain_completed: bool,
}

impl Default for EconomyRules {
    fn default() -> Self {
        Self::from(&EconomyConfig::default())
    }
}

impl From<&EconomyConfig> for EconomyRules {
    fn from(config: &EconomyConfig) -> Self {
        Self {
            mode: config.mode,
            retain_completed: config.retain_completed,
        }
    }
}

/// System: move each unfinished creation forward one tick.
///
/// Advisory mode: a creation only progresses on ticks where the inventory can afford
/// it; nothing is deducted. Consume mode: the prerequisites are deducted on the first
/// affordable tick, after which the creation progresses every tick and delivers its
/// outputs on completion. A zero-tick creation is finished on the tick it is paid for.
pub fn advance_creations(
    clock: Res<GameClock>,
    rules: Res<EconomyRules>,
    mut inventory: ResMut<Inventory>,
    mut creations: ResMut<Creations>,
    mut events: ResMut<GameEvents>,
) {
    let tick = clock.tick;

    for creation in creations.iter_mut() {
        if creation.is_complete() && !awaits_payment(creation, rules.mode) {
            continue;
        }

        match rules.mode {
            EconomyMode::Advisory => {
                if !inventory.can_afford(creation) {
                    tracing::debug!("'{}' cannot be afforded at tick {}", creation.name, tick);
                    continue;
                }
            }
            EconomyMode::Consume => {
                if !creation.is_paid() {
                    if let Err(e) = inventory.consume(creation.pre_requisites()) {
                        tracing::debug!("'{}' waiting for resources: {}", creation.name, e);
                        continue;
                    }
                    creation.mark_paid();
                    if !creation.pre_requisites().is_empty() {
                        events.raise(
                            creation.name.clone(),
                            format!("Resources committed to {}", creation.name),
                            EventType::Inventory,
                            tick,
                        );
                    }
                }
            }
        }

        // Zero-tick creations are already complete once paid for
        let finished = if creation.is_complete() {
            true
        } else {
            creation.tick()
        };
        if finished {
            tracing::info!("Construction complete for {} at tick {}", creation.name, tick);
            events.raise(
                creation.name.clone(),
                format!("Construction complete for {}!", creation.name),
                EventType::Creation,
                tick,
            );
            if rules.mode == EconomyMode::Consume {
                deliver_outputs(creation, &mut inventory, &mut events, tick);
            }
        }
    }
}

/// Complete on arrival but not yet paid for, so still owed its outputs
fn awaits_payment(creation: &Creatable, mode: EconomyMode) -> bool {
    mode == EconomyMode::Consume && !creation.is_paid()
}

/// Apply a finished creation's outputs to the inventory
fn deliver_outputs(creation: &Creatable, inventory: &mut Inventory, events: &mut GameEvents, tick: u64) {
    let mut delivered = Vec::new();

    for (resource, spec) in creation.outputs() {
        match spec.action {
            OutputAction::Accumulate => {
                if let Err(e) = inventory.add(resource, spec.count) {
                    tracing::warn!("Output of '{}' skipped: {}", creation.name, e);
                    continue;
                }
                delivered.push(format!("+{} {}", spec.count, resource));
            }
            OutputAction::Replace => {
                inventory.set(resource, spec.count);
                delivered.push(format!("{} = {}", resource, spec.count));
            }
        }
    }

    if !delivered.is_empty() {
        events.raise(
            creation.name.clone(),
            format!("{} produced {}", creation.name, delivered.join(", ")),
            EventType::Inventory,
            tick,
        );
    }
}

/// System: drop finished creations when they are not retained
pub fn prune_completed(rules: Res<EconomyRules>, mut creations: ResMut<Creations>) {
    if rules.retain_completed {
        return;
    }
    let removed = match rules.mode {
        EconomyMode::Advisory => creations.prune_completed(),
        EconomyMode::Consume => creations.prune_where(|c| c.is_complete() && c.is_paid()),
    };
    if removed > 0 {
        tracing::debug!("Pruned {} completed creations", removed);
    }
}
