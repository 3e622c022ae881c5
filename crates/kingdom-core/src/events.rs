//! Game Events
//!
//! ECS wrapper around the shared [`EventQueue`] so systems can raise events.

use bevy_ecs::prelude::*;
use kingdom_events::{Event, EventQueue, EventType};
use std::ops::{Deref, DerefMut};

/// Resource: events waiting to be read by the view layer
#[derive(Resource, Debug, Default)]
pub struct GameEvents(pub EventQueue);

impl GameEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and queue an event in one step
    pub fn raise(
        &mut self,
        subject: impl Into<String>,
        description: impl Into<String>,
        event_type: EventType,
        tick: u64,
    ) -> u64 {
        self.0.push(Event::new(subject, description, event_type, tick))
    }
}

impl Deref for GameEvents {
    type Target = EventQueue;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for GameEvents {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raise_and_drain() {
        let mut events = GameEvents::new();
        assert!(events.is_empty());

        events.raise("tick", "Game ticked to 1", EventType::Tick, 1);
        events.raise("playing", "Game state change from loaded to playing", EventType::State, 1);
        assert_eq!(events.len(), 2);

        let first = events.pop().unwrap();
        assert_eq!(first.sequence, 1);
        assert_eq!(first.event_type, EventType::Tick);
        assert_eq!(events.drain().len(), 1);
        assert!(events.pop().is_none());
    }
}
