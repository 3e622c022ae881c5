//! Event Types
//!
//! State-change notifications raised by the game and read by the view layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a game event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// The session clock advanced
    Tick,
    /// The game moved between lifecycle states
    State,
    /// A queued creation finished
    Creation,
    /// Resources were taken from or added to the inventory
    Inventory,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Tick => "tick",
            EventType::State => "state",
            EventType::Creation => "creation",
            EventType::Inventory => "inventory",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single immutable game event.
///
/// `tick` is the session tick at which the event was raised; `sequence` is assigned by
/// the [`EventQueue`](crate::EventQueue) when the event is pushed and is unique per queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub sequence: u64,
    pub tick: u64,
    /// What the event is about (a state name, a creatable name, "tick")
    pub subject: String,
    pub description: String,
    pub event_type: EventType,
}

impl Event {
    pub fn new(
        subject: impl Into<String>,
        description: impl Into<String>,
        event_type: EventType,
        tick: u64,
    ) -> Self {
        Self {
            sequence: 0,
            tick,
            subject: subject.into(),
            description: description.into(),
            event_type,
        }
    }

    /// Serializes the event to a single JSON line (no trailing newline).
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes an event from a JSON line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[tick {}] {} ({}): {}",
            self.tick, self.event_type, self.subject, self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_serialization() {
        assert_eq!(serde_json::to_string(&EventType::Tick).unwrap(), r#""tick""#);
        assert_eq!(serde_json::to_string(&EventType::State).unwrap(), r#""state""#);
        assert_eq!(serde_json::to_string(&EventType::Creation).unwrap(), r#""creation""#);
        assert_eq!(serde_json::to_string(&EventType::Inventory).unwrap(), r#""inventory""#);
    }

    #[test]
    fn test_event_jsonl_line() {
        let event = Event::new("house", "Construction complete for house!", EventType::Creation, 7);
        let line = event.to_jsonl().unwrap();
        assert!(!line.contains('\n'));

        let parsed = Event::from_jsonl(&line).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_event_display() {
        let event = Event::new("tick", "Game ticked to 3", EventType::Tick, 3);
        assert_eq!(event.to_string(), "[tick 3] tick (tick): Game ticked to 3");
    }
}
