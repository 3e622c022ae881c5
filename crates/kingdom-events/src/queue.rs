//! FIFO event queue between the game and its view.

use std::collections::VecDeque;

use crate::event::Event;

/// Ordered queue of pending events.
///
/// The game pushes, the view pops. Popping an empty queue yields `None`.
#[derive(Debug, Clone)]
pub struct EventQueue {
    events: VecDeque<Event>,
    next_sequence: u64,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self {
            events: VecDeque::new(),
            next_sequence: 1,
        }
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, stamping it with the next sequence number.
    pub fn push(&mut self, mut event: Event) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        event.sequence = sequence;
        self.events.push_back(event);
        sequence
    }

    /// Remove and return the oldest event.
    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Peek at the oldest event without removing it.
    pub fn peek(&self) -> Option<&Event> {
        self.events.front()
    }

    /// Take every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Total number of events ever pushed.
    pub fn total_pushed(&self) -> u64 {
        self.next_sequence - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;

    fn event(subject: &str) -> Event {
        Event::new(subject, format!("{} happened", subject), EventType::State, 0)
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = EventQueue::new();
        queue.push(event("e1"));
        queue.push(event("e2"));
        queue.push(event("e3"));

        assert_eq!(queue.pop().unwrap().subject, "e1");
        assert_eq!(queue.pop().unwrap().subject, "e2");
        assert_eq!(queue.pop().unwrap().subject, "e3");
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_pop_empty_is_none() {
        let mut queue = EventQueue::new();
        assert!(queue.is_empty());
        assert!(queue.pop().is_none());
        assert!(queue.peek().is_none());
    }

    #[test]
    fn test_sequence_numbers() {
        let mut queue = EventQueue::new();
        assert_eq!(queue.push(event("a")), 1);
        assert_eq!(queue.push(event("b")), 2);
        queue.pop();
        assert_eq!(queue.push(event("c")), 3);

        let drained = queue.drain();
        let sequences: Vec<u64> = drained.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![2, 3]);
        assert!(queue.is_empty());
        assert_eq!(queue.total_pushed(), 3);
    }
}
