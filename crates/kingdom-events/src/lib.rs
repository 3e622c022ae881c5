//! Shared event types for the kingdom simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! The core produces events into an [`EventQueue`]; the presentation layer drains it.

pub mod event;
pub mod queue;

pub use event::{Event, EventType};
pub use queue::EventQueue;
