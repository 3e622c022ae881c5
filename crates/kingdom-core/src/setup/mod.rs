//! World Setup
//!
//! Session initialization that needs randomness or configuration.

pub mod map;

pub use map::*;
