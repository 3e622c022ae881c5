//! Game Components
//!
//! Mutable per-session state: the inventory, the creations being built, and the map.

pub mod creatable;
pub mod inventory;
pub mod world_map;

pub use creatable::{Creatable, Creations, OutputSpec};
pub use inventory::Inventory;
pub use world_map::WorldMap;
