//! Kingdom simulation core
//!
//! Resource and creatable catalogs, the player's inventory, the world map, and the
//! [`Game`] orchestrator that advances everything one tick at a time.

pub mod catalog;
pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod game;
pub mod setup;
pub mod systems;

pub use catalog::{
    CreatableCatalog, CreatableDocument, CreatableSource, CreatableTemplate, DataFiles,
    OutputAction, Resource, ResourceCatalog, ResourceRecord, ResourceSource, StaticData,
};
pub use components::{Creatable, Creations, Inventory, OutputSpec, WorldMap};
pub use config::{EconomyMode, GameConfig};
pub use error::{ConfigError, GameError, InventoryError, LoadError, MapError};
pub use events::GameEvents;
pub use game::{Game, GameState};

pub use kingdom_events::{Event, EventQueue, EventType};
