//! Game Orchestrator
//!
//! Owns the session: catalogs, inventory, creations, map and event queue all live as
//! resources in an ECS world, and each tick runs the tick schedule over it.
//!
//! Lifecycle is one-directional: `Loaded -> Playing -> GameOver`.

use bevy_ecs::prelude::*;
use kingdom_events::{Event, EventType};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::{CreatableCatalog, CreatableSource, ResourceCatalog, ResourceSource};
use crate::components::{Creatable, Creations, Inventory, WorldMap};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::events::GameEvents;
use crate::setup::create_world_map;
use crate::systems::{build_tick_schedule, EconomyRules, GameClock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    Loaded,
    Playing,
    GameOver,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::Loaded => write!(f, "loaded"),
            GameState::Playing => write!(f, "playing"),
            GameState::GameOver => write!(f, "game over"),
        }
    }
}

pub struct Game {
    name: String,
    state: GameState,
    config: GameConfig,
    world: World,
    schedule: Schedule,
}

impl Game {
    /// A new session in the `Loaded` state. Catalogs and map are created by [`Game::start`].
    pub fn new(name: impl Into<String>, config: GameConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(GameClock::default());
        world.insert_resource(GameEvents::new());
        world.insert_resource(Inventory::new());
        world.insert_resource(Creations::new());
        world.insert_resource(EconomyRules::from(&config.economy));

        Self {
            name: name.into(),
            state: GameState::Loaded,
            config,
            world,
            schedule: build_tick_schedule(),
        }
    }

    /// A new session named after `[game] name`
    pub fn from_config(config: GameConfig) -> Self {
        let name = config.game.name.clone();
        Self::new(name, config)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn set_state(&mut self, new_state: GameState) {
        let old_state = self.state;
        self.state = new_state;
        tracing::info!("Game '{}' moved from {} to {}", self.name, old_state, new_state);

        let tick = self.tick_count();
        self.world.resource_mut::<GameEvents>().raise(
            new_state.to_string(),
            format!("Game state change from {} to {}", old_state, new_state),
            EventType::State,
            tick,
        );
    }

    fn ensure_playing(&self) -> Result<(), GameError> {
        match self.state {
            GameState::Playing => Ok(()),
            state => Err(GameError::NotPlaying(state)),
        }
    }

    /// Load both catalogs, generate the map, and start playing.
    ///
    /// Only valid from `Loaded`. If either catalog fails to load nothing is installed
    /// and the game stays in `Loaded`.
    pub fn start<S>(&mut self, data: &S) -> Result<(), GameError>
    where
        S: ResourceSource + CreatableSource + ?Sized,
    {
        if self.state != GameState::Loaded {
            return Err(GameError::InvalidTransition {
                from: self.state,
                to: GameState::Playing,
            });
        }

        let resources = ResourceCatalog::load(data)?;
        let creatables = CreatableCatalog::load(data)?;
        for (creatable, resource) in creatables.unknown_references(&resources) {
            tracing::warn!("Creatable '{}' refers to unknown resource '{}'", creatable, resource);
        }
        let map = create_world_map(&self.config.map);

        self.world.insert_resource(Inventory::new());
        self.world.insert_resource(Creations::new());
        self.world.insert_resource(resources);
        self.world.insert_resource(creatables);
        self.world.insert_resource(map);

        self.set_state(GameState::Playing);
        Ok(())
    }

    /// Advance one tick. Returns the new tick count.
    pub fn tick(&mut self) -> Result<u64, GameError> {
        self.ensure_playing()?;
        self.schedule.run(&mut self.world);
        Ok(self.tick_count())
    }

    /// Queue an (already independent) creatable instance
    pub fn add_creation(&mut self, creation: Creatable) -> Result<(), GameError> {
        self.ensure_playing()?;
        tracing::debug!("Queued creation '{}'", creation.name);
        self.world.resource_mut::<Creations>().push(creation);
        Ok(())
    }

    /// Instantiate a creatable from the catalog and queue it
    pub fn add_creation_by_name(&mut self, name: &str) -> Result<(), GameError> {
        self.ensure_playing()?;
        let creation = self
            .creatables()
            .and_then(|catalog| catalog.get_copy(name))
            .ok_or_else(|| GameError::UnknownCreatable(name.to_string()))?;
        self.add_creation(creation)
    }

    /// Add a catalogued resource to the inventory. Returns the new quantity.
    pub fn add_resource(&mut self, name: &str, count: u32) -> Result<u32, GameError> {
        self.ensure_playing()?;
        if !self.resources().is_some_and(|catalog| catalog.contains(name)) {
            return Err(GameError::UnknownResource(name.to_string()));
        }
        Ok(self.world.resource_mut::<Inventory>().add(name, count)?)
    }

    /// End the session. Allowed once, from `Loaded` or `Playing`.
    pub fn game_over(&mut self) -> Result<(), GameError> {
        if self.state == GameState::GameOver {
            return Err(GameError::InvalidTransition {
                from: self.state,
                to: GameState::GameOver,
            });
        }
        self.set_state(GameState::GameOver);
        Ok(())
    }

    /// Oldest pending event, if any
    pub fn next_event(&mut self) -> Option<Event> {
        self.world.resource_mut::<GameEvents>().pop()
    }

    pub fn has_events(&self) -> bool {
        !self.world.resource::<GameEvents>().is_empty()
    }

    pub fn tick_count(&self) -> u64 {
        self.world.resource::<GameClock>().tick
    }

    pub fn inventory(&self) -> &Inventory {
        self.world.resource::<Inventory>()
    }

    /// Queued creations in the order they were added
    pub fn creations(&self) -> &[Creatable] {
        self.world.resource::<Creations>().as_slice()
    }

    pub fn map(&self) -> Option<&WorldMap> {
        self.world.get_resource::<WorldMap>()
    }

    pub fn resources(&self) -> Option<&ResourceCatalog> {
        self.world.get_resource::<ResourceCatalog>()
    }

    pub fn creatables(&self) -> Option<&CreatableCatalog> {
        self.world.get_resource::<CreatableCatalog>()
    }

    /// Marker at a map position
    pub fn tile(&self, x: i32, y: i32) -> Result<Option<&str>, GameError> {
        let map = self.map().ok_or(GameError::MapUnavailable)?;
        Ok(map.get(x, y)?)
    }

    /// Put a marker on the map. Returns the marker it replaced.
    pub fn place(&mut self, x: i32, y: i32, marker: &str) -> Result<Option<String>, GameError> {
        self.ensure_playing()?;
        let mut map = self
            .world
            .get_resource_mut::<WorldMap>()
            .ok_or(GameError::MapUnavailable)?;
        Ok(map.set(x, y, Some(marker.to_string()))?)
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CreatableDocument, CreatableEntry, DataFiles, ResourceRecord, StaticData};
    use crate::config::MapConfig;
    use crate::error::LoadError;

    fn data() -> StaticData {
        StaticData::new(
            vec![
                ResourceRecord::new("wood", "Logs"),
                ResourceRecord::new("stone", "Rocks"),
                ResourceRecord::new("grass", "Ground cover").with_graphic("\""),
            ],
            CreatableDocument::new(vec![CreatableEntry::new("house", "A small house", 3)
                .with_pre_requisite("wood", 2)
                .with_pre_requisite("stone", 1)]),
        )
    }

    fn config() -> GameConfig {
        GameConfig {
            map: MapConfig {
                width: 8,
                height: 4,
                ground_cover_count: 5,
                ..MapConfig::default()
            },
            ..GameConfig::default()
        }
    }

    fn drain(game: &mut Game) -> Vec<Event> {
        std::iter::from_fn(|| game.next_event()).collect()
    }

    #[test]
    fn test_start_moves_to_playing() {
        let mut game = Game::new("Test", config());
        assert_eq!(game.state(), GameState::Loaded);
        assert!(game.map().is_none());

        game.start(&data()).unwrap();
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.resources().unwrap().len(), 3);
        assert_eq!(game.creatables().unwrap().list_names(), vec!["house"]);
        assert_eq!(game.map().unwrap().count_of("grass"), 5);

        let events = drain(&mut game);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, EventType::State);
        assert_eq!(events[0].subject, "playing");
        assert_eq!(events[0].description, "Game state change from loaded to playing");
    }

    #[test]
    fn test_failed_load_stays_loaded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("resources.json"), r#"[{"Name": "wood"}]"#).unwrap();
        std::fs::write(dir.path().join("creatables.toml"), "[[building]]\nname = \"house\"\n").unwrap();
        let files = DataFiles::in_dir(dir.path(), "resources.json", "creatables.toml");

        let mut game = Game::new("Test", config());
        assert!(matches!(
            game.start(&files),
            Err(GameError::Load(LoadError::MalformedRoot(_)))
        ));
        assert_eq!(game.state(), GameState::Loaded);
        assert!(game.resources().is_none());
        assert!(game.map().is_none());
        assert!(game.next_event().is_none());

        let missing = DataFiles::in_dir(dir.path(), "nope.json", "creatables.toml");
        assert!(matches!(
            game.start(&missing),
            Err(GameError::Load(LoadError::Io { .. }))
        ));
        assert_eq!(game.state(), GameState::Loaded);
    }

    #[test]
    fn test_tick_requires_playing() {
        let mut game = Game::new("Test", config());
        assert!(matches!(game.tick(), Err(GameError::NotPlaying(GameState::Loaded))));

        game.start(&data()).unwrap();
        assert_eq!(game.tick().unwrap(), 1);
        assert_eq!(game.tick().unwrap(), 2);
        assert_eq!(game.tick_count(), 2);
    }

    #[test]
    fn test_tick_event_every_tick() {
        let mut game = Game::new("Test", config());
        game.start(&data()).unwrap();
        drain(&mut game);

        game.tick().unwrap();
        let events = drain(&mut game);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, EventType::Tick);
        assert_eq!(events[0].description, "Game ticked to 1");
        assert_eq!(events[0].tick, 1);
    }

    #[test]
    fn test_game_over_is_final() {
        let mut game = Game::new("Test", config());
        game.start(&data()).unwrap();
        game.game_over().unwrap();
        assert_eq!(game.state(), GameState::GameOver);

        assert!(matches!(
            game.start(&data()),
            Err(GameError::InvalidTransition { from: GameState::GameOver, .. })
        ));
        assert!(game.tick().is_err());
        assert!(game.game_over().is_err());
        assert!(game.add_creation_by_name("house").is_err());
        assert_eq!(game.state(), GameState::GameOver);

        let states: Vec<String> = drain(&mut game)
            .into_iter()
            .filter(|e| e.event_type == EventType::State)
            .map(|e| e.subject)
            .collect();
        assert_eq!(states, vec!["playing", "game over"]);
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let mut game = Game::new("Test", config());
        game.start(&data()).unwrap();
        assert!(matches!(
            game.start(&data()),
            Err(GameError::InvalidTransition { from: GameState::Playing, to: GameState::Playing })
        ));
    }

    #[test]
    fn test_add_resource_checks_catalog() {
        let mut game = Game::new("Test", config());
        assert!(game.add_resource("wood", 1).is_err());

        game.start(&data()).unwrap();
        assert_eq!(game.add_resource("wood", 4).unwrap(), 4);
        assert!(matches!(
            game.add_resource("gold", 1),
            Err(GameError::UnknownResource(_))
        ));
        assert!(matches!(
            game.add_resource("wood", 0),
            Err(GameError::Inventory(_))
        ));
    }

    #[test]
    fn test_add_unknown_creation() {
        let mut game = Game::new("Test", config());
        game.start(&data()).unwrap();
        assert!(matches!(
            game.add_creation_by_name("castle"),
            Err(GameError::UnknownCreatable(_))
        ));
        assert!(game.creations().is_empty());
    }

    #[test]
    fn test_add_creation_before_start_is_not_playing() {
        let mut game = Game::new("Test", config());
        assert!(matches!(
            game.add_creation_by_name("house"),
            Err(GameError::NotPlaying(GameState::Loaded))
        ));
    }

    #[test]
    fn test_map_access_is_bounds_checked() {
        let mut game = Game::new("Test", config());
        assert!(matches!(game.tile(0, 0), Err(GameError::MapUnavailable)));

        game.start(&data()).unwrap();
        game.place(1, 1, "castle").unwrap();
        assert_eq!(game.tile(1, 1).unwrap(), Some("castle"));

        let err = game.tile(8, 0).unwrap_err();
        assert_eq!(err.to_string(), "position (8, 0) is outside map 'Kingdom' (8x4)");
        assert!(game.place(-1, 0, "castle").is_err());
    }

    #[test]
    fn test_display_is_name() {
        let game = Game::from_config(GameConfig::default());
        assert_eq!(game.to_string(), "Kingdom 2");
    }
}
