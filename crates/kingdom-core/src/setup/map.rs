//! Map Setup
//!
//! Builds the world map from configuration with a seeded RNG, so the same seed
//! always yields the same map.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::components::world_map::WorldMap;
use crate::config::MapConfig;

/// Create and seed the world map described by `config`
pub fn create_world_map(config: &MapConfig) -> WorldMap {
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let mut map = WorldMap::new(&config.name, config.width, config.height);
    let placed = map.initialise(
        &mut rng,
        &config.ground_cover,
        config.ground_cover_count,
        config.max_placement_attempts,
    );
    tracing::info!(
        "Created map '{}' ({}x{}) with {} '{}'",
        map.name(),
        map.width(),
        map.height(),
        placed,
        config.ground_cover
    );
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_world_map_from_config() {
        let config = MapConfig {
            width: 12,
            height: 6,
            ground_cover_count: 20,
            ..MapConfig::default()
        };
        let map = create_world_map(&config);

        assert_eq!(map.width(), 12);
        assert_eq!(map.height(), 6);
        assert_eq!(map.count_of("grass"), 20);
        assert_eq!(map.occupied_count(), 20);
    }
}
