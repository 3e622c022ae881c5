//! Text views
//!
//! Plain-text renderings of the game for the terminal. Each view borrows the state it
//! shows and implements `Display`.

use std::fmt;

use kingdom_core::{Creatable, Game, Inventory, ResourceCatalog, WorldMap};

/// Character drawn for an empty map cell
pub const EMPTY_TILE: char = '.';

/// Inventory holdings, with each resource's description when the catalog knows it
pub struct InventoryView<'a> {
    pub inventory: &'a Inventory,
    pub catalog: Option<&'a ResourceCatalog>,
}

impl fmt::Display for InventoryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inventory.is_empty() {
            return write!(f, "{}", self.inventory);
        }
        write!(
            f,
            "Inventory ({} resource types)",
            self.inventory.resource_type_count()
        )?;
        for (name, count) in self.inventory.summary() {
            write!(f, "\n\t{} : {}", name, count)?;
            let description = self
                .catalog
                .and_then(|catalog| catalog.get_by_name(name))
                .map(|resource| resource.description.as_str())
                .filter(|description| !description.is_empty());
            if let Some(description) = description {
                write!(f, " ({})", description)?;
            }
        }
        Ok(())
    }
}

/// Queued creations with their progress
pub struct CreationsView<'a> {
    pub creations: &'a [Creatable],
    /// Marks each unfinished creation the inventory cannot currently afford
    pub inventory: Option<&'a Inventory>,
}

impl fmt::Display for CreationsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.creations.is_empty() {
            return write!(f, "Nothing under construction.");
        }
        let completed = self.creations.iter().filter(|c| c.is_complete()).count();
        write!(
            f,
            "Creations ({} of {} complete)",
            completed,
            self.creations.len()
        )?;
        for creation in self.creations {
            write!(f, "\n{}", creation)?;
            let blocked = !creation.is_complete()
                && self
                    .inventory
                    .is_some_and(|inventory| !inventory.can_afford(creation));
            if blocked {
                write!(f, "\n\t(waiting for resources)")?;
            }
        }
        Ok(())
    }
}

/// The world map, one text row per map row
pub struct MapView<'a> {
    pub map: &'a WorldMap,
    pub catalog: Option<&'a ResourceCatalog>,
}

impl MapView<'_> {
    /// Glyph for a marker: the resource's graphic, else its first character
    fn glyph(&self, marker: &str) -> char {
        self.catalog
            .and_then(|catalog| catalog.get_by_name(marker))
            .and_then(|resource| resource.glyph)
            .or_else(|| marker.chars().next())
            .unwrap_or(EMPTY_TILE)
    }
}

impl fmt::Display for MapView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}x{})",
            self.map.name(),
            self.map.width(),
            self.map.height()
        )?;
        for row in self.map.rows() {
            let line: String = row
                .iter()
                .map(|cell| match cell {
                    Some(marker) => self.glyph(marker),
                    None => EMPTY_TILE,
                })
                .collect();
            write!(f, "\n{}", line)?;
        }
        Ok(())
    }
}

/// Header, inventory and creations for a running game
pub struct GameView<'a> {
    pub game: &'a Game,
}

impl fmt::Display for GameView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} [{}] tick {}",
            self.game,
            self.game.state(),
            self.game.tick_count()
        )?;
        writeln!(
            f,
            "{}",
            InventoryView {
                inventory: self.game.inventory(),
                catalog: self.game.resources(),
            }
        )?;
        write!(
            f,
            "{}",
            CreationsView {
                creations: self.game.creations(),
                inventory: Some(self.game.inventory()),
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kingdom_core::{Resource, ResourceCatalog};

    fn catalog() -> ResourceCatalog {
        let mut catalog = ResourceCatalog::new();
        catalog.register(Resource::new("wood", "Logs"));
        catalog.register(Resource::new("grass", "Green stuff").with_glyph('"'));
        catalog
    }

    #[test]
    fn test_inventory_view() {
        let catalog = catalog();
        let mut inventory = Inventory::new();
        let empty = InventoryView {
            inventory: &inventory,
            catalog: Some(&catalog),
        };
        assert_eq!(empty.to_string(), "No resources in your inventory!");

        inventory.add("wood", 3).unwrap();
        inventory.add("gold", 1).unwrap();
        let view = InventoryView {
            inventory: &inventory,
            catalog: Some(&catalog),
        };
        assert_eq!(
            view.to_string(),
            "Inventory (2 resource types)\n\twood : 3 (Logs)\n\tgold : 1"
        );
    }

    #[test]
    fn test_creations_view() {
        let creations = vec![
            Creatable::new("house", "A small house", 2).with_pre_requisite("wood", 2),
        ];
        let inventory = Inventory::new();
        let view = CreationsView {
            creations: &creations,
            inventory: Some(&inventory),
        };
        assert_eq!(
            view.to_string(),
            "Creations (0 of 1 complete)\nhouse (A small house) 0% complete\n\twood : 2\n\t(waiting for resources)"
        );

        let none = CreationsView {
            creations: &[],
            inventory: None,
        };
        assert_eq!(none.to_string(), "Nothing under construction.");
    }

    #[test]
    fn test_map_view_glyphs() {
        let catalog = catalog();
        let mut map = WorldMap::new("Test", 3, 2);
        map.set(0, 0, Some("grass".into())).unwrap();
        map.set(2, 1, Some("castle".into())).unwrap();

        let view = MapView {
            map: &map,
            catalog: Some(&catalog),
        };
        assert_eq!(view.to_string(), "Test (3x2)\n\"..\n..c");
    }
}
