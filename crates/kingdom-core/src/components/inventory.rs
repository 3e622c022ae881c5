//! Player Inventory
//!
//! Held resource quantities, keyed by resource name, in the order each resource was
//! first acquired. Quantities are unsigned and never drop below zero.

use bevy_ecs::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::creatable::Creatable;
use crate::error::InventoryError;

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    holdings: Vec<(String, u32)>,
    index: HashMap<String, usize>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, resource: &str) -> &mut u32 {
        let slot = match self.index.get(resource) {
            Some(&slot) => slot,
            None => {
                let slot = self.holdings.len();
                self.holdings.push((resource.to_string(), 0));
                self.index.insert(resource.to_string(), slot);
                slot
            }
        };
        &mut self.holdings[slot].1
    }

    /// Add `count` of a resource, creating the entry at zero first if needed.
    /// Returns the new quantity.
    pub fn add(&mut self, resource: &str, count: u32) -> Result<u32, InventoryError> {
        if count == 0 {
            return Err(InventoryError::ZeroCount(resource.to_string()));
        }
        let held = self.slot_mut(resource);
        *held = held.saturating_add(count);
        Ok(*held)
    }

    /// Overwrite the held quantity. Returns the previous quantity.
    pub fn set(&mut self, resource: &str, count: u32) -> u32 {
        std::mem::replace(self.slot_mut(resource), count)
    }

    /// Held quantity, or `None` if the resource was never acquired
    pub fn get(&self, resource: &str) -> Option<u32> {
        self.index.get(resource).map(|&slot| self.holdings[slot].1)
    }

    pub fn quantity(&self, resource: &str) -> u32 {
        self.get(resource).unwrap_or(0)
    }

    pub fn contains(&self, resource: &str) -> bool {
        self.index.contains_key(resource)
    }

    /// True only if every prerequisite of the creatable is held in sufficient quantity
    pub fn can_afford(&self, creatable: &Creatable) -> bool {
        self.covers(creatable.pre_requisites())
    }

    /// True only if every (resource, count) requirement is met. A resource that was
    /// never acquired fails the check even for a zero count.
    pub fn covers(&self, requirements: &BTreeMap<String, u32>) -> bool {
        requirements.iter().all(|(resource, &needed)| match self.get(resource) {
            Some(held) => held >= needed,
            None => false,
        })
    }

    /// Deduct every requirement, or nothing at all if any one is short.
    pub fn consume(&mut self, requirements: &BTreeMap<String, u32>) -> Result<(), InventoryError> {
        for (resource, &needed) in requirements {
            let held = self.get(resource);
            if held.map_or(true, |held| held < needed) {
                return Err(InventoryError::Insufficient {
                    resource: resource.clone(),
                    needed,
                    held: held.unwrap_or(0),
                });
            }
        }

        for (resource, &needed) in requirements {
            let held = self.slot_mut(resource);
            *held -= needed;
        }
        Ok(())
    }

    /// (resource, quantity) pairs in acquisition order
    pub fn summary(&self) -> Vec<(&str, u32)> {
        self.holdings
            .iter()
            .map(|(resource, count)| (resource.as_str(), *count))
            .collect()
    }

    pub fn resource_type_count(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "No resources in your inventory!");
        }
        write!(f, "Inventory ({} resource types)", self.resource_type_count())?;
        for (resource, count) in &self.holdings {
            write!(f, "\n\t{} : {}", resource, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stocked(items: &[(&str, u32)]) -> Inventory {
        let mut inventory = Inventory::new();
        for (resource, count) in items {
            inventory.add(resource, *count).unwrap();
        }
        inventory
    }

    fn needs(items: &[(&str, u32)]) -> Creatable {
        items
            .iter()
            .fold(Creatable::new("test", "test", 1), |c, (r, n)| {
                c.with_pre_requisite(*r, *n)
            })
    }

    #[test]
    fn test_add_creates_and_accumulates() {
        let mut inventory = Inventory::new();
        assert_eq!(inventory.add("wood", 2).unwrap(), 2);
        assert_eq!(inventory.add("wood", 3).unwrap(), 5);
        assert_eq!(inventory.quantity("wood"), 5);
        assert_eq!(inventory.quantity("gold"), 0);
        assert!(inventory.get("gold").is_none());
    }

    #[test]
    fn test_add_zero_is_rejected() {
        let mut inventory = Inventory::new();
        assert_eq!(
            inventory.add("wood", 0),
            Err(InventoryError::ZeroCount("wood".into()))
        );
        assert!(!inventory.contains("wood"));
    }

    #[test]
    fn test_can_afford() {
        let inventory = stocked(&[("wood", 2), ("stone", 5)]);

        assert!(!inventory.can_afford(&needs(&[("wood", 3)])));
        assert!(inventory.can_afford(&needs(&[("wood", 2), ("stone", 1)])));
        assert!(!inventory.can_afford(&needs(&[("wood", 1), ("gold", 1)])));
        assert!(inventory.can_afford(&needs(&[])));
    }

    #[test]
    fn test_consume_is_all_or_nothing() {
        let mut inventory = stocked(&[("wood", 5), ("stone", 1)]);
        let short = needs(&[("wood", 2), ("stone", 2)]);

        assert_eq!(
            inventory.consume(short.pre_requisites()),
            Err(InventoryError::Insufficient {
                resource: "stone".into(),
                needed: 2,
                held: 1
            })
        );
        assert_eq!(inventory.quantity("wood"), 5);

        inventory
            .consume(needs(&[("wood", 5), ("stone", 1)]).pre_requisites())
            .unwrap();
        assert_eq!(inventory.quantity("wood"), 0);
        assert_eq!(inventory.quantity("stone"), 0);
        assert!(inventory.contains("wood"));
    }

    #[test]
    fn test_summary_keeps_insertion_order() {
        let mut inventory = stocked(&[("stone", 1), ("wood", 1), ("grain", 4)]);
        inventory.add("stone", 2).unwrap();
        assert_eq!(
            inventory.summary(),
            vec![("stone", 3), ("wood", 1), ("grain", 4)]
        );
    }

    #[test]
    fn test_set_returns_previous() {
        let mut inventory = stocked(&[("bread", 4)]);
        assert_eq!(inventory.set("bread", 1), 4);
        assert_eq!(inventory.set("ale", 2), 0);
        assert_eq!(inventory.summary(), vec![("bread", 1), ("ale", 2)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Inventory::new().to_string(), "No resources in your inventory!");
        let inventory = stocked(&[("wood", 2), ("stone", 5)]);
        assert_eq!(
            inventory.to_string(),
            "Inventory (2 resource types)\n\twood : 2\n\tstone : 5"
        );
    }
}
