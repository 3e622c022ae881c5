//! World Map
//!
//! A fixed-size grid of optional tile markers. Every access is bounds-checked;
//! coordinates outside the grid are an error, never clamped or wrapped.

use bevy_ecs::prelude::*;
use rand::Rng;

use crate::error::MapError;

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct WorldMap {
    name: String,
    width: u32,
    height: u32,
    /// Row-major cells, `None` when empty
    cells: Vec<Option<String>>,
}

impl WorldMap {
    /// An empty map of the given size
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Result<usize, MapError> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return Err(MapError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
                map: self.name.clone(),
            });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Result<Option<&str>, MapError> {
        let index = self.index(x, y)?;
        Ok(self.cells[index].as_deref())
    }

    /// Place (or clear, with `None`) a marker. Returns what was there before.
    pub fn set(&mut self, x: i32, y: i32, value: Option<String>) -> Result<Option<String>, MapError> {
        let index = self.index(x, y)?;
        Ok(std::mem::replace(&mut self.cells[index], value))
    }

    pub fn is_empty_at(&self, x: i32, y: i32) -> Result<bool, MapError> {
        Ok(self.get(x, y)?.is_none())
    }

    /// Reset every cell to empty, then scatter `count` copies of `marker` onto random
    /// empty cells.
    ///
    /// Stops after `max_attempts` random picks even if fewer markers were placed.
    /// Returns the number actually placed.
    pub fn initialise<R: Rng>(
        &mut self,
        rng: &mut R,
        marker: &str,
        count: usize,
        max_attempts: usize,
    ) -> usize {
        self.cells = vec![None; self.width as usize * self.height as usize];
        if self.cells.is_empty() {
            return 0;
        }

        let mut placed = 0;
        let mut attempts = 0;
        while placed < count && attempts < max_attempts {
            attempts += 1;
            let x = rng.gen_range(0..self.width) as usize;
            let y = rng.gen_range(0..self.height) as usize;
            let cell = &mut self.cells[y * self.width as usize + x];
            if cell.is_none() {
                *cell = Some(marker.to_string());
                placed += 1;
            }
        }

        if placed < count {
            tracing::warn!(
                "Placed only {} of {} '{}' on map '{}' after {} attempts",
                placed,
                count,
                marker,
                self.name,
                attempts
            );
        }
        tracing::debug!("Map '{}': {} '{}' placed", self.name, placed, marker);
        placed
    }

    /// Number of cells holding `marker`
    pub fn count_of(&self, marker: &str) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.as_deref() == Some(marker))
            .count()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Rows from top (y = 0) to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Option<String>]> {
        self.cells.chunks(self.width.max(1) as usize)
    }
}
