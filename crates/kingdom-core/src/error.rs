//! Error types for loading, map access, inventory and game transitions.

use std::path::PathBuf;
use thiserror::Error;

use crate::game::GameState;

/// A catalog source could not be read or has the wrong shape.
///
/// Load errors are fatal for the load in progress: no partial catalog is installed.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("malformed document root: {0}")]
    MalformedRoot(String),
}

/// Out-of-bounds access to the world map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("position ({x}, {y}) is outside map '{map}' ({width}x{height})")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        map: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("cannot add zero of '{0}'")]
    ZeroCount(String),

    #[error("not enough '{resource}': need {needed}, have {held}")]
    Insufficient {
        resource: String,
        needed: u32,
        held: u32,
    },
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("cannot move from '{from}' to '{to}'")]
    InvalidTransition { from: GameState, to: GameState },

    #[error("game is not being played (state: {0})")]
    NotPlaying(GameState),

    #[error("unknown resource '{0}'")]
    UnknownResource(String),

    #[error("unknown creatable '{0}'")]
    UnknownCreatable(String),

    #[error("the world map has not been generated yet")]
    MapUnavailable,

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// Configuration file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_message() {
        let err = MapError::OutOfBounds {
            x: -1,
            y: 0,
            width: 10,
            height: 5,
            map: "Kingdom".into(),
        };
        assert_eq!(
            err.to_string(),
            "position (-1, 0) is outside map 'Kingdom' (10x5)"
        );
    }

    #[test]
    fn test_transition_message() {
        let err = GameError::InvalidTransition {
            from: GameState::GameOver,
            to: GameState::Playing,
        };
        assert_eq!(err.to_string(), "cannot move from 'game over' to 'playing'");
    }
}
