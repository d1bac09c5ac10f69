//! Board layout loaded from TOML.
//!
//! ```toml
//! origin_x = 25
//! origin_y = 100
//! board_width = 400
//! grid_size = 10
//! fleet = ["carrier", "battleship", "destroyer", "frigate", "patrol"]
//!
//! [rotate_button]
//! x = 450
//! y = 100
//! width = 80
//! height = 40
//! ```
//!
//! Every key is optional and falls back to [`BoardConfig::default`].
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use glam::IVec2;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    board::{BoardContext, BoardError, Region},
    ships::ShipClass,
};

/// Error loading a [`BoardConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The config was not valid TOML or had unexpected keys.
    #[error("failed to parse board config")]
    Parse(#[from] toml::de::Error),
    /// The board dimensions do not describe a usable grid.
    #[error("invalid board dimensions")]
    Board(#[from] BoardError),
    /// A ship class appears more than once in the fleet.
    #[error("fleet lists {0:?} more than once")]
    DuplicateShip(ShipClass),
}

/// Pixel rectangle as written in the config file.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegionConfig {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            x: 450,
            y: 100,
            width: 80,
            height: 40,
        }
    }
}

impl From<RegionConfig> for Region {
    fn from(region: RegionConfig) -> Self {
        Region::new(
            IVec2::new(region.x, region.y),
            IVec2::new(region.width, region.height),
        )
    }
}

/// Layout of the placement screen and the fleet to place.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    /// Pixel `x` of the grid's top-left corner.
    pub origin_x: i32,
    /// Pixel `y` of the grid's top-left corner.
    pub origin_y: i32,
    /// Width of the whole grid in pixels.
    pub board_width: u32,
    /// Cells per side.
    pub grid_size: u32,
    /// Area that rotates the active ship when clicked.
    pub rotate_button: RegionConfig,
    /// Ships to place, in order. Each class may appear at most once, since the class is
    /// what identifies a ship during placement.
    pub fleet: Vec<ShipClass>,
}

impl Default for BoardConfig {
    /// A 10x10 grid of 40px tiles and one ship of each class.
    fn default() -> Self {
        Self {
            origin_x: 25,
            origin_y: 100,
            board_width: 400,
            grid_size: 10,
            rotate_button: RegionConfig::default(),
            fleet: ShipClass::ALL.to_vec(),
        }
    }
}

impl BoardConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.check_fleet()?;
        Ok(config)
    }

    /// Check that no ship class is listed twice.
    pub fn check_fleet(&self) -> Result<(), ConfigError> {
        for (i, class) in self.fleet.iter().enumerate() {
            if self.fleet[..i].contains(class) {
                return Err(ConfigError::DuplicateShip(*class));
            }
        }
        Ok(())
    }

    /// Read and parse a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Build the [`BoardContext`] described by this config.
    pub fn board(&self) -> Result<BoardContext, ConfigError> {
        Ok(BoardContext::new(
            IVec2::new(self.origin_x, self.origin_y),
            self.board_width,
            self.grid_size,
        )?)
    }

    /// The rotate button's pixel area.
    pub fn rotate_button(&self) -> Region {
        self.rotate_button.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = BoardConfig::from_toml_str("").unwrap();
        assert_eq!(config, BoardConfig::default());
        let board = config.board().unwrap();
        assert_eq!(board.tile_size(), 40);
        assert_eq!(board.origin(), IVec2::new(25, 100));
    }

    #[test]
    fn parses_fleet_and_button() {
        let config = BoardConfig::from_toml_str(
            r#"
            grid_size = 8
            board_width = 320
            fleet = ["patrol", "carrier"]

            [rotate_button]
            x = 10
            y = 20
            "#,
        )
        .unwrap();
        assert_eq!(config.fleet, vec![ShipClass::Patrol, ShipClass::Carrier]);
        assert_eq!(
            config.rotate_button(),
            Region::new(IVec2::new(10, 20), IVec2::new(80, 40))
        );
        assert_eq!(config.board().unwrap().tile_size(), 40);
    }

    #[test]
    fn rejects_unknown_keys_and_ships() {
        assert!(matches!(
            BoardConfig::from_toml_str("tile = 3"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            BoardConfig::from_toml_str(r#"fleet = ["submarine"]"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn rejects_repeated_ship_class() {
        let err = BoardConfig::from_toml_str(r#"fleet = ["destroyer", "patrol", "destroyer"]"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateShip(ShipClass::Destroyer)));
        assert_eq!(err.to_string(), "fleet lists Destroyer more than once");
    }

    #[test]
    fn rejects_unusable_board() {
        let config = BoardConfig {
            grid_size: 0,
            ..BoardConfig::default()
        };
        assert!(matches!(
            config.board(),
            Err(ConfigError::Board(BoardError::EmptyGrid))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = BoardConfig::load("/nonexistent/board.toml").unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to read config file /nonexistent/board.toml"
        );
    }
}
