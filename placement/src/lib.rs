//! Ship placement for a grid-based game of Battleship.
//!
//! A ship being placed follows the pointer: [`PlacementEngine::highlight_squares`] maps
//! the pointer's pixel position onto the grid and records which cells the ship would
//! cover and which of those are on the board. Once the player confirms, the engine
//! snaps the ship's sprite to the center of its cells and freezes it as a
//! [`PlacedShip`].
//!
//! [`PlacementSession`] drives that flow for a whole fleet, and [`config`] loads the
//! board layout from TOML.

pub mod board;
pub mod config;
pub mod engine;
pub mod ships;

pub use crate::{
    board::{BoardContext, Cell, PlacementSession, Region},
    engine::{Highlight, PlacementEngine},
    ships::{Orientation, PlacedShip, ShipClass, ShipPlacement},
};
