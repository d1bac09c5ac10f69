//! Types used for defining ships and their placement state.
use std::{fmt::Debug, hash::Hash};

use serde::Deserialize;

use crate::board::Axis;

pub use self::placement::{CellSlot, PlacedShip, ShipPlacement, SpriteRegion};

mod placement;

/// Trait for types that can be used as a Ship's ID within a placement session.
/// IDs are treated as disposable and cheaply cloneable. If you need a complex ID type
/// that isn't cheap to clone, you may want to wrap it in `Rc` or `Arc`.
///
/// Auto-implemented for any type which implements `Debug`,`Clone`, `Eq`, and `Hash`.
pub trait ShipId: Debug + Clone + Eq + Hash {}
impl<T: Debug + Clone + Eq + Hash> ShipId for T {}

/// Class of a ship, which fixes how many cells it occupies.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipClass {
    /// Patrol boat: length 2.
    Patrol,
    /// Frigate: length 3.
    Frigate,
    /// Destroyer: length 3.
    Destroyer,
    /// Battleship: length 4.
    Battleship,
    /// Carrier: length 5.
    Carrier,
}

impl ShipClass {
    /// Every ship class, in the order a standard fleet is placed.
    pub const ALL: &'static [ShipClass] = &[
        ShipClass::Carrier,
        ShipClass::Battleship,
        ShipClass::Destroyer,
        ShipClass::Frigate,
        ShipClass::Patrol,
    ];

    /// Get the length of this ship class in cells.
    pub fn len(self) -> usize {
        match self {
            ShipClass::Patrol => 2,
            ShipClass::Frigate => 3,
            ShipClass::Destroyer => 3,
            ShipClass::Battleship => 4,
            ShipClass::Carrier => 5,
        }
    }
}

/// Placement orientation of a ship.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Orientation {
    /// The ship extends along a row.
    Horizontal,
    /// The ship extends along a column.
    Vertical,
}

impl Orientation {
    /// The axis the ship extends along.
    pub fn axis(self) -> Axis {
        match self {
            Orientation::Horizontal => Axis::X,
            Orientation::Vertical => Axis::Y,
        }
    }

    /// The orientation after a quarter turn.
    pub fn rotated(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Horizontal
    }
}

#[cfg(feature = "rng_gen")]
mod rng_gen {
    use rand::{
        distributions::{Distribution, Standard},
        Rng,
    };

    use super::Orientation;

    impl Distribution<Orientation> for Standard {
        fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Orientation {
            if rng.gen() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            }
        }
    }
}
