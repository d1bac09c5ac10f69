//! Errors used by the `BoardContext`, the `PlacementEngine` and the `PlacementSession`.

use std::fmt::{self, Debug};

use thiserror::Error;

use crate::ships::ShipClass;

/// Reason a [`BoardContext`][crate::board::BoardContext] could not be built.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum BoardError {
    /// The grid must have at least one cell per side.
    #[error("the grid must have at least one cell per side")]
    EmptyGrid,
    /// The tile size was given as zero.
    #[error("the tile size must be nonzero")]
    ZeroTileSize,
    /// The board is narrower than one pixel per cell.
    #[error("a board {board_width}px wide cannot fit {grid_size} cells per side")]
    TileTooSmall { board_width: u32, grid_size: u32 },
    /// The board does not fit in pixel space.
    #[error("the board is too large")]
    TooLarge,
}

/// Error returned when trying to add a ship that already existed.
#[derive(Error)]
#[error("ship with id {id:?} already exists")]
pub struct AddShipError<I: Debug> {
    /// ID of the ship that was attempted to be added.
    id: I,
    /// The class of the ship that was not added because another ship with the same ID
    /// already existed.
    class: ShipClass,
}

impl<I: Debug> AddShipError<I> {
    /// Create an [`AddShipError`] for the ship with the given ID and class.
    pub(super) fn new(id: I, class: ShipClass) -> Self {
        Self { id, class }
    }

    /// The id that was added.
    pub fn id(&self) -> &I {
        &self.id
    }

    /// The class that was added.
    pub fn class(&self) -> ShipClass {
        self.class
    }

    /// Extract the ID and class from this error.
    pub fn into_inner(self) -> (I, ShipClass) {
        (self.id, self.class)
    }
}

impl<I: Debug> Debug for AddShipError<I> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Reason why a ship could not be centered on the grid and committed.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotPlaceReason {
    /// None of the ship's cells are selected, either because it was never highlighted or
    /// because the pointer left the grid across the ship's cross axis.
    #[error("the ship is not over the board")]
    NotSelected,
    /// Some, but not all, of the ship's cells are off the grid.
    #[error("the ship does not fit on the board at this position")]
    OutOfBounds,
}

/// Error caused when attempting to commit a ship that is not fully on the grid.
#[derive(Error)]
#[error("could not place ship: {reason}")]
pub struct PlaceError<P> {
    #[source]
    reason: CannotPlaceReason,
    placement: P,
}

impl<P> Debug for PlaceError<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<P> PlaceError<P> {
    /// Construct a placement error from a reason and the rejected placement.
    pub(crate) fn new(reason: CannotPlaceReason, placement: P) -> Self {
        Self { reason, placement }
    }

    /// Get the reason placement was aborted.
    pub fn reason(&self) -> CannotPlaceReason {
        self.reason
    }

    /// Get a reference to the placement that was rejected.
    pub fn placement(&self) -> &P {
        &self.placement
    }

    /// Extract the placement from this error.
    pub fn into_placement(self) -> P {
        self.placement
    }
}

/// Error returned by the operations of a
/// [`PlacementSession`][crate::board::PlacementSession].
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum SessionError {
    /// No ship is currently following the pointer.
    #[error("no ship is selected for placement")]
    NoActiveShip,
    /// The session has no ship with the requested ID.
    #[error("no such ship")]
    UnknownShip,
    /// The requested ship was already committed.
    #[error("ship was already placed")]
    AlreadyPlaced,
    /// The active ship could not be committed at its current position.
    #[error("could not place ship: {0}")]
    Place(#[from] CannotPlaceReason),
}
