//! Maps the pointer onto the cells a ship covers, and snaps confirmed ships to the grid.
use glam::{IVec2, Vec2};
use log::{debug, info, trace};

use crate::{
    board::{geometry, BoardContext, CannotPlaceReason, Cell, PlaceError},
    ships::{PlacedShip, ShipPlacement},
};

/// Outcome of a single highlight pass.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Highlight {
    /// Every cell of the ship is on the grid.
    Valid,
    /// The ship's row or column is on the grid but some of its cells hang off the end.
    Partial,
    /// The ship's row or column is off the grid; nothing is selected.
    Deselected,
}

/// Stateless placement operations bound to one board.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PlacementEngine {
    board: BoardContext,
}

impl PlacementEngine {
    pub fn new(board: BoardContext) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &BoardContext {
        &self.board
    }

    /// The cell the pointer designates as the middle of the ship, as raw `(col, row)`
    /// indices that may lie off the grid. The pointer is shifted back half a tile along
    /// the placement axis so that it marks the ship's midpoint rather than a cell corner.
    pub fn anchor_cell(&self, pointer: IVec2, ship: &ShipPlacement) -> (i32, i32) {
        let axis = ship.orientation().axis();
        let origin = self.board.origin();
        let tile = self.board.tile_size();
        let along = geometry::pixel_to_cell(
            axis.pick(pointer.x, pointer.y).saturating_sub(tile / 2),
            axis.pick(origin.x, origin.y),
            tile,
        );
        let cross = geometry::pixel_to_cell(
            axis.cross().pick(pointer.x, pointer.y),
            axis.cross().pick(origin.x, origin.y),
            tile,
        );
        axis.compose(along, cross)
    }

    /// Recompute which cells `ship` covers with its midpoint under `pointer`.
    ///
    /// The ship is laid out along its placement axis starting `(len - 1) / 2` cells
    /// before the anchor cell, so even-length ships sit one cell toward the lower
    /// coordinates. Cells off the end of the grid are marked invalid and keep their
    /// previous coordinates. If the anchor's row (or column, for vertical ships) is off
    /// the grid the whole ship is deselected. Any pointer position is accepted.
    pub fn highlight_squares(&self, pointer: IVec2, ship: &mut ShipPlacement) -> Highlight {
        let axis = ship.orientation().axis();
        let (col, row) = self.anchor_cell(pointer, ship);
        let along = axis.pick(col, row);
        let cross = axis.cross().pick(col, row);

        if !self.board.in_bounds(cross) {
            debug!(
                "pointer {:?} is off the grid for {:?}, deselecting",
                pointer,
                ship.class()
            );
            ship.deselect_squares();
            return Highlight::Deselected;
        }

        ship.mark_on_grid();
        let start = along.saturating_sub((ship.len() as i32 - 1) / 2);
        let mut all_valid = true;
        for (i, slot) in ship.slots_mut().iter_mut().enumerate() {
            let candidate = start.saturating_add(i as i32);
            if self.board.in_bounds(candidate) {
                slot.select(Cell::from(axis.compose(candidate as usize, cross as usize)));
            } else {
                slot.deselect();
                all_valid = false;
            }
        }
        trace!(
            "highlighted {:?} at anchor ({}, {}): {:?}",
            ship.class(),
            col,
            row,
            ship.slots()
        );
        if all_valid {
            Highlight::Valid
        } else {
            Highlight::Partial
        }
    }

    /// Pixel position at the geometric center of the ship's current cells, computed
    /// without checking that they are valid. A partially selected ship gets a position
    /// derived from stale cells.
    pub fn center_unchecked(&self, ship: &ShipPlacement) -> Vec2 {
        let axis = ship.orientation().axis();
        let origin = self.board.origin();
        let tile = self.board.tile_size();
        let len = ship.len();
        let pivot = ship.slots()[len / 2].cell();

        // Odd ships have a pivot cell that straddles the center; even ships have a pivot
        // that starts right at the center.
        let parity = (len % 2) as f32 * geometry::half_tile(tile);
        let along = geometry::cell_to_pixel(
            pivot.along(axis) as i32,
            axis.pick(origin.x, origin.y),
            tile,
        ) as f32
            + parity;
        let cross = geometry::cell_to_pixel_center(
            pivot.along(axis.cross()) as i32,
            axis.cross().pick(origin.x, origin.y),
            tile,
        );
        Vec2::from(axis.compose(along, cross))
    }

    /// Snap a fully selected ship to the center of its cells, recording and returning
    /// the new anchor. Rejects ships with any invalid cell without touching them.
    pub fn center_ship_on_grid(
        &self,
        ship: &mut ShipPlacement,
    ) -> Result<Vec2, CannotPlaceReason> {
        check_selected(ship)?;
        let anchor = self.center_unchecked(ship);
        ship.set_anchor(anchor);
        Ok(anchor)
    }

    /// Center the ship and freeze it. On failure the placement is returned unchanged
    /// inside the error.
    pub fn commit(
        &self,
        mut ship: ShipPlacement,
    ) -> Result<PlacedShip, PlaceError<ShipPlacement>> {
        let anchor = match self.center_ship_on_grid(&mut ship) {
            Ok(anchor) => anchor,
            Err(reason) => return Err(PlaceError::new(reason, ship)),
        };
        info!(
            "placed {:?} {:?} at {:?}",
            ship.class(),
            ship.orientation(),
            anchor
        );
        Ok(PlacedShip::new(&ship, anchor, self.board.tile_size()))
    }
}

/// Check that every cell of the ship is selected.
fn check_selected(ship: &ShipPlacement) -> Result<(), CannotPlaceReason> {
    if ship.is_deselected() {
        Err(CannotPlaceReason::NotSelected)
    } else if !ship.is_fully_valid() {
        Err(CannotPlaceReason::OutOfBounds)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ships::{Orientation, ShipClass};

    fn engine(origin: IVec2) -> PlacementEngine {
        PlacementEngine::new(BoardContext::new(origin, 400, 10).unwrap())
    }

    fn cells(ship: &ShipPlacement) -> Vec<(usize, usize)> {
        ship.slots().iter().map(|slot| slot.cell().into()).collect()
    }

    #[test]
    fn anchor_bias_is_along_placement_axis_only() {
        let engine = engine(IVec2::ZERO);
        let horizontal = ShipPlacement::new(ShipClass::Frigate);
        let vertical =
            ShipPlacement::with_orientation(ShipClass::Frigate, Orientation::Vertical);
        // 85 - 20 = 65 -> 1; 125 -> 3
        assert_eq!(engine.anchor_cell(IVec2::new(85, 125), &horizontal), (1, 3));
        // 85 -> 2; 125 - 20 = 105 -> 2
        assert_eq!(engine.anchor_cell(IVec2::new(85, 125), &vertical), (2, 2));
    }

    #[test]
    fn vertical_ship_extends_down_a_column() {
        let engine = engine(IVec2::new(25, 100));
        let mut ship =
            ShipPlacement::with_orientation(ShipClass::Battleship, Orientation::Vertical);
        // col (130 - 25) / 40 = 2, row (260 - 20 - 100) / 40 = 3
        assert_eq!(
            engine.highlight_squares(IVec2::new(130, 260), &mut ship),
            Highlight::Valid
        );
        assert_eq!(cells(&ship), vec![(2, 2), (2, 3), (2, 4), (2, 5)]);
    }

    #[test]
    fn out_of_bounds_cells_keep_previous_coordinates() {
        let engine = engine(IVec2::ZERO);
        let mut ship = ShipPlacement::new(ShipClass::Carrier);
        engine.highlight_squares(IVec2::new(100, 20), &mut ship);
        assert_eq!(cells(&ship), vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);

        // Anchor column 9: candidates 7..=11, the last two are off the grid.
        assert_eq!(
            engine.highlight_squares(IVec2::new(380, 60), &mut ship),
            Highlight::Partial
        );
        assert_eq!(cells(&ship), vec![(7, 1), (8, 1), (9, 1), (3, 0), (4, 0)]);
        let valid: Vec<bool> = ship.slots().iter().map(|slot| slot.valid()).collect();
        assert_eq!(valid, vec![true, true, true, false, false]);
    }

    #[test]
    fn cross_axis_off_grid_deselects_everything() {
        let engine = engine(IVec2::ZERO);
        let mut ship = ShipPlacement::new(ShipClass::Frigate);
        engine.highlight_squares(IVec2::new(100, 100), &mut ship);
        let before = cells(&ship);
        assert_eq!(
            engine.highlight_squares(IVec2::new(100, 400), &mut ship),
            Highlight::Deselected
        );
        assert!(ship.is_deselected());
        assert_eq!(cells(&ship), before);
        assert_eq!(
            engine.highlight_squares(IVec2::new(100, -1), &mut ship),
            Highlight::Deselected
        );
    }

    #[test]
    fn cross_axis_off_grid_deselects_vertical_ship() {
        let engine = engine(IVec2::new(25, 100));
        let mut ship =
            ShipPlacement::with_orientation(ShipClass::Destroyer, Orientation::Vertical);
        engine.highlight_squares(IVec2::new(130, 260), &mut ship);
        let before = cells(&ship);
        // Column (10 - 25) / 40 floors to -1.
        assert_eq!(
            engine.highlight_squares(IVec2::new(10, 260), &mut ship),
            Highlight::Deselected
        );
        assert!(ship.is_deselected());
        assert_eq!(cells(&ship), before);
        assert_eq!(
            engine.highlight_squares(IVec2::new(i32::MAX, 260), &mut ship),
            Highlight::Deselected
        );
    }

    #[test]
    fn center_rejects_partial_selection() {
        let engine = engine(IVec2::ZERO);
        let mut ship = ShipPlacement::new(ShipClass::Battleship);
        assert_eq!(
            engine.center_ship_on_grid(&mut ship),
            Err(CannotPlaceReason::NotSelected)
        );
        engine.highlight_squares(IVec2::new(20, 20), &mut ship);
        assert_eq!(
            engine.center_ship_on_grid(&mut ship),
            Err(CannotPlaceReason::OutOfBounds)
        );
        assert_eq!(ship.anchor(), None);
    }

    #[test]
    fn center_unchecked_uses_stale_cells_without_panicking() {
        let engine = engine(IVec2::ZERO);
        let mut ship = ShipPlacement::new(ShipClass::Patrol);
        ship.deselect_squares();
        // Both slots still hold (0, 0): pivot index 1, even length.
        assert_eq!(engine.center_unchecked(&ship), Vec2::new(0.0, 20.0));
    }

    #[test]
    fn commit_returns_placement_on_failure() {
        let engine = engine(IVec2::ZERO);
        let ship = ShipPlacement::new(ShipClass::Destroyer);
        let err = engine.commit(ship.clone()).unwrap_err();
        assert_eq!(err.reason(), CannotPlaceReason::NotSelected);
        assert_eq!(err.into_placement(), ship);
    }

    #[test]
    fn commit_freezes_cells_and_anchor() {
        let engine = engine(IVec2::new(25, 100));
        let mut ship = ShipPlacement::new(ShipClass::Destroyer);
        engine.highlight_squares(IVec2::new(150, 150), &mut ship);
        let placed = engine.commit(ship).unwrap();
        assert_eq!(
            placed.cells(),
            &[Cell::new(1, 1), Cell::new(2, 1), Cell::new(3, 1)][..]
        );
        assert_eq!(placed.anchor(), Vec2::new(125.0, 160.0));
    }
}
