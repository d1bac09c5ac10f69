// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use glam::Vec2;

use crate::{
    board::Cell,
    ships::{Orientation, ShipClass},
};

/// One cell a ship covers while it is being placed, and whether that cell is on the
/// grid for the latest highlight pass.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct CellSlot {
    cell: Cell,
    valid: bool,
}

impl CellSlot {
    /// The cell last written to this slot. Stale when [`valid`][Self::valid] is false.
    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Whether this slot's cell is on the grid and should be drawn as selected.
    pub fn valid(&self) -> bool {
        self.valid
    }

    /// The cell, only if it is valid.
    pub fn selected(&self) -> Option<Cell> {
        if self.valid {
            Some(self.cell)
        } else {
            None
        }
    }

    pub(crate) fn select(&mut self, cell: Cell) {
        self.cell = cell;
        self.valid = true;
    }

    pub(crate) fn deselect(&mut self) {
        self.valid = false;
    }
}

/// Mutable state of a ship that is following the pointer.
///
/// Holds exactly one [`CellSlot`] per cell of the ship's length, ordered from the lowest
/// to the highest coordinate along the placement axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipPlacement {
    class: ShipClass,
    orientation: Orientation,
    slots: Box<[CellSlot]>,
    /// Set when the ship's row or column is off the grid, or before the first highlight.
    deselected: bool,
    anchor: Option<Vec2>,
}

impl ShipPlacement {
    /// Start placing a horizontal ship of the given class. No cells are selected.
    pub fn new(class: ShipClass) -> Self {
        Self::with_orientation(class, Orientation::default())
    }

    /// Start placing a ship of the given class and orientation. No cells are selected.
    pub fn with_orientation(class: ShipClass, orientation: Orientation) -> Self {
        Self {
            class,
            orientation,
            slots: vec![CellSlot::default(); class.len()].into_boxed_slice(),
            deselected: true,
            anchor: None,
        }
    }

    pub fn class(&self) -> ShipClass {
        self.class
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Change orientation. Cells are left as they were until the next highlight pass.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Turn the ship a quarter turn and return the new orientation.
    pub fn rotate(&mut self) -> Orientation {
        self.orientation = self.orientation.rotated();
        self.orientation
    }

    /// Number of cells this ship covers.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// The ship's cells in placement-axis order.
    pub fn slots(&self) -> &[CellSlot] {
        &self.slots
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [CellSlot] {
        &mut self.slots
    }

    /// Iterate the cells that should be drawn as selected.
    pub fn selected_cells<'a>(&'a self) -> impl 'a + Iterator<Item = Cell> {
        self.slots.iter().filter_map(CellSlot::selected)
    }

    /// Returns true if every cell of the ship is on the grid.
    pub fn is_fully_valid(&self) -> bool {
        self.slots.iter().all(CellSlot::valid)
    }

    /// Returns true if the ship has been deselected, either explicitly or because its row
    /// (or column) was off the grid on the last highlight pass. A ship whose row is on
    /// the grid but whose cells all hang off the end is partial, not deselected.
    pub fn is_deselected(&self) -> bool {
        self.deselected
    }

    /// Clear the selection of every cell. Cell coordinates are kept as they were.
    pub fn deselect_squares(&mut self) {
        self.deselected = true;
        for slot in self.slots.iter_mut() {
            slot.deselect();
        }
    }

    pub(crate) fn mark_on_grid(&mut self) {
        self.deselected = false;
    }

    /// Pixel position the sprite is drawn around, if the ship has been centered.
    pub fn anchor(&self) -> Option<Vec2> {
        self.anchor
    }

    pub(crate) fn set_anchor(&mut self, anchor: Vec2) {
        self.anchor = Some(anchor);
    }
}

/// Pixel rectangle a ship's sprite is drawn into.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpriteRegion {
    pub top_left: Vec2,
    pub size: Vec2,
}

/// A ship whose placement has been confirmed. Immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedShip {
    class: ShipClass,
    orientation: Orientation,
    cells: Box<[Cell]>,
    anchor: Vec2,
    tile_size: i32,
}

impl PlacedShip {
    /// Freeze a fully valid, centered placement.
    pub(crate) fn new(placement: &ShipPlacement, anchor: Vec2, tile_size: i32) -> Self {
        Self {
            class: placement.class,
            orientation: placement.orientation,
            cells: placement.slots.iter().map(CellSlot::cell).collect(),
            anchor,
            tile_size,
        }
    }

    pub fn class(&self) -> ShipClass {
        self.class
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Cells covered by the ship in placement-axis order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Pixel position at the geometric center of the ship's cells.
    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    /// Rectangle the ship's sprite covers: its length in tiles along the placement axis
    /// and one tile across, centered on the anchor.
    pub fn sprite_region(&self) -> SpriteRegion {
        let tile = self.tile_size as f32;
        let along = self.cells.len() as f32 * tile;
        let size = Vec2::from(self.orientation.axis().compose(along, tile));
        SpriteRegion {
            top_left: self.anchor - size * 0.5,
            size,
        }
    }

    /// Thaw this ship back into a placement with all of its cells selected, so it can be
    /// moved again.
    pub fn into_placement(self) -> ShipPlacement {
        let mut placement = ShipPlacement::with_orientation(self.class, self.orientation);
        for (slot, &cell) in placement.slots.iter_mut().zip(self.cells.iter()) {
            slot.select(cell);
        }
        placement.deselected = false;
        placement.anchor = Some(self.anchor);
        placement
    }
}
