//! Types that describe the game board on screen.

use std::convert::TryFrom;

use glam::{IVec2, Vec2};

pub use self::{
    cell::{Axis, Cell},
    errors::{AddShipError, BoardError, CannotPlaceReason, PlaceError, SessionError},
    setup::PlacementSession,
};

mod cell;
mod errors;
pub mod geometry;
pub mod setup;

/// Axis-aligned pixel rectangle, such as the board itself or a button next to it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Region {
    /// Top-left corner in pixels.
    pub top_left: IVec2,
    /// Width and height in pixels.
    pub size: IVec2,
}

impl Region {
    /// Construct a [`Region`] from its top-left corner and its size.
    pub fn new(top_left: IVec2, size: IVec2) -> Self {
        Self { top_left, size }
    }

    /// Returns true if `point` lies inside this region. The right and bottom edges are
    /// exclusive.
    pub fn contains(&self, point: IVec2) -> bool {
        let bottom_right = self.top_left + self.size;
        point.x >= self.top_left.x
            && point.y >= self.top_left.y
            && point.x < bottom_right.x
            && point.y < bottom_right.y
    }
}

/// Read-only description of the square grid ships are placed on: where it is drawn on
/// screen, how many cells it has per side, and how large each cell is.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BoardContext {
    /// Pixel position of the grid's top-left corner.
    origin: IVec2,
    /// Number of cells along each side.
    grid_size: i32,
    /// Width and height of one cell in pixels.
    tile_size: i32,
}

impl BoardContext {
    /// Create a [`BoardContext`] for a board `board_width` pixels wide split into
    /// `grid_size` cells per side. The tile size is `board_width / grid_size`, truncated.
    pub fn new(origin: IVec2, board_width: u32, grid_size: u32) -> Result<Self, BoardError> {
        if grid_size == 0 {
            return Err(BoardError::EmptyGrid);
        }
        let tile_size = board_width / grid_size;
        if tile_size == 0 {
            return Err(BoardError::TileTooSmall {
                board_width,
                grid_size,
            });
        }
        Self::with_tile_size(origin, grid_size, tile_size)
    }

    /// Create a [`BoardContext`] with an explicit tile size.
    pub fn with_tile_size(
        origin: IVec2,
        grid_size: u32,
        tile_size: u32,
    ) -> Result<Self, BoardError> {
        if grid_size == 0 {
            return Err(BoardError::EmptyGrid);
        }
        if tile_size == 0 {
            return Err(BoardError::ZeroTileSize);
        }
        // The whole board must fit in pixel space so cell_to_pixel can't overflow.
        let grid_size_i = i32::try_from(grid_size).map_err(|_| BoardError::TooLarge)?;
        let tile_size_i = i32::try_from(tile_size).map_err(|_| BoardError::TooLarge)?;
        grid_size_i
            .checked_mul(tile_size_i)
            .and_then(|width| width.checked_add(origin.x.max(origin.y)))
            .ok_or(BoardError::TooLarge)?;
        Ok(Self {
            origin,
            grid_size: grid_size_i,
            tile_size: tile_size_i,
        })
    }

    /// Pixel position of the grid's top-left corner.
    pub fn origin(&self) -> IVec2 {
        self.origin
    }

    /// Number of cells along each side of the grid.
    pub fn grid_size(&self) -> usize {
        self.grid_size as usize
    }

    /// Width and height of a single cell in pixels.
    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Pixel area covered by the grid.
    pub fn region(&self) -> Region {
        let side = self.grid_size * self.tile_size;
        Region::new(self.origin, IVec2::new(side, side))
    }

    /// Returns true if `index` is a valid row or column index.
    #[inline]
    pub fn in_bounds(&self, index: i32) -> bool {
        index >= 0 && index < self.grid_size
    }

    /// The cell under the given pixel, or `None` if the pixel is off the grid.
    pub fn cell_at(&self, pixel: IVec2) -> Option<Cell> {
        let col = geometry::pixel_to_cell(pixel.x, self.origin.x, self.tile_size);
        let row = geometry::pixel_to_cell(pixel.y, self.origin.y, self.tile_size);
        if self.in_bounds(col) && self.in_bounds(row) {
            Some(Cell::new(col as usize, row as usize))
        } else {
            None
        }
    }

    /// Pixel position of the top-left corner of `cell`, where its tile is drawn.
    pub fn cell_top_left(&self, cell: Cell) -> IVec2 {
        IVec2::new(
            geometry::cell_to_pixel(cell.col as i32, self.origin.x, self.tile_size),
            geometry::cell_to_pixel(cell.row as i32, self.origin.y, self.tile_size),
        )
    }

    /// Pixel position of the middle of `cell`.
    pub fn cell_center(&self, cell: Cell) -> Vec2 {
        Vec2::new(
            geometry::cell_to_pixel_center(cell.col as i32, self.origin.x, self.tile_size),
            geometry::cell_to_pixel_center(cell.row as i32, self.origin.y, self.tile_size),
        )
    }

    /// Get an iterator over rows of this grid. Each row is an iterator over the cells of
    /// that row.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = Cell>> {
        let size = self.grid_size();
        (0..size).map(move |row| (0..size).map(move |col| Cell { col, row }))
    }
}
