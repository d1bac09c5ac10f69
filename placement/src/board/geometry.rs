//! Conversions between pixel positions and cell indices along a single axis.
//!
//! None of these clamp to the grid; bounds checks belong to the caller. `tile_size` must
//! be positive, which [`BoardContext`][crate::board::BoardContext] guarantees.

/// Index of the cell containing `pixel`, rounding toward negative infinity so that
/// pixels left of or above the origin land on negative indices. Works for any `pixel`;
/// indices beyond the range of `i32` saturate, which keeps them off the grid.
#[inline]
pub fn pixel_to_cell(pixel: i32, origin: i32, tile_size: i32) -> i32 {
    let cell = (i64::from(pixel) - i64::from(origin)).div_euclid(i64::from(tile_size));
    cell.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Pixel position of the leading edge of `cell`.
#[inline]
pub fn cell_to_pixel(cell: i32, origin: i32, tile_size: i32) -> i32 {
    origin + cell * tile_size
}

/// Pixel position of the middle of `cell`.
#[inline]
pub fn cell_to_pixel_center(cell: i32, origin: i32, tile_size: i32) -> f32 {
    cell_to_pixel(cell, origin, tile_size) as f32 + half_tile(tile_size)
}

/// Half of a tile in pixels, without truncation.
#[inline]
pub fn half_tile(tile_size: i32) -> f32 {
    0.5 * tile_size as f32
}
