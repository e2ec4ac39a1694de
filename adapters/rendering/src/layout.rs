//! Pixel-space geometry shared by hosts.

use glam::Vec2;
use life_core::{CellCoord, GridSize};

/// Largest displayed size with the grid's aspect ratio that touches `container`.
///
/// With `r = width / height` the candidates are `(W, W / r)` and `(H * r, H)`.
/// The first wins when its height fits, the second when its width fits.
/// Returns `None` when neither strictly fits, leaving the displayed size as is.
#[must_use]
pub fn fit_surface(grid: GridSize, container: Vec2) -> Option<Vec2> {
    let ratio = grid.width() as f32 / grid.height() as f32;

    let by_width = Vec2::new(container.x, container.x / ratio);
    if by_width.y < container.y {
        return Some(by_width);
    }

    let by_height = Vec2::new(container.y * ratio, container.y);
    if by_height.x < container.x {
        return Some(by_height);
    }

    None
}

/// Maps a pointer position relative to the displayed surface onto a grid cell.
///
/// Returns `None` when the position lies outside the displayed box.
#[must_use]
pub fn pointer_to_cell(position: Vec2, displayed: Vec2, grid: GridSize) -> Option<CellCoord> {
    if displayed.x <= 0.0 || displayed.y <= 0.0 {
        return None;
    }
    if position.x < 0.0 || position.y < 0.0 || position.x >= displayed.x || position.y >= displayed.y
    {
        return None;
    }

    let column = (position.x * grid.width() as f32 / displayed.x).floor() as u32;
    let row = (position.y * grid.height() as f32 / displayed.y).floor() as u32;
    let cell = CellCoord::new(column, row);

    grid.contains(cell).then_some(cell)
}
