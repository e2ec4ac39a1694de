#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Render surface for the Game of Life widget.
//!
//! The surface consumes [`SurfaceMessage`] values on a dedicated worker thread
//! and paints the most recent change-set onto a [`Canvas`] at a capped frame
//! rate. The crate also hosts the pixel-space helpers adapters use to fit the
//! displayed surface into its container and to map pointer positions back to
//! grid cells.

mod canvas;
mod framebuffer;
mod layout;
mod limiter;
mod painter;
mod worker;

use life_core::GridSize;
use std::io;
use thiserror::Error;

pub use canvas::{Canvas, Color, PixelRect};
pub use framebuffer::{Frame, Framebuffer, PresentingCanvas};
pub use layout::{fit_surface, pointer_to_cell};
pub use limiter::FrameLimiter;
pub use painter::paint;
pub use worker::{SurfaceMessage, SurfaceSender, SurfaceWorker};

/// Edge length of a single cell in surface pixels.
pub const CELL_PIXELS: u32 = 10;

/// Spacing between grid overlay strokes in surface pixels.
pub const GRID_LINE_SPACING: u32 = 10;

/// Maximum number of frames painted per second.
pub const FRAMES_PER_SECOND: u32 = 30;

/// Fill used for the surface background.
pub const BACKGROUND_COLOR: Color = Color::from_rgb_u8(0xff, 0xff, 0xff);

/// Fill used for live cells.
pub const LIVE_CELL_COLOR: Color = Color::from_rgb_u8(0x00, 0x00, 0x00);

/// Stroke used for the grid overlay.
pub const GRID_LINE_COLOR: Color = Color::from_rgb_u8(0xc3, 0xc3, 0xc3);

/// Pixel dimensions of a drawable surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceDimensions {
    width: u32,
    height: u32,
}

impl SurfaceDimensions {
    /// Creates surface dimensions, rejecting surfaces without area.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderingError> {
        if width == 0 || height == 0 {
            return Err(RenderingError::EmptySurface { width, height });
        }

        Ok(Self { width, height })
    }

    /// Dimensions of a surface showing every cell of `grid` at [`CELL_PIXELS`].
    #[must_use]
    pub fn for_grid(grid: GridSize) -> Self {
        Self {
            width: grid.width().saturating_mul(CELL_PIXELS),
            height: grid.height().saturating_mul(CELL_PIXELS),
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels covered by the surface.
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Rectangle covering the whole surface.
    #[must_use]
    pub const fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width, self.height)
    }
}

/// Errors raised while setting up a render surface.
#[derive(Debug, Error)]
pub enum RenderingError {
    /// A surface must cover at least one pixel along each axis.
    #[error("surface dimensions must be positive (received {width}x{height})")]
    EmptySurface {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
    /// The worker thread could not be spawned.
    #[error("failed to spawn render worker")]
    Spawn(#[source] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_for_grid_scales_by_cell_pixels() {
        let grid = GridSize::new(12, 7).expect("valid grid");
        let surface = SurfaceDimensions::for_grid(grid);

        assert_eq!((surface.width(), surface.height()), (120, 70));
        assert_eq!(surface.pixel_count(), 8400);
    }

    #[test]
    fn surface_without_area_is_rejected() {
        let error = SurfaceDimensions::new(0, 40).expect_err("zero width must fail");

        assert!(matches!(
            error,
            RenderingError::EmptySurface {
                width: 0,
                height: 40
            }
        ));
    }
}
