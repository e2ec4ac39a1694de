//! Software canvases backed by an RGBA8 pixel buffer.

use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};

use crate::{Canvas, Color, PixelRect, SurfaceDimensions};

const BYTES_PER_PIXEL: usize = 4;

/// Row-major RGBA8 pixel buffer implementing [`Canvas`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    dimensions: SurfaceDimensions,
    pixels: Vec<u8>,
    presented: u64,
}

impl Framebuffer {
    /// Creates a cleared framebuffer.
    #[must_use]
    pub fn new(dimensions: SurfaceDimensions) -> Self {
        Self {
            dimensions,
            pixels: vec![0; dimensions.pixel_count() * BYTES_PER_PIXEL],
            presented: 0,
        }
    }

    /// Pixel dimensions of the buffer.
    #[must_use]
    pub const fn dimensions(&self) -> SurfaceDimensions {
        self.dimensions
    }

    /// Raw RGBA8 bytes in row-major order.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Color stored at `(x, y)`, or `None` outside the buffer.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let offset = self.offset(x, y)?;
        let [red, green, blue, alpha] = self.pixels.get(offset..offset + BYTES_PER_PIXEL)? else {
            return None;
        };
        Some(Color {
            red: *red,
            green: *green,
            blue: *blue,
            alpha: *alpha,
        })
    }

    /// Number of frames presented so far.
    #[must_use]
    pub const fn presented_frames(&self) -> u64 {
        self.presented
    }

    /// Copies the current pixels into a standalone frame.
    #[must_use]
    pub fn snapshot(&self) -> Frame {
        Frame {
            dimensions: self.dimensions,
            pixels: self.pixels.clone(),
        }
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.dimensions.width() || y >= self.dimensions.height() {
            return None;
        }
        let index = y as usize * self.dimensions.width() as usize + x as usize;
        Some(index * BYTES_PER_PIXEL)
    }

    fn fill_span(&mut self, y: u32, from: u32, to: u32, color: Color) {
        let to = to.min(self.dimensions.width());
        if from >= to {
            return;
        }
        let (Some(start), Some(end)) = (self.offset(from, y), self.offset(to - 1, y)) else {
            return;
        };
        let rgba = color.to_rgba8();
        for pixel in self.pixels[start..end + BYTES_PER_PIXEL].chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel.copy_from_slice(&rgba);
        }
    }
}

impl Canvas for Framebuffer {
    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        let bottom = rect.bottom().min(self.dimensions.height());
        for y in rect.y..bottom {
            self.fill_span(y, rect.x, rect.right(), color);
        }
    }

    fn stroke_rect(&mut self, rect: PixelRect, color: Color) {
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        let last_row = rect.bottom() - 1;
        let last_column = rect.right() - 1;

        self.fill_span(rect.y, rect.x, rect.right(), color);
        self.fill_span(last_row, rect.x, rect.right(), color);
        for y in rect.y..=last_row.min(self.dimensions.height().saturating_sub(1)) {
            self.fill_span(y, rect.x, rect.x + 1, color);
            self.fill_span(y, last_column, last_column + 1, color);
        }
    }

    fn present(&mut self) {
        self.presented += 1;
    }
}

/// Completed frame handed to a presenter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Pixel dimensions of the frame.
    pub dimensions: SurfaceDimensions,
    /// Row-major RGBA8 bytes.
    pub pixels: Vec<u8>,
}

/// Framebuffer canvas that forwards every presented frame over a bounded channel.
///
/// Frames are dropped rather than queued when the presenter falls behind.
#[derive(Debug)]
pub struct PresentingCanvas {
    framebuffer: Framebuffer,
    frames: SyncSender<Frame>,
}

impl PresentingCanvas {
    /// Wraps a fresh framebuffer forwarding frames to `frames`.
    #[must_use]
    pub fn new(dimensions: SurfaceDimensions, frames: SyncSender<Frame>) -> Self {
        Self {
            framebuffer: Framebuffer::new(dimensions),
            frames,
        }
    }

    /// Creates a canvas together with the receiving end of its frame channel.
    #[must_use]
    pub fn channel(dimensions: SurfaceDimensions, capacity: usize) -> (Self, Receiver<Frame>) {
        let (sender, receiver) = mpsc::sync_channel(capacity);
        (Self::new(dimensions, sender), receiver)
    }

    /// Read-only access to the backing framebuffer.
    #[must_use]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }
}

impl Canvas for PresentingCanvas {
    fn clear(&mut self) {
        self.framebuffer.clear();
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        self.framebuffer.fill_rect(rect, color);
    }

    fn stroke_rect(&mut self, rect: PixelRect, color: Color) {
        self.framebuffer.stroke_rect(rect, color);
    }

    fn present(&mut self) {
        self.framebuffer.present();
        match self.frames.try_send(self.framebuffer.snapshot()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => log::trace!("presenter busy; dropping frame"),
            Err(TrySendError::Disconnected(_)) => log::debug!("presenter hung up; dropping frame"),
        }
    }
}
