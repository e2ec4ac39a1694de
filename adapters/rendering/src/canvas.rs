//! Drawing contract implemented by render targets.

/// RGBA color used when painting frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
    /// Alpha channel.
    pub alpha: u8,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: u8::MAX,
        }
    }

    /// Fully transparent black, the state of a cleared surface.
    #[must_use]
    pub const fn transparent() -> Self {
        Self {
            red: 0,
            green: 0,
            blue: 0,
            alpha: 0,
        }
    }

    /// Channels in RGBA byte order.
    #[must_use]
    pub const fn to_rgba8(self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}

/// Axis-aligned rectangle expressed in whole surface pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Horizontal extent.
    pub width: u32,
    /// Vertical extent.
    pub height: u32,
}

impl PixelRect {
    /// Creates a rectangle from its origin and extent.
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    #[must_use]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }
}

/// Immediate-mode drawing target driven by the render worker.
///
/// Operations accumulate into a pending frame which becomes visible when
/// [`Canvas::present`] is called.
pub trait Canvas {
    /// Resets every pixel to [`Color::transparent`].
    fn clear(&mut self);

    /// Fills `rect` with `color`, clipped to the surface.
    fn fill_rect(&mut self, rect: PixelRect, color: Color);

    /// Draws a one pixel outline along the inside edges of `rect`.
    fn stroke_rect(&mut self, rect: PixelRect, color: Color);

    /// Publishes the pending frame.
    fn present(&mut self);
}
