//! Integer geometry shared by the engine and its hosts.
//!
//! All coordinates are in host units (pixels for a graphical surface, cells
//! for a terminal) and are relative to the viewport's top-left corner.

use serde::Serialize;

/// Narrow a wide distance to host units, pinning at the `i32` range
#[inline]
pub fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Axis-aligned rectangle with exclusive right/bottom edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Horizontal midpoint
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.left as f32 + self.width() as f32 / 2.0
    }

    /// Shift horizontally by `dx`
    #[inline]
    pub fn offset_x(&self, dx: i32) -> Self {
        Self {
            left: self.left + dx,
            right: self.right + dx,
            ..*self
        }
    }

    /// Shrink every side by the given insets
    pub fn inset(&self, horizontal: i32, vertical: i32) -> Self {
        Self {
            left: self.left + horizontal,
            top: self.top + vertical,
            right: self.right - horizontal,
            bottom: self.bottom - vertical,
        }
    }
}

/// Measured width/height of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Padding {
    pub const fn uniform(value: i32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

/// Snapshot of the render surface's dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
    pub padding: Padding,
}

impl Viewport {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            padding: Padding::default(),
        }
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Width available to slots, never negative
    #[inline]
    pub fn horizontal_space(&self) -> i32 {
        (self.width - self.padding.left - self.padding.right).max(0)
    }

    /// Midpoint of the padded content area
    #[inline]
    pub fn content_center_x(&self) -> f32 {
        self.padding.left as f32 + self.horizontal_space() as f32 / 2.0
    }
}
