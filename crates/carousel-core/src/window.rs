//! Visible window bookkeeping: anchor, uniform slot size and slot count.

use crate::geometry::{Rect, Size, Viewport};
use crate::mapper::Position;

/// Number of slots needed to cover `horizontal_space`, plus one overscan
/// slot, capped at the item count.
pub fn visible_slot_count(horizontal_space: i32, slot_width: i32, count: usize) -> usize {
    if slot_width <= 0 || count == 0 {
        return 0;
    }
    let space = horizontal_space.max(0);
    let mut columns = space / slot_width + 1;
    if space % slot_width > 0 {
        columns += 1;
    }
    (columns as usize).min(count)
}

#[derive(Debug, Clone, Default)]
pub struct ViewportWindow {
    /// Position of the leftmost window slot
    pub anchor: Position,
    /// Decorated slot width (measured width plus both horizontal insets)
    pub slot_width: i32,
    /// Decorated slot height
    pub slot_height: i32,
    /// Slots materialized per fill pass
    pub visible_count: usize,
    viewport: Viewport,
}

impl ViewportWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once a slot has been measured
    #[inline]
    pub fn has_metrics(&self) -> bool {
        self.slot_width > 0 && self.slot_height > 0
    }

    pub fn set_slot_size(&mut self, size: Size) {
        self.slot_width = size.width;
        self.slot_height = size.height;
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Adopt new viewport dimensions and recompute the window size.
    pub fn resize(&mut self, viewport: Viewport, count: usize) {
        self.viewport = viewport;
        self.visible_count = visible_slot_count(viewport.horizontal_space(), self.slot_width, count);
        tracing::debug!(
            "Window resized: viewport={}x{} slot={}x{} visible={}",
            viewport.width,
            viewport.height,
            self.slot_width,
            self.slot_height,
            self.visible_count
        );
    }

    /// Rectangle of the `index`th window slot when the first slot starts at
    /// `anchor_left`. Slots form a single row.
    pub fn slot_rect_for(&self, index: usize, anchor_left: i32) -> Rect {
        Rect::new(
            anchor_left + index as i32 * self.slot_width,
            self.viewport.padding.top,
            self.slot_width,
            self.slot_height,
        )
    }

    /// Offset from the content start that centers a slot in the viewport
    #[inline]
    pub fn center_offset(&self) -> i32 {
        (self.viewport.horizontal_space() - self.slot_width) / 2
    }

    /// Window index that sits nearest to the visual center
    #[inline]
    pub fn centered_index(&self) -> usize {
        ((self.visible_count + 1) / 2).saturating_sub(1)
    }

    /// Left edge of a centered slot
    #[inline]
    pub fn left_target(&self) -> i32 {
        self.viewport.padding.left + self.center_offset()
    }

    /// Right edge of a centered slot, measured against trailing padding
    #[inline]
    pub fn right_target(&self) -> i32 {
        self.viewport.width - self.viewport.padding.right - self.center_offset()
    }

    /// Leading edge of the content area
    #[inline]
    pub fn content_left(&self) -> i32 {
        self.viewport.padding.left
    }

    #[inline]
    pub fn content_center_x(&self) -> f32 {
        self.viewport.content_center_x()
    }
}
