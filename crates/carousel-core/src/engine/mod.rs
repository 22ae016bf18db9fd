//! The carousel engine
//!
//! [`Carousel`] owns the slots currently on screen and drives the host
//! contracts in [`crate::host`]. Work is split across submodules that all
//! extend the same type:
//!
//! - `fill` - detach/advance/reattach pass that recycles slots
//! - `scroll` - delta clamping and window rolling
//! - `centering` - offset-to-center, jumps, snap-on-idle, save/restore
//!
//! Every operation is synchronous and must not be re-entered from a host
//! callback. Emphasis is always recomputed after the fill pass that produced
//! the current slot set.

mod centering;
mod fill;
mod scroll;

pub use centering::Activation;
pub use fill::FillDirection;

use crate::config::{CarouselConfig, ScrollConfig};
use crate::emphasis::{Emphasis, EmphasisSettings};
use crate::error::{Error, Result};
use crate::geometry::{Rect, Size};
use crate::host::CarouselHost;
use crate::mapper::{Position, PositionMapper};
use crate::motion::SmoothScroller;
use crate::window::ViewportWindow;

/// A slot currently owned by the engine
#[derive(Debug)]
pub struct AttachedSlot<S> {
    position: Position,
    /// Decorated rectangle (insets included)
    rect: Rect,
    emphasis: Emphasis,
    slot: S,
}

impl<S> AttachedSlot<S> {
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn emphasis(&self) -> Emphasis {
        self.emphasis
    }

    #[inline]
    pub fn slot(&self) -> &S {
        &self.slot
    }
}

#[derive(Debug)]
pub struct Carousel<S> {
    mapper: PositionMapper,
    window: ViewportWindow,
    emphasis: EmphasisSettings,
    horizontal_inset: i32,
    vertical_inset: i32,
    /// Attached slots in window order
    slots: Vec<AttachedSlot<S>>,
    /// Item count seen by the last fill pass
    item_count: usize,
    /// Position the next layout pass centers on
    pending_center: Option<Position>,
    centered: Position,
    centered_changed: bool,
    scroller: SmoothScroller,
}

impl<S> Default for Carousel<S> {
    fn default() -> Self {
        Self::new(&CarouselConfig::default(), ScrollConfig::default())
    }
}

impl<S> Carousel<S> {
    /// Create a detached engine. Nothing is materialized until the first
    /// [`Carousel::layout`].
    pub fn new(config: &CarouselConfig, scroll: ScrollConfig) -> Self {
        Self {
            mapper: PositionMapper::for_loop_mode(config.loop_mode),
            window: ViewportWindow::new(),
            emphasis: config.emphasis_settings(),
            horizontal_inset: config.horizontal_inset.max(0),
            vertical_inset: config.vertical_inset.max(0),
            slots: Vec::new(),
            item_count: 0,
            pending_center: None,
            centered: 0,
            centered_changed: false,
            scroller: SmoothScroller::new(scroll),
        }
    }

    #[inline]
    pub fn is_loop_mode(&self) -> bool {
        self.mapper.is_loop()
    }

    #[inline]
    pub fn mapper(&self) -> PositionMapper {
        self.mapper
    }

    #[inline]
    pub fn window(&self) -> &ViewportWindow {
        &self.window
    }

    #[inline]
    pub fn emphasis_settings(&self) -> &EmphasisSettings {
        &self.emphasis
    }

    /// Attached slots, left to right
    #[inline]
    pub fn attached(&self) -> &[AttachedSlot<S>] {
        &self.slots
    }

    /// The attached slot bound to `position`, if any
    pub fn slot_for(&self, position: Position) -> Option<&AttachedSlot<S>> {
        self.slots.iter().find(|a| a.position == position)
    }

    #[inline]
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    #[inline]
    pub fn anchor(&self) -> Position {
        self.window.anchor
    }

    #[inline]
    pub fn visible_count(&self) -> usize {
        self.window.visible_count
    }

    /// Decorated slot size, zero before the first layout
    pub fn slot_size(&self) -> Size {
        Size::new(self.window.slot_width, self.window.slot_height)
    }

    pub fn insets(&self) -> (i32, i32) {
        (self.horizontal_inset, self.vertical_inset)
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.scroller.is_animating()
    }

    pub fn set_scroll_config(&mut self, config: ScrollConfig) {
        self.scroller.set_config(config);
    }

    pub fn scroll_config(&self) -> &ScrollConfig {
        self.scroller.config()
    }

    /// Full layout pass: re-read the item count and viewport, re-measure if
    /// nothing is attached, and rebuild the window around the pending
    /// center (or the currently centered position).
    pub fn layout<H>(&mut self, host: &mut H) -> Result<()>
    where
        H: CarouselHost<S>,
    {
        let count = host.count();
        if count == 0 {
            tracing::debug!("Layout with empty data source");
            self.release_all(host);
            self.item_count = 0;
            self.window.anchor = 0;
            self.window.resize(host.viewport(), 0);
            return Ok(());
        }

        let preserved = if self.slots.is_empty() {
            None
        } else {
            Some(self.scan_centered())
        };

        if self.slots.is_empty() || !self.window.has_metrics() {
            self.measure_metrics(host)?;
        }
        self.item_count = count;
        self.window.resize(host.viewport(), count);

        let requested = self
            .pending_center
            .take()
            .or(preserved.flatten())
            .unwrap_or(self.centered);
        let target = requested.min(count - 1);
        if target != requested {
            tracing::debug!("Center {} no longer exists, using {}", requested, target);
        }

        let (anchor, left) = self.anchor_for_center(target);
        tracing::debug!(
            "Layout: count={} center={} anchor={} left={} loop={}",
            count,
            target,
            anchor,
            left,
            self.is_loop_mode()
        );
        self.window.anchor = anchor;
        self.fill(host, FillDirection::None, Some(left));
        self.settle_window(host);
        self.refresh_centered();
        self.apply_emphasis_to_all(host);
        Ok(())
    }

    /// Re-run layout after the data set changed size or content.
    pub fn notify_data_changed<H>(&mut self, host: &mut H) -> Result<()>
    where
        H: CarouselHost<S>,
    {
        self.layout(host)
    }

    /// Switch between bounded and loop indexing, keeping the centered item.
    pub fn set_loop_mode<H>(&mut self, host: &mut H, loop_mode: bool) -> Result<()>
    where
        H: CarouselHost<S>,
    {
        if self.is_loop_mode() == loop_mode {
            return Ok(());
        }
        tracing::debug!("Switching loop mode to {}", loop_mode);
        self.scroller.cancel();
        self.invalidate(host);
        self.mapper = PositionMapper::for_loop_mode(loop_mode);
        self.layout(host)
    }

    /// Change the per-slot insets. Slots are re-measured.
    pub fn set_insets<H>(&mut self, host: &mut H, horizontal: i32, vertical: i32) -> Result<()>
    where
        H: CarouselHost<S>,
    {
        let horizontal = horizontal.max(0);
        let vertical = vertical.max(0);
        if (horizontal, vertical) == (self.horizontal_inset, self.vertical_inset) {
            return Ok(());
        }
        self.horizontal_inset = horizontal;
        self.vertical_inset = vertical;
        self.invalidate(host);
        self.window.set_slot_size(Size::default());
        if self.item_count == 0 && host.count() == 0 {
            return Ok(());
        }
        self.layout(host)
    }

    pub fn set_min_scale<H>(&mut self, host: &mut H, value: f32)
    where
        H: CarouselHost<S>,
    {
        self.emphasis.set_min_scale(value);
        self.apply_emphasis_to_all(host);
    }

    pub fn set_min_alpha<H>(&mut self, host: &mut H, value: f32)
    where
        H: CarouselHost<S>,
    {
        self.emphasis.set_min_alpha(value);
        self.apply_emphasis_to_all(host);
    }

    pub fn set_max_depth<H>(&mut self, host: &mut H, value: f32)
    where
        H: CarouselHost<S>,
    {
        self.emphasis.set_max_depth(value);
        self.apply_emphasis_to_all(host);
    }

    pub fn set_scale_divider<H>(&mut self, host: &mut H, value: i64)
    where
        H: CarouselHost<S>,
    {
        self.emphasis.set_scale_divider(value);
        self.apply_emphasis_to_all(host);
    }

    /// Recompute and push emphasis for every attached slot.
    pub fn apply_emphasis_to_all<H>(&mut self, host: &mut H)
    where
        H: CarouselHost<S>,
    {
        let settings = self.emphasis;
        let center = self.window.content_center_x();
        let half_width = self.window.viewport().horizontal_space() as f32 / 2.0;
        for attached in &mut self.slots {
            let emphasis = settings.emphasis_at(attached.rect.center_x(), center, half_width);
            attached.emphasis = emphasis;
            host.apply_emphasis(&mut attached.slot, emphasis);
        }
    }

    /// Tear down: return every slot and report the position to restore.
    pub fn detach<H>(&mut self, host: &mut H) -> Option<Position>
    where
        H: CarouselHost<S>,
    {
        let saved = self.save();
        self.scroller.cancel();
        self.release_all(host);
        self.item_count = 0;
        self.window.anchor = 0;
        saved
    }

    /// Measure position 0 once to learn the uniform slot size.
    fn measure_metrics<H>(&mut self, host: &mut H) -> Result<()>
    where
        H: CarouselHost<S>,
    {
        let scrap = host.acquire(0);
        let measured = host.measure(&scrap);
        host.release(scrap);
        if measured.width <= 0 || measured.height <= 0 {
            tracing::warn!(
                "Render surface measured {}x{}, refusing to lay out",
                measured.width,
                measured.height
            );
            self.window.set_slot_size(Size::default());
            return Err(Error::InvalidSlotSize {
                width: measured.width,
                height: measured.height,
            });
        }
        self.window.set_slot_size(Size::new(
            measured.width + 2 * self.horizontal_inset,
            measured.height + 2 * self.vertical_inset,
        ));
        Ok(())
    }

    /// Remember the centered item and drop every slot before a rebuild.
    fn invalidate<H>(&mut self, host: &mut H)
    where
        H: CarouselHost<S>,
    {
        if !self.slots.is_empty() {
            self.pending_center = Some(self.current_centered_position());
        }
        self.release_all(host);
    }

    fn release_all<H>(&mut self, host: &mut H)
    where
        H: CarouselHost<S>,
    {
        for attached in self.slots.drain(..) {
            host.release(attached.slot);
        }
    }

    /// Content rectangle handed to the host for a decorated rectangle
    #[inline]
    fn content_rect(&self, rect: Rect) -> Rect {
        rect.inset(self.horizontal_inset, self.vertical_inset)
    }

    /// True when every item fits in the viewport at once (bounded mode
    /// then lays the row out centered and never scrolls).
    fn content_fits(&self) -> bool {
        let span = self.item_count as i64 * self.window.slot_width as i64;
        span <= self.window.viewport().horizontal_space() as i64
    }

    /// Anchor position and left offset that put `target` at the canonical
    /// center offset.
    fn anchor_for_center(&self, target: Position) -> (Position, i32) {
        let count = self.item_count;
        let slot_width = self.window.slot_width;
        if !self.is_loop_mode() && self.content_fits() {
            let space = self.window.viewport().horizontal_space();
            let left = self.window.content_left() + (space - count as i32 * slot_width) / 2;
            return (0, left);
        }

        let centered_index = self.window.centered_index();
        let left_target = self.window.left_target();
        if self.is_loop_mode() {
            let anchor = self
                .mapper
                .normalize(target as isize - centered_index as isize, count);
            (anchor, left_target - centered_index as i32 * slot_width)
        } else {
            let anchor = target.saturating_sub(centered_index);
            (anchor, left_target - (target - anchor) as i32 * slot_width)
        }
    }
}
