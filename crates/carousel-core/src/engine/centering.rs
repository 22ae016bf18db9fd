//! Centering: distance to center, jumps, idle snapping and state restore

use std::time::Instant;

use super::Carousel;
use crate::error::{Error, Result};
use crate::geometry::saturate;
use crate::host::CarouselHost;
use crate::mapper::Position;

/// Outcome of activating (clicking, pressing enter on) a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The slot was already centered: treat as a selection
    Selected(Position),
    /// The slot is being smooth-scrolled to the center
    Centering(Position),
}

impl<S> Carousel<S> {
    /// Signed scroll distance that brings `target` to the center.
    ///
    /// Loop mode takes the shorter way around the ring. Distances of one
    /// unit or less are reported as 0, and distances past the `i32` range
    /// are pinned to it.
    pub fn offset_to_center(&self, target: Position) -> Result<i32> {
        validate(target, self.item_count)?;
        let Some(first) = self.slots.first() else {
            return Ok(0);
        };
        let columns = self
            .mapper
            .shortest_wrap_delta(first.position, target, self.item_count);
        let slot_width = i64::from(self.window.slot_width);
        let mut offset = i64::from(first.rect.left) - i64::from(self.window.left_target())
            + columns as i64 * slot_width;
        if self.is_loop_mode() {
            // The first slot may sit on the far side of the ring from the center
            let ring = self.item_count as i64 * slot_width;
            if offset > ring / 2 {
                offset -= ring;
            } else if offset < -(ring / 2) {
                offset += ring;
            }
        }
        if offset.abs() <= 1 {
            return Ok(0);
        }
        Ok(saturate(offset))
    }

    /// Position of the slot covering the content midpoint. Falls back to
    /// the pending center, then 0, when nothing covers it.
    pub fn current_centered_position(&self) -> Position {
        self.scan_centered()
            .or(self.pending_center)
            .unwrap_or(0)
    }

    /// Last centered position observed after a scroll or layout
    #[inline]
    pub fn centered_position(&self) -> Position {
        self.centered
    }

    /// Returns the centered position if it changed since the last call.
    pub fn take_centered_change(&mut self) -> Option<Position> {
        std::mem::take(&mut self.centered_changed).then_some(self.centered)
    }

    /// Center `position` immediately, without animation.
    pub fn jump_to<H>(&mut self, host: &mut H, position: Position) -> Result<()>
    where
        H: CarouselHost<S>,
    {
        validate(position, host.count())?;
        self.scroller.cancel();
        self.pending_center = Some(position);
        self.layout(host)
    }

    /// Animate `position` to the center, starting at `now`.
    pub fn smooth_scroll_to(&mut self, position: Position, now: Instant) -> Result<()> {
        let offset = self.offset_to_center(position)?;
        tracing::debug!("Smooth scrolling to {} ({} units)", position, offset);
        self.scroller.start(offset, now);
        Ok(())
    }

    /// Called once scrolling has come to rest: settle on the position under
    /// the midpoint and animate it to the exact center.
    pub fn snap_on_idle(&mut self, now: Instant) -> Position {
        let centered = self.current_centered_position();
        if self.slots.is_empty() {
            return centered;
        }
        self.set_centered(centered);
        match self.offset_to_center(centered) {
            Ok(0) => {}
            Ok(offset) => {
                tracing::trace!("Snapping {} by {}", centered, offset);
                self.scroller.start(offset, now);
            }
            Err(e) => tracing::warn!("Cannot snap to {}: {}", centered, e),
        }
        centered
    }

    /// Handle activation of the slot showing `position`.
    pub fn on_slot_activated(&mut self, position: Position, now: Instant) -> Result<Activation> {
        validate(position, self.item_count)?;
        if !self.slots.is_empty() && position == self.current_centered_position() {
            return Ok(Activation::Selected(position));
        }
        self.smooth_scroll_to(position, now)?;
        Ok(Activation::Centering(position))
    }

    /// Position to persist, if any.
    pub fn save(&self) -> Option<Position> {
        if self.slots.is_empty() {
            return self.pending_center;
        }
        Some(self.current_centered_position())
    }

    /// Restore a saved position. Takes effect on the next layout; a
    /// position past the end is clamped then.
    pub fn load(&mut self, saved: Option<Position>) {
        if let Some(position) = saved {
            tracing::debug!("Restoring center {}", position);
            self.pending_center = Some(position);
        }
    }

    pub(super) fn scan_centered(&self) -> Option<Position> {
        let midpoint = self.window.content_center_x();
        self.slots
            .iter()
            .find(|a| a.rect.right as f32 > midpoint)
            .map(|a| a.position)
    }

    pub(super) fn refresh_centered(&mut self) {
        if self.slots.is_empty() {
            return;
        }
        let centered = self.current_centered_position();
        self.set_centered(centered);
    }

    fn set_centered(&mut self, position: Position) {
        if position != self.centered {
            tracing::debug!("Centered position {} -> {}", self.centered, position);
            self.centered = position;
            self.centered_changed = true;
        }
    }
}

fn validate(position: Position, count: usize) -> Result<()> {
    if position >= count {
        tracing::warn!("Position {} out of range (count {})", position, count);
        return Err(Error::PositionOutOfRange { position, count });
    }
    Ok(())
}
