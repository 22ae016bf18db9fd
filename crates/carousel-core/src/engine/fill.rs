//! Slot recycling pass

use std::collections::HashMap;

use super::{AttachedSlot, Carousel};
use crate::host::CarouselHost;
use crate::mapper::Position;
use crate::window::visible_slot_count;

/// Which way a fill pass shifts the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillDirection {
    /// Rebuild in place
    None,
    /// Reveal one more position on the leading side
    Start,
    /// Reveal one more position on the trailing side
    End,
}

impl FillDirection {
    #[inline]
    fn step(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Start => -1,
            Self::End => 1,
        }
    }
}

impl<S> Carousel<S> {
    /// Detach every attached slot, move the anchor one step in `direction`,
    /// and re-populate the window left to right.
    ///
    /// Slots whose position is still inside the window are re-attached
    /// as-is; new positions are acquired and measured; anything left over
    /// goes back to the host. `explicit_left` overrides the left edge of
    /// the first slot.
    pub fn fill<H>(&mut self, host: &mut H, direction: FillDirection, explicit_left: Option<i32>)
    where
        H: CarouselHost<S>,
    {
        let count = host.count();
        if count != self.item_count {
            tracing::debug!("Item count changed {} -> {}", self.item_count, count);
            self.item_count = count;
            self.window.resize(host.viewport(), count);
        }
        if count == 0 || !self.window.has_metrics() {
            self.release_all(host);
            return;
        }

        let slot_width = self.window.slot_width;
        let start_left = match (explicit_left, self.slots.first()) {
            (Some(left), _) => left,
            (None, Some(first)) => first.rect.left + direction.step() * slot_width,
            (None, None) => self.window.content_left(),
        };

        let mut cache: HashMap<Position, AttachedSlot<S>> = self
            .slots
            .drain(..)
            .map(|attached| (attached.position, attached))
            .collect();

        let anchor = self.window.anchor as isize + direction.step() as isize;
        self.window.anchor = self.mapper.normalize(anchor, count);

        for index in 0..self.window.visible_count {
            let raw = self.window.anchor as isize + index as isize;
            let Some(position) = self.mapper.position_at(raw, count) else {
                continue;
            };
            let rect = self.window.slot_rect_for(index, start_left);
            let mut attached = match cache.remove(&position) {
                Some(attached) => attached,
                None => {
                    tracing::trace!("Acquiring slot for position {}", position);
                    let slot = host.acquire(position);
                    let measured = host.measure(&slot);
                    if measured.width + 2 * self.horizontal_inset != slot_width {
                        tracing::trace!(
                            "Slot {} measured {} wide, laid out at {}",
                            position,
                            measured.width,
                            slot_width
                        );
                    }
                    AttachedSlot {
                        position,
                        rect,
                        emphasis: Default::default(),
                        slot,
                    }
                }
            };
            attached.rect = rect;
            host.place(&mut attached.slot, self.content_rect(rect));
            self.slots.push(attached);
        }

        for (position, attached) in cache {
            tracing::trace!("Releasing slot for position {}", position);
            host.release(attached.slot);
        }
    }

    /// Roll the window until its first slot straddles the leading edge.
    ///
    /// Bounded mode stops rolling once the data set runs out on that side.
    pub(super) fn settle_window<H>(&mut self, host: &mut H)
    where
        H: CarouselHost<S>,
    {
        let slot_width = self.window.slot_width;
        if slot_width <= 0 {
            return;
        }
        let lead = self.leading_edge();
        loop {
            let Some(first) = self.slots.first() else {
                return;
            };
            let direction = if first.rect.right <= lead {
                FillDirection::End
            } else if first.rect.left > lead {
                FillDirection::Start
            } else {
                return;
            };
            if !self.can_roll(direction) {
                return;
            }
            self.fill(host, direction, None);
        }
    }

    /// Edge the first slot should straddle. A window too short to cover the
    /// viewport is balanced around the content midpoint instead.
    fn leading_edge(&self) -> i32 {
        let space = self.window.viewport().horizontal_space();
        let slot_width = self.window.slot_width;
        let needed = visible_slot_count(space, slot_width, usize::MAX);
        if self.window.visible_count >= needed {
            return self.window.content_left();
        }
        let span = self.window.visible_count as i32 * slot_width;
        self.window.content_center_x() as i32 - span / 2
    }

    fn can_roll(&self, direction: FillDirection) -> bool {
        if self.is_loop_mode() {
            return true;
        }
        match direction {
            FillDirection::None => true,
            FillDirection::Start => self.window.anchor > 0,
            FillDirection::End => self.window.anchor + self.window.visible_count < self.item_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CarouselConfig, ScrollConfig};
    use crate::testing::{assert_consistent, FakeHost, FakeSlot};

    fn laid_out(count: usize, loop_mode: bool) -> (Carousel<FakeSlot>, FakeHost) {
        let mut host = FakeHost::new(count, 800, 200);
        let mut carousel = Carousel::new(
            &CarouselConfig {
                loop_mode,
                ..Default::default()
            },
            ScrollConfig::default(),
        );
        carousel.layout(&mut host).unwrap();
        (carousel, host)
    }

    #[test]
    fn test_fill_end_reuses_overlapping_slots() {
        let (mut carousel, mut host) = laid_out(20, false);
        let ids: Vec<_> = carousel.attached().iter().map(|a| a.slot().id).collect();
        let acquired = host.acquired;

        carousel.fill(&mut host, FillDirection::End, None);

        let positions: Vec<_> = carousel.attached().iter().map(|a| a.position()).collect();
        assert_eq!(positions, vec![1, 2, 3, 4, 5]);
        assert_eq!(host.acquired, acquired + 1);
        assert_eq!(carousel.attached()[0].rect().left, 500);
        // Positions 1..=4 keep their slot instances
        for (attached, id) in carousel.attached().iter().zip(&ids[1..]) {
            assert_eq!(attached.slot().id, *id);
        }
        assert_consistent(&carousel, &host);
    }

    #[test]
    fn test_fill_start_wraps_in_loop_mode() {
        let (mut carousel, mut host) = laid_out(12, true);
        carousel.fill(&mut host, FillDirection::Start, None);
        let positions: Vec<_> = carousel.attached().iter().map(|a| a.position()).collect();
        assert_eq!(positions, vec![9, 10, 11, 0, 1]);
        assert_consistent(&carousel, &host);
    }

    #[test]
    fn test_bounded_window_leaves_gap_past_last_position() {
        let (mut carousel, mut host) = laid_out(20, false);
        carousel.jump_to(&mut host, 19).unwrap();
        let positions: Vec<_> = carousel.attached().iter().map(|a| a.position()).collect();
        assert_eq!(positions, vec![17, 18, 19]);
        assert_consistent(&carousel, &host);
    }

    #[test]
    fn test_fill_picks_up_count_change() {
        let (mut carousel, mut host) = laid_out(12, true);
        host.count = 3;
        carousel.fill(&mut host, FillDirection::None, None);
        assert_eq!(carousel.visible_count(), 3);
        assert_eq!(carousel.attached().len(), 3);
        assert_eq!(host.outstanding(), 3);
        assert_consistent(&carousel, &host);
    }

    #[test]
    fn test_short_loop_ring_stays_balanced() {
        // Two items cannot cover an 800 wide viewport
        let (mut carousel, mut host) = laid_out(2, true);
        assert_eq!(carousel.visible_count(), 2);
        assert_eq!(carousel.centered_position(), 0);
        assert!(carousel.slot_for(0).is_some());

        carousel.scroll_by(&mut host, 250);
        assert_eq!(carousel.attached().len(), 2);
        assert_consistent(&carousel, &host);
    }

    #[test]
    fn test_recycling_keeps_pool_bounded() {
        let (mut carousel, mut host) = laid_out(500, true);
        for _ in 0..200 {
            carousel.scroll_by(&mut host, 170);
        }
        for _ in 0..150 {
            carousel.scroll_by(&mut host, -230);
        }
        assert_eq!(host.outstanding(), carousel.visible_count());
        assert!(host.created <= carousel.visible_count() + 2);
        assert_consistent(&carousel, &host);
    }
}
